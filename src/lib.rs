pub mod calculation;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{Result, SupplyError};
pub use models::{InventoryItem, RecommendedItemDefinition};
