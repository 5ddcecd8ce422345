pub mod alerts;
pub mod constants;
pub mod context;
pub mod default;
pub mod food;
pub mod results;
pub mod shortage;
pub mod strategy;
pub mod water;

pub use alerts::{
    generate_dashboard_alerts, sort_alerts, DashboardContext, EnglishTranslator, Translator,
};
pub use constants::*;
pub use context::{CalculationInputs, CalculationOptions, CategoryCalculationContext};
pub use results::{
    ActualQuantity, CategoryShortage, ItemCalculationResult, ShortageCalculationResult,
};
pub use shortage::{calculate_category, CategoryReport, CategoryStatus};
pub use strategy::{CategoryStrategy, SPECIALIZED_STRATEGIES};
