pub mod alert;
pub mod category;
pub mod household;
pub mod inventory;
pub mod kit;
pub mod product;
pub mod unit;
pub(crate) mod validation;

pub use alert::{Alert, AlertType};
pub use category::{is_standard_category, standard_categories, Category, STANDARD_CATEGORY_IDS};
pub use household::{
    HouseholdConfig, HouseholdConfigFactory, HouseholdConfigInput,
    HouseholdConfigValidationError, HouseholdPreset,
};
pub use inventory::{InventoryItem, CUSTOM_ITEM_TYPE};
pub use kit::{built_in_kit, Kit, BUILT_IN_KIT_ID};
pub use product::{
    ProductTemplateFactory, ProductTemplateValidationError, RecommendedItemDefinition,
};
pub use unit::Unit;
pub use validation::FieldViolation;
