use serde::{Deserialize, Serialize};

use crate::calculation::constants::{FOOD_CATEGORY_ID, PETS_CATEGORY_ID, WATER_CATEGORY_ID};

/// A grouping of inventory items with its own shortage rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    pub fn custom(id: impl Into<String>, name: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon,
            is_custom: true,
        }
    }

    fn standard(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: Some(icon.to_string()),
            is_custom: false,
        }
    }
}

/// Ids of the built-in categories, in display order.
pub const STANDARD_CATEGORY_IDS: [&str; 10] = [
    WATER_CATEGORY_ID,
    FOOD_CATEGORY_ID,
    "cooking-heat",
    "light-power",
    "communication-info",
    "medical-health",
    "hygiene-sanitation",
    "tools-supplies",
    "cash-documents",
    PETS_CATEGORY_ID,
];

pub fn is_standard_category(id: &str) -> bool {
    STANDARD_CATEGORY_IDS.contains(&id)
}

/// The built-in categories, in display order.
pub fn standard_categories() -> Vec<Category> {
    vec![
        Category::standard(WATER_CATEGORY_ID, "Water & Beverages", "💧"),
        Category::standard(FOOD_CATEGORY_ID, "Food", "🥫"),
        Category::standard("cooking-heat", "Cooking & Heat", "🔥"),
        Category::standard("light-power", "Light & Power", "🔦"),
        Category::standard("communication-info", "Communication & Info", "📻"),
        Category::standard("medical-health", "Medical & Health", "🩹"),
        Category::standard("hygiene-sanitation", "Hygiene & Sanitation", "🧼"),
        Category::standard("tools-supplies", "Tools & Supplies", "🔧"),
        Category::standard("cash-documents", "Cash & Documents", "💶"),
        Category::standard(PETS_CATEGORY_ID, "Pets", "🐾"),
    ]
}
