use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calculation::constants::{
    BOTTLED_WATER_ID, FOOD_CATEGORY_ID, PETS_CATEGORY_ID, WATER_CATEGORY_ID,
};
use crate::error::{Result, SupplyError};
use crate::models::{
    Category, ProductTemplateFactory, RecommendedItemDefinition, Unit, CUSTOM_ITEM_TYPE,
};

pub const BUILT_IN_KIT_ID: &str = "standard";

/// A named, shareable set of recommended items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<RecommendedItemDefinition>,
}

impl Kit {
    /// Parse a user-uploaded kit, validating every item against `categories`.
    pub fn from_json(json: &str, categories: &[Category]) -> Result<Kit> {
        let raw: Kit = serde_json::from_str(json)?;
        raw.validated(categories)
    }

    /// Run every item through [`ProductTemplateFactory`].
    ///
    /// Item ids must be unique within the kit and must not be
    /// [`CUSTOM_ITEM_TYPE`], or stocked items would match more than one row.
    pub fn validated(self, categories: &[Category]) -> Result<Kit> {
        if self.id.trim().is_empty() {
            return Err(SupplyError::InvalidInput("kit id must not be empty".to_string()));
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.id == CUSTOM_ITEM_TYPE {
                return Err(SupplyError::InvalidInput(format!(
                    "item id '{}' is reserved",
                    CUSTOM_ITEM_TYPE
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(SupplyError::InvalidInput(format!(
                    "kit '{}' lists item '{}' more than once",
                    self.id, item.id
                )));
            }
        }
        let items = self
            .items
            .into_iter()
            .map(|item| ProductTemplateFactory::create(item, categories))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Kit { items, ..self })
    }

    pub fn is_built_in(&self) -> bool {
        self.id == BUILT_IN_KIT_ID
    }

    pub fn find_item(&self, id: &str) -> Option<&RecommendedItemDefinition> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// The 72-hour household kit shipped with the application.
pub fn built_in_kit() -> Kit {
    use RecommendedItemDefinition as R;

    let items = vec![
        // Water & beverages
        R::new(BOTTLED_WATER_ID, "Bottled water", WATER_CATEGORY_ID, Unit::Liters, 3.0)
            .with_people_scaling()
            .with_day_scaling()
            .with_expiration_months(12),
        R::new("long-life-milk", "Long-life milk", WATER_CATEGORY_ID, Unit::Liters, 0.5)
            .with_people_scaling()
            .with_expiration_months(6),
        R::new("long-life-juice", "Long-life juice", WATER_CATEGORY_ID, Unit::Liters, 0.5)
            .with_people_scaling()
            .with_expiration_months(12),
        // Food
        R::new("canned-soup", "Canned soup", FOOD_CATEGORY_ID, Unit::Cans, 1.0)
            .with_people_scaling()
            .with_day_scaling()
            .with_calories_per_unit(300.0)
            .with_expiration_months(24),
        R::new("pasta", "Pasta", FOOD_CATEGORY_ID, Unit::Kilograms, 0.1)
            .with_people_scaling()
            .with_day_scaling()
            .with_calories_per_100g(350.0, 1000.0)
            .with_water_requirement(1.0)
            .with_expiration_months(24),
        R::new("rice", "Rice", FOOD_CATEGORY_ID, Unit::Kilograms, 0.1)
            .with_people_scaling()
            .with_day_scaling()
            .with_calories_per_100g(360.0, 1000.0)
            .with_water_requirement(1.5)
            .with_expiration_months(24),
        R::new("oatmeal", "Oatmeal", FOOD_CATEGORY_ID, Unit::Kilograms, 0.05)
            .with_people_scaling()
            .with_day_scaling()
            .with_calories_per_100g(370.0, 1000.0)
            .with_water_requirement(2.0)
            .with_expiration_months(12),
        R::new("crackers", "Crackers", FOOD_CATEGORY_ID, Unit::Packages, 0.5)
            .with_people_scaling()
            .with_calories_per_unit(1000.0)
            .with_expiration_months(12),
        R::new("canned-fish", "Canned fish", FOOD_CATEGORY_ID, Unit::Cans, 0.5)
            .with_people_scaling()
            .with_day_scaling()
            .with_calories_per_unit(200.0)
            .with_expiration_months(36),
        R::new("peanut-butter", "Peanut butter", FOOD_CATEGORY_ID, Unit::Jars, 0.5)
            .with_people_scaling()
            .with_calories_per_100g(590.0, 350.0)
            .with_expiration_months(12),
        R::new("frozen-meals", "Frozen meals", FOOD_CATEGORY_ID, Unit::Packages, 1.0)
            .with_people_scaling()
            .with_day_scaling()
            .requiring_freezer()
            .with_calories_per_unit(400.0)
            .with_expiration_months(6),
        // Cooking & heat
        R::new("camping-stove", "Camping stove", "cooking-heat", Unit::Pieces, 1.0),
        R::new("stove-fuel", "Stove fuel", "cooking-heat", Unit::Canisters, 1.0),
        R::new("matches", "Matches or lighter", "cooking-heat", Unit::Boxes, 2.0),
        R::new("warm-blankets", "Warm blankets", "cooking-heat", Unit::Pieces, 1.0)
            .with_people_scaling(),
        // Light & power
        R::new("flashlight", "Flashlight", "light-power", Unit::Pieces, 1.0).with_people_scaling(),
        R::new("batteries", "Spare batteries", "light-power", Unit::Packages, 2.0),
        R::new("candles", "Candles", "light-power", Unit::Pieces, 10.0),
        R::new("power-bank", "Power bank", "light-power", Unit::Pieces, 1.0),
        // Communication & info
        R::new("battery-radio", "Battery radio", "communication-info", Unit::Pieces, 1.0),
        R::new("contact-list", "Printed contact list", "communication-info", Unit::Pieces, 1.0),
        // Medical & health
        R::new("first-aid-kit", "First aid kit", "medical-health", Unit::Pieces, 1.0),
        R::new("prescription-medication", "Prescription medication", "medical-health", Unit::Days, 1.0)
            .with_day_scaling(),
        R::new("painkillers", "Painkillers", "medical-health", Unit::Packages, 1.0),
        // Hygiene & sanitation
        R::new("toilet-paper", "Toilet paper", "hygiene-sanitation", Unit::Rolls, 0.5)
            .with_people_scaling()
            .with_day_scaling(),
        R::new("wet-wipes", "Wet wipes", "hygiene-sanitation", Unit::Packages, 1.0)
            .with_people_scaling(),
        R::new("hand-sanitizer", "Hand sanitizer", "hygiene-sanitation", Unit::Bottles, 1.0),
        R::new("garbage-bags", "Garbage bags", "hygiene-sanitation", Unit::Packages, 1.0),
        // Tools & supplies
        R::new("multi-tool", "Multi-tool", "tools-supplies", Unit::Pieces, 1.0),
        R::new("duct-tape", "Duct tape", "tools-supplies", Unit::Rolls, 1.0),
        R::new("whistle", "Whistle", "tools-supplies", Unit::Pieces, 1.0).with_people_scaling(),
        // Cash & documents
        R::new("cash", "Cash", "cash-documents", Unit::Euros, 300.0),
        R::new("document-copies", "Copies of documents", "cash-documents", Unit::Sets, 1.0),
        // Pets
        R::new("pet-food", "Pet food", PETS_CATEGORY_ID, Unit::Kilograms, 0.2)
            .with_pet_scaling()
            .with_day_scaling(),
        R::new("pet-water", "Water for pets", PETS_CATEGORY_ID, Unit::Liters, 1.0)
            .with_pet_scaling()
            .with_day_scaling(),
    ];

    Kit {
        id: BUILT_IN_KIT_ID.to_string(),
        name: "72-hour standard kit".to_string(),
        description: Some("Supplies for a household to manage three days on its own".to_string()),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standard_categories;

    #[test]
    fn test_built_in_kit_is_valid() {
        let kit = built_in_kit();
        let categories = standard_categories();
        for item in &kit.items {
            assert!(
                ProductTemplateFactory::create(item.clone(), &categories).is_ok(),
                "invalid template {}",
                item.id
            );
        }
        let ids: HashSet<&str> = kit.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), kit.items.len(), "duplicate template ids");
        assert!(kit.find_item(BOTTLED_WATER_ID).is_some());
    }

    #[test]
    fn test_from_json_validates_items() {
        let categories = standard_categories();
        let good = r#"{"id":"mini","name":"Mini kit","items":[
            {"id":"bottled-water","name":"Water","category":"water-beverages","unit":"liters","baseQuantity":3,"scaleWithPeople":true,"scaleWithDays":true}
        ]}"#;
        let kit = Kit::from_json(good, &categories).unwrap();
        assert_eq!(kit.items.len(), 1);
        assert!(kit.items[0].scale_with_days);

        let bad = r#"{"id":"bad","name":"Bad kit","items":[
            {"id":"x","name":"X","category":"space","unit":"pieces","baseQuantity":1}
        ]}"#;
        assert!(Kit::from_json(bad, &categories).is_err());
    }

    #[test]
    fn test_from_json_rejects_repeated_item_ids() {
        let categories = standard_categories();
        let repeated = r#"{"id":"twice","name":"Twice","items":[
            {"id":"candles","name":"Candles","category":"light-power","unit":"pieces","baseQuantity":10},
            {"id":"candles","name":"More candles","category":"light-power","unit":"pieces","baseQuantity":10}
        ]}"#;
        assert!(matches!(
            Kit::from_json(repeated, &categories),
            Err(SupplyError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_custom_item_id() {
        let categories = standard_categories();
        let reserved = r#"{"id":"odd","name":"Odd","items":[
            {"id":"custom","name":"Anything","category":"light-power","unit":"pieces","baseQuantity":1}
        ]}"#;
        assert!(matches!(
            Kit::from_json(reserved, &categories),
            Err(SupplyError::InvalidInput(_))
        ));
    }
}
