use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{RecommendedItemDefinition, Unit};

/// `item_type` value for items that are not tied to a recommendation.
pub const CUSTOM_ITEM_TYPE: &str = "custom";

/// A concrete stocked item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category_id: String,
    /// Id of the recommendation this item is, or [`CUSTOM_ITEM_TYPE`].
    pub item_type: String,
    /// For custom items: the recommendation the user says this item covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfies_recommendation: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub never_expires: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_water_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<f64>,
    #[serde(default)]
    pub marked_as_enough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InventoryItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category_id: impl Into<String>,
        item_type: impl Into<String>,
        quantity: f64,
        unit: Unit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category_id: category_id.into(),
            item_type: item_type.into(),
            satisfies_recommendation: None,
            quantity,
            unit,
            expiration_date: None,
            never_expires: false,
            requires_water_liters: None,
            calories_per_unit: None,
            weight_grams: None,
            marked_as_enough: false,
            location: None,
            notes: None,
        }
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_water_requirement(mut self, liters: f64) -> Self {
        self.requires_water_liters = Some(liters);
        self
    }

    pub fn with_calories_per_unit(mut self, calories: f64) -> Self {
        self.calories_per_unit = Some(calories);
        self
    }

    pub fn satisfying(mut self, recommendation_id: impl Into<String>) -> Self {
        self.satisfies_recommendation = Some(recommendation_id.into());
        self
    }

    pub fn marked_enough(mut self) -> Self {
        self.marked_as_enough = true;
        self
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        self.item_type == CUSTOM_ITEM_TYPE
    }

    /// Whether this item counts toward `rec`: either it is that recommended
    /// type, or it is a custom item in the same category linked to it.
    pub fn matches_recommendation(&self, rec: &RecommendedItemDefinition) -> bool {
        if self.item_type == rec.id {
            return true;
        }
        self.is_custom()
            && self.category_id == rec.category
            && self.satisfies_recommendation.as_deref() == Some(rec.id.as_str())
    }

    /// Calories per unit from the item itself, falling back to its template.
    pub fn resolved_calories_per_unit(&self, rec: Option<&RecommendedItemDefinition>) -> Option<f64> {
        self.calories_per_unit
            .or_else(|| rec.and_then(|r| r.resolved_calories_per_unit()))
    }

    /// Signed days until expiry; negative once expired. `None` when the
    /// item has no date or never expires.
    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        if self.never_expires {
            return None;
        }
        self.expiration_date
            .map(|date| date.signed_duration_since(today).num_days())
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.days_until_expiration(today).is_some_and(|days| days < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec() -> RecommendedItemDefinition {
        RecommendedItemDefinition::new("canned-soup", "Canned soup", "food", Unit::Cans, 1.0)
    }

    #[test]
    fn test_matches_by_item_type() {
        let item = InventoryItem::new("1", "Tomato soup", "food", "canned-soup", 3.0, Unit::Cans);
        assert!(item.matches_recommendation(&rec()));
    }

    #[test]
    fn test_custom_item_needs_explicit_link() {
        let unlinked = InventoryItem::new("2", "Chili", "food", CUSTOM_ITEM_TYPE, 2.0, Unit::Cans);
        assert!(!unlinked.matches_recommendation(&rec()));

        let linked = unlinked.clone().satisfying("canned-soup");
        assert!(linked.matches_recommendation(&rec()));

        let mut wrong_category = linked.clone();
        wrong_category.category_id = "tools-supplies".to_string();
        assert!(!wrong_category.matches_recommendation(&rec()));
    }

    #[test]
    fn test_expiration() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let item = InventoryItem::new("3", "Milk", "water-beverages", "long-life-milk", 1.0, Unit::Liters)
            .with_expiration(NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
        assert_eq!(item.days_until_expiration(today), Some(-2));
        assert!(item.is_expired(today));

        let mut forever = item.clone();
        forever.never_expires = true;
        assert!(!forever.is_expired(today));
        assert_eq!(forever.days_until_expiration(today), None);
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let json = r#"{"id":"x","name":"Water","categoryId":"water-beverages","itemType":"bottled-water","quantity":6,"unit":"liters"}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 6.0);
        assert!(!item.marked_as_enough);
        assert_eq!(item.expiration_date, None);
    }
}
