use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::validation::{
    check_float_range, check_not_blank, join_violations, FieldViolation,
};
use crate::models::{Category, Unit};

/// Upper bound on a template's base quantity; anything above is a typo.
pub const MAX_BASE_QUANTITY: f64 = 10_000.0;

/// A catalog entry describing how much of a supply type a household should stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedItemDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: Unit,
    pub base_quantity: f64,
    #[serde(default)]
    pub scale_with_people: bool,
    #[serde(default)]
    pub scale_with_days: bool,
    #[serde(default)]
    pub scale_with_pets: bool,
    #[serde(default)]
    pub requires_freezer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_grams_per_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_water_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expiration_months: Option<u32>,
}

impl RecommendedItemDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: Unit,
        base_quantity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit,
            base_quantity,
            scale_with_people: false,
            scale_with_days: false,
            scale_with_pets: false,
            requires_freezer: false,
            calories_per_unit: None,
            calories_per_100g: None,
            weight_grams_per_unit: None,
            requires_water_liters: None,
            default_expiration_months: None,
        }
    }

    pub fn with_people_scaling(mut self) -> Self {
        self.scale_with_people = true;
        self
    }

    pub fn with_day_scaling(mut self) -> Self {
        self.scale_with_days = true;
        self
    }

    pub fn with_pet_scaling(mut self) -> Self {
        self.scale_with_pets = true;
        self
    }

    pub fn requiring_freezer(mut self) -> Self {
        self.requires_freezer = true;
        self
    }

    pub fn with_calories_per_unit(mut self, calories: f64) -> Self {
        self.calories_per_unit = Some(calories);
        self
    }

    pub fn with_calories_per_100g(mut self, calories: f64, weight_grams_per_unit: f64) -> Self {
        self.calories_per_100g = Some(calories);
        self.weight_grams_per_unit = Some(weight_grams_per_unit);
        self
    }

    pub fn with_water_requirement(mut self, liters: f64) -> Self {
        self.requires_water_liters = Some(liters);
        self
    }

    pub fn with_expiration_months(mut self, months: u32) -> Self {
        self.default_expiration_months = Some(months);
        self
    }

    /// Calories in one unit, from the explicit figure or derived from
    /// per-100g density and unit weight.
    pub fn resolved_calories_per_unit(&self) -> Option<f64> {
        self.calories_per_unit.or_else(|| {
            match (self.calories_per_100g, self.weight_grams_per_unit) {
                (Some(per_100g), Some(grams)) => Some(per_100g * grams / 100.0),
                _ => None,
            }
        })
    }

    pub fn has_calorie_data(&self) -> bool {
        self.resolved_calories_per_unit().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid product template '{template_id}': {}", join_violations(.violations))]
pub struct ProductTemplateValidationError {
    pub template_id: String,
    pub violations: Vec<FieldViolation>,
}

impl ProductTemplateValidationError {
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Validates recommended-item definitions coming from kit files.
pub struct ProductTemplateFactory;

impl ProductTemplateFactory {
    pub fn create(
        template: RecommendedItemDefinition,
        categories: &[Category],
    ) -> std::result::Result<RecommendedItemDefinition, ProductTemplateValidationError> {
        let mut violations = Vec::new();

        check_not_blank(&mut violations, "id", &template.id);
        check_not_blank(&mut violations, "name", &template.name);
        if !categories.iter().any(|c| c.id == template.category) {
            violations.push(FieldViolation::new(
                "category",
                format!("must be a known category, got '{}'", template.category),
            ));
        }
        check_float_range(
            &mut violations,
            "baseQuantity",
            template.base_quantity,
            0.0,
            MAX_BASE_QUANTITY,
        );

        let optional_numbers = [
            ("caloriesPerUnit", template.calories_per_unit),
            ("caloriesPer100g", template.calories_per_100g),
            ("weightGramsPerUnit", template.weight_grams_per_unit),
            ("requiresWaterLiters", template.requires_water_liters),
        ];
        for (field, value) in optional_numbers {
            if let Some(value) = value {
                check_float_range(&mut violations, field, value, 0.0, f64::MAX);
            }
        }

        if violations.is_empty() {
            Ok(template)
        } else {
            Err(ProductTemplateValidationError {
                template_id: template.id,
                violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standard_categories;

    #[test]
    fn test_resolved_calories() {
        let explicit = RecommendedItemDefinition::new("soup", "Soup", "food", Unit::Cans, 1.0)
            .with_calories_per_unit(300.0);
        assert_eq!(explicit.resolved_calories_per_unit(), Some(300.0));

        let derived = RecommendedItemDefinition::new("rice", "Rice", "food", Unit::Kilograms, 1.0)
            .with_calories_per_100g(360.0, 1000.0);
        assert_eq!(derived.resolved_calories_per_unit(), Some(3600.0));

        let none = RecommendedItemDefinition::new("tape", "Tape", "tools-supplies", Unit::Rolls, 1.0);
        assert!(!none.has_calorie_data());
    }

    #[test]
    fn test_factory_accepts_valid_template() {
        let template = RecommendedItemDefinition::new("candles", "Candles", "light-power", Unit::Pieces, 10.0);
        assert!(ProductTemplateFactory::create(template, &standard_categories()).is_ok());
    }

    #[test]
    fn test_factory_rejects_bad_template() {
        let mut template = RecommendedItemDefinition::new("", "Thing", "nowhere", Unit::Pieces, -1.0);
        template.requires_water_liters = Some(f64::INFINITY);

        let err = ProductTemplateFactory::create(template, &standard_categories()).unwrap_err();
        assert!(err.has_field("id"));
        assert!(err.has_field("category"));
        assert!(err.has_field("baseQuantity"));
        assert!(err.has_field("requiresWaterLiters"));
        assert!(!err.has_field("name"));
        assert!(err.to_string().contains("baseQuantity must be at least 0"));
    }
}
