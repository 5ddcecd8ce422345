use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::calculation::constants::*;
use crate::error::{Result, SupplyError};
use crate::models::validation::{check_float_range, check_positive, join_violations};
use crate::models::{HouseholdConfig, InventoryItem, RecommendedItemDefinition};

/// Tunable per-person rates used by the strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationOptions {
    pub children_multiplier: f64,
    pub daily_calories_per_person: f64,
    pub daily_water_per_person: f64,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            children_multiplier: DEFAULT_CHILDREN_MULTIPLIER,
            daily_calories_per_person: DEFAULT_DAILY_CALORIES_PER_PERSON,
            daily_water_per_person: DEFAULT_DAILY_WATER_PER_PERSON,
        }
    }
}

impl CalculationOptions {
    /// Reject rates the strategies cannot use: non-finite values, a
    /// negative child multiplier, or daily rates that are not positive.
    pub fn validated(self) -> Result<Self> {
        let mut violations = Vec::new();
        check_float_range(
            &mut violations,
            "childrenMultiplier",
            self.children_multiplier,
            0.0,
            MAX_CHILDREN_MULTIPLIER,
        );
        check_positive(
            &mut violations,
            "dailyCaloriesPerPerson",
            self.daily_calories_per_person,
            MAX_DAILY_CALORIES_PER_PERSON,
        );
        check_positive(
            &mut violations,
            "dailyWaterPerPerson",
            self.daily_water_per_person,
            MAX_DAILY_WATER_PER_PERSON,
        );

        if violations.is_empty() {
            Ok(self)
        } else {
            Err(SupplyError::InvalidInput(format!(
                "calculation settings: {}",
                join_violations(&violations)
            )))
        }
    }
}

/// Everything a calculation run reads, across all categories.
#[derive(Debug, Clone, Copy)]
pub struct CalculationInputs<'a> {
    pub items: &'a [InventoryItem],
    pub recommended_items: &'a [RecommendedItemDefinition],
    pub household: &'a HouseholdConfig,
    pub disabled_recommended_items: &'a BTreeSet<String>,
    pub options: &'a CalculationOptions,
}

/// Read-only view of the inputs for one category.
#[derive(Debug, Clone)]
pub struct CategoryCalculationContext<'a> {
    pub category_id: &'a str,
    /// Full inventory, for cross-category effects such as food needing water.
    pub items: &'a [InventoryItem],
    pub category_items: Vec<&'a InventoryItem>,
    /// Full catalog, for resolving item templates outside this category.
    pub all_recommended_items: &'a [RecommendedItemDefinition],
    pub recommended_items: Vec<&'a RecommendedItemDefinition>,
    pub household: &'a HouseholdConfig,
    pub disabled_recommended_items: &'a BTreeSet<String>,
    pub options: &'a CalculationOptions,
    pub people_multiplier: f64,
}

impl<'a> CategoryCalculationContext<'a> {
    pub fn new(category_id: &'a str, inputs: &CalculationInputs<'a>) -> Self {
        let category_items = inputs
            .items
            .iter()
            .filter(|item| item.category_id == category_id)
            .collect();
        let recommended_items = inputs
            .recommended_items
            .iter()
            .filter(|rec| rec.category == category_id)
            .collect();

        Self {
            category_id,
            items: inputs.items,
            category_items,
            all_recommended_items: inputs.recommended_items,
            recommended_items,
            household: inputs.household,
            disabled_recommended_items: inputs.disabled_recommended_items,
            options: inputs.options,
            people_multiplier: inputs
                .household
                .people_multiplier(inputs.options.children_multiplier),
        }
    }

    pub fn is_disabled(&self, rec: &RecommendedItemDefinition) -> bool {
        self.disabled_recommended_items.contains(&rec.id)
    }

    /// Whether `rec` takes part in the calculation at all: not disabled by
    /// the user, and not a freezer item in a household without a freezer.
    pub fn is_active(&self, rec: &RecommendedItemDefinition) -> bool {
        !self.is_disabled(rec) && (!rec.requires_freezer || self.household.use_freezer)
    }

    /// Items in this category that count toward `rec`.
    pub fn matching_items(&self, rec: &RecommendedItemDefinition) -> Vec<&'a InventoryItem> {
        self.category_items
            .iter()
            .copied()
            .filter(|item| item.matches_recommendation(rec))
            .collect()
    }

    /// Template for an inventory item of any category, if it has one.
    pub fn template_for(&self, item: &InventoryItem) -> Option<&'a RecommendedItemDefinition> {
        let id = if item.is_custom() {
            item.satisfies_recommendation.as_deref()?
        } else {
            item.item_type.as_str()
        };
        self.all_recommended_items.iter().find(|rec| rec.id == id)
    }

    #[inline]
    pub fn supply_days(&self) -> f64 {
        self.household.supply_duration_days as f64
    }
}
