use serde::Serialize;

use crate::models::{InventoryItem, RecommendedItemDefinition, Unit};

/// Stocked amount counted toward one recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActualQuantity {
    pub quantity: f64,
    /// Present only when at least one matching item carries calorie data.
    pub calories: Option<f64>,
}

/// One row per active recommendation.
#[derive(Debug, Clone)]
pub struct ItemCalculationResult<'a> {
    pub rec_item: &'a RecommendedItemDefinition,
    /// Whole units, rounded up from the real-valued need.
    pub recommended_qty: u32,
    pub actual_qty: f64,
    pub matching_items: Vec<&'a InventoryItem>,
    pub has_marked_as_enough: bool,
    pub unit: Unit,
    pub actual_calories: Option<f64>,
}

impl ItemCalculationResult<'_> {
    #[inline]
    pub fn is_short(&self) -> bool {
        self.actual_qty < self.recommended_qty as f64
    }
}

/// Gap between recommended and stocked amount for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShortage {
    pub item_id: String,
    pub item_name: String,
    pub actual: f64,
    pub needed: f64,
    pub unit: Unit,
    pub missing: f64,
}

impl CategoryShortage {
    pub fn from_result(result: &ItemCalculationResult<'_>) -> Self {
        let needed = result.recommended_qty as f64;
        Self {
            item_id: result.rec_item.id.clone(),
            item_name: result.rec_item.name.clone(),
            actual: result.actual_qty,
            needed,
            unit: result.unit,
            missing: (needed - result.actual_qty).max(0.0),
        }
    }

    /// Stocked share of the need, 0-100.
    pub fn percentage(&self) -> f64 {
        if self.needed > 0.0 {
            (self.actual / self.needed * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        }
    }
}

/// Category-level aggregate of the item rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortageCalculationResult {
    pub shortages: Vec<CategoryShortage>,
    pub total_actual: f64,
    pub total_needed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_actual_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_needed_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drinking_water_needed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_water_needed: Option<f64>,
}

impl ShortageCalculationResult {
    /// Stocked share of the category total, or `None` when nothing is needed.
    pub fn percentage(&self) -> Option<f64> {
        if self.total_needed > 0.0 {
            Some((self.total_actual / self.total_needed * 100.0).min(100.0))
        } else {
            None
        }
    }
}
