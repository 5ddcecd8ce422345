use std::fmt;

use crate::calculation::constants::{FOOD_CATEGORY_ID, WATER_CATEGORY_ID};
use crate::calculation::context::CategoryCalculationContext;
use crate::calculation::results::{
    ActualQuantity, ItemCalculationResult, ShortageCalculationResult,
};
use crate::calculation::{default, food, water};
use crate::models::{InventoryItem, RecommendedItemDefinition};

/// Shortage calculation rules for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryStrategy {
    Water,
    Food,
    Default,
}

/// Specialised strategies in selection order. The first one whose
/// `can_handle` accepts a category wins, so if two ever claim the same
/// category the earlier entry takes it. Unclaimed categories fall through
/// to [`CategoryStrategy::Default`].
pub const SPECIALIZED_STRATEGIES: [CategoryStrategy; 2] =
    [CategoryStrategy::Water, CategoryStrategy::Food];

impl CategoryStrategy {
    /// Registry lookup.
    pub fn for_category(category_id: &str) -> Self {
        SPECIALIZED_STRATEGIES
            .into_iter()
            .find(|strategy| strategy.can_handle(category_id))
            .unwrap_or(CategoryStrategy::Default)
    }

    pub fn strategy_id(self) -> &'static str {
        match self {
            CategoryStrategy::Water => "water",
            CategoryStrategy::Food => "food",
            CategoryStrategy::Default => "default",
        }
    }

    pub fn can_handle(self, category_id: &str) -> bool {
        match self {
            CategoryStrategy::Water => category_id == WATER_CATEGORY_ID,
            CategoryStrategy::Food => category_id == FOOD_CATEGORY_ID,
            CategoryStrategy::Default => true,
        }
    }

    pub fn calculate_recommended_quantity(
        self,
        rec: &RecommendedItemDefinition,
        ctx: &CategoryCalculationContext<'_>,
    ) -> u32 {
        match self {
            CategoryStrategy::Water => water::calculate_recommended_quantity(rec, ctx),
            CategoryStrategy::Food | CategoryStrategy::Default => {
                default::calculate_recommended_quantity(rec, ctx)
            }
        }
    }

    pub fn calculate_actual_quantity(
        self,
        matching_items: &[&InventoryItem],
        rec: &RecommendedItemDefinition,
    ) -> ActualQuantity {
        match self {
            CategoryStrategy::Food => food::calculate_actual_quantity(matching_items, rec),
            CategoryStrategy::Water | CategoryStrategy::Default => {
                default::calculate_actual_quantity(matching_items)
            }
        }
    }

    /// One row for `rec`.
    pub fn calculate_item<'a>(
        self,
        rec: &'a RecommendedItemDefinition,
        ctx: &CategoryCalculationContext<'a>,
    ) -> ItemCalculationResult<'a> {
        let matching_items = ctx.matching_items(rec);
        let actual = self.calculate_actual_quantity(&matching_items, rec);
        let has_marked_as_enough = matching_items.iter().any(|item| item.marked_as_enough);

        ItemCalculationResult {
            rec_item: rec,
            recommended_qty: self.calculate_recommended_quantity(rec, ctx),
            actual_qty: actual.quantity,
            matching_items,
            has_marked_as_enough,
            unit: rec.unit,
            actual_calories: actual.calories,
        }
    }

    /// Rows for every active recommendation in the context's category.
    /// Disabled and inapplicable recommendations produce no row.
    pub fn calculate_items<'a>(
        self,
        ctx: &CategoryCalculationContext<'a>,
    ) -> Vec<ItemCalculationResult<'a>> {
        ctx.recommended_items
            .iter()
            .copied()
            .filter(|rec| ctx.is_active(rec))
            .map(|rec| self.calculate_item(rec, ctx))
            .collect()
    }

    pub fn aggregate_totals(
        self,
        results: &[ItemCalculationResult<'_>],
        ctx: &CategoryCalculationContext<'_>,
    ) -> ShortageCalculationResult {
        match self {
            CategoryStrategy::Water => water::aggregate_totals(results, ctx),
            CategoryStrategy::Food => food::aggregate_totals(results, ctx),
            CategoryStrategy::Default => default::aggregate_totals(results),
        }
    }

    pub fn has_enough_inventory(self, result: &ShortageCalculationResult) -> bool {
        match self {
            CategoryStrategy::Food => food::has_enough_inventory(result),
            CategoryStrategy::Water | CategoryStrategy::Default => {
                default::has_enough_inventory(result)
            }
        }
    }
}

impl fmt::Display for CategoryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy_id())
    }
}
