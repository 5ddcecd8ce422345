use tracing::debug;

use crate::calculation::constants::CRITICALLY_LOW_STOCK_PERCENTAGE;
use crate::calculation::context::{CalculationInputs, CategoryCalculationContext};
use crate::calculation::results::{ItemCalculationResult, ShortageCalculationResult};
use crate::calculation::strategy::CategoryStrategy;

/// Overall state of a category, for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStatus {
    Ok,
    Warning,
    Critical,
    /// Nothing is recommended for this category.
    NotApplicable,
}

/// Full calculation output for one category.
#[derive(Debug, Clone)]
pub struct CategoryReport<'a> {
    pub category_id: &'a str,
    pub strategy: CategoryStrategy,
    pub items: Vec<ItemCalculationResult<'a>>,
    pub result: ShortageCalculationResult,
    pub has_enough: bool,
}

impl CategoryReport<'_> {
    pub fn status(&self) -> CategoryStatus {
        let Some(percentage) = self.result.percentage() else {
            return CategoryStatus::NotApplicable;
        };
        // Marked-as-enough rows leave no shortages even when totals fall short.
        if self.has_enough || (self.result.shortages.is_empty() && self.calories_ok()) {
            CategoryStatus::Ok
        } else if percentage < CRITICALLY_LOW_STOCK_PERCENTAGE {
            CategoryStatus::Critical
        } else {
            CategoryStatus::Warning
        }
    }

    fn calories_ok(&self) -> bool {
        self.result.missing_calories.is_none_or(|missing| missing <= 0.0)
    }
}

/// Run the registered strategy for `category_id` end to end.
pub fn calculate_category<'a>(
    category_id: &'a str,
    inputs: &CalculationInputs<'a>,
) -> CategoryReport<'a> {
    let ctx = CategoryCalculationContext::new(category_id, inputs);
    let strategy = CategoryStrategy::for_category(category_id);
    let items = strategy.calculate_items(&ctx);
    let result = strategy.aggregate_totals(&items, &ctx);
    let has_enough = strategy.has_enough_inventory(&result);

    debug!(
        category = category_id,
        strategy = strategy.strategy_id(),
        total_needed = result.total_needed,
        total_actual = result.total_actual,
        shortages = result.shortages.len(),
        "calculated category"
    );

    CategoryReport {
        category_id,
        strategy,
        items,
        result,
        has_enough,
    }
}
