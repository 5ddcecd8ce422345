//! Food is judged both by unit counts and by calories.

use crate::calculation::context::CategoryCalculationContext;
use crate::calculation::default;
use crate::calculation::results::{
    ActualQuantity, ItemCalculationResult, ShortageCalculationResult,
};
use crate::models::{InventoryItem, RecommendedItemDefinition};

/// Kilocalories the household needs for the supply period.
pub fn total_needed_calories(ctx: &CategoryCalculationContext<'_>) -> f64 {
    ctx.options.daily_calories_per_person * ctx.people_multiplier * ctx.supply_days()
}

/// Units plus calories of the items matching `rec`.
pub fn calculate_actual_quantity(
    matching_items: &[&InventoryItem],
    rec: &RecommendedItemDefinition,
) -> ActualQuantity {
    let mut actual = default::calculate_actual_quantity(matching_items);
    actual.calories = sum_calories(matching_items.iter().map(|item| (*item, Some(rec))));
    actual
}

/// Calories of every food item in the category, matched to a
/// recommendation or not.
pub fn category_calories(ctx: &CategoryCalculationContext<'_>) -> Option<f64> {
    sum_calories(
        ctx.category_items
            .iter()
            .map(|item| (*item, ctx.template_for(item))),
    )
}

fn sum_calories<'a, I>(items: I) -> Option<f64>
where
    I: Iterator<Item = (&'a InventoryItem, Option<&'a RecommendedItemDefinition>)>,
{
    items
        .filter_map(|(item, rec)| {
            item.resolved_calories_per_unit(rec)
                .map(|per_unit| item.quantity * per_unit)
        })
        .fold(None, |total, calories| Some(total.unwrap_or(0.0) + calories))
}

/// Whether any part of the category carries calorie data.
fn tracks_calories(
    results: &[ItemCalculationResult<'_>],
    ctx: &CategoryCalculationContext<'_>,
) -> bool {
    results.iter().any(|r| r.rec_item.has_calorie_data())
        || ctx
            .category_items
            .iter()
            .any(|item| item.resolved_calories_per_unit(ctx.template_for(item)).is_some())
}

pub fn aggregate_totals(
    results: &[ItemCalculationResult<'_>],
    ctx: &CategoryCalculationContext<'_>,
) -> ShortageCalculationResult {
    let mut result = default::aggregate_totals(results);
    if tracks_calories(results, ctx) {
        let actual = category_calories(ctx).unwrap_or(0.0);
        let needed = total_needed_calories(ctx);
        result.total_actual_calories = Some(actual);
        result.total_needed_calories = Some(needed);
        result.missing_calories = Some((needed - actual).max(0.0));
    }
    result
}

/// Short when either the unit total or the calorie total falls short.
pub fn has_enough_inventory(result: &ShortageCalculationResult) -> bool {
    let calories_ok = match (result.total_actual_calories, result.total_needed_calories) {
        (Some(actual), Some(needed)) => actual >= needed,
        _ => true,
    };
    default::has_enough_inventory(result) && calories_ok
}
