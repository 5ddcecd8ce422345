//! Water needs two demand sources: drinking water per person and water used
//! to prepare food. Both land on the bottled-water recommendation; the other
//! beverages follow the generic rules.

use crate::calculation::constants::BOTTLED_WATER_ID;
use crate::calculation::context::CategoryCalculationContext;
use crate::calculation::default::{self, ceil_quantity};
use crate::calculation::results::{ItemCalculationResult, ShortageCalculationResult};
use crate::models::RecommendedItemDefinition;

#[inline]
pub fn is_bottled_water(rec: &RecommendedItemDefinition) -> bool {
    rec.id == BOTTLED_WATER_ID
}

/// Liters of drinking water for the whole household and supply period.
pub fn drinking_water_needed(ctx: &CategoryCalculationContext<'_>) -> f64 {
    ctx.options.daily_water_per_person * ctx.people_multiplier * ctx.supply_days()
}

/// Liters needed to prepare every stocked item that declares a water
/// requirement, across the whole inventory.
///
/// Items without their own figure inherit their template's.
pub fn preparation_water_needed(ctx: &CategoryCalculationContext<'_>) -> f64 {
    ctx.items
        .iter()
        .filter_map(|item| {
            item.requires_water_liters
                .or_else(|| ctx.template_for(item).and_then(|rec| rec.requires_water_liters))
                .map(|liters| item.quantity * liters)
        })
        .sum()
}

pub fn calculate_recommended_quantity(
    rec: &RecommendedItemDefinition,
    ctx: &CategoryCalculationContext<'_>,
) -> u32 {
    if !is_bottled_water(rec) {
        return default::calculate_recommended_quantity(rec, ctx);
    }
    if !ctx.is_active(rec) {
        return 0;
    }
    ceil_quantity(drinking_water_needed(ctx) + preparation_water_needed(ctx))
}

/// Generic totals plus the drinking/preparation breakdown when bottled
/// water is part of the calculation.
pub fn aggregate_totals(
    results: &[ItemCalculationResult<'_>],
    ctx: &CategoryCalculationContext<'_>,
) -> ShortageCalculationResult {
    let mut result = default::aggregate_totals(results);
    if results.iter().any(|r| is_bottled_water(r.rec_item)) {
        result.drinking_water_needed = Some(drinking_water_needed(ctx));
        result.preparation_water_needed = Some(preparation_water_needed(ctx));
    }
    result
}
