//! Generic unit-based calculation shared by every category.

use crate::calculation::constants::QUANTITY_ULP_TOLERANCE;
use crate::calculation::context::CategoryCalculationContext;
use crate::calculation::results::{
    ActualQuantity, CategoryShortage, ItemCalculationResult, ShortageCalculationResult,
};
use crate::models::{InventoryItem, RecommendedItemDefinition, Unit};

/// Round a real-valued need up to whole units.
///
/// Non-finite and non-positive needs become 0. A need within
/// [`QUANTITY_ULP_TOLERANCE`] ULPs of a whole number snaps to it; any real
/// fraction rounds up.
pub fn ceil_quantity(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let nearest = raw.round();
    if (raw - nearest).abs() <= nearest * QUANTITY_ULP_TOLERANCE * f64::EPSILON {
        return nearest as u32;
    }
    raw.ceil() as u32
}

/// Base quantity with the recommendation's people/day/pet scaling applied.
pub fn raw_need(rec: &RecommendedItemDefinition, ctx: &CategoryCalculationContext<'_>) -> f64 {
    let mut quantity = rec.base_quantity;
    if rec.scale_with_people {
        quantity *= ctx.people_multiplier;
    }
    if rec.scale_with_days {
        quantity *= ctx.supply_days();
    }
    if rec.scale_with_pets {
        quantity *= ctx.household.pets as f64;
    }
    quantity
}

pub fn calculate_recommended_quantity(
    rec: &RecommendedItemDefinition,
    ctx: &CategoryCalculationContext<'_>,
) -> u32 {
    if !ctx.is_active(rec) {
        return 0;
    }
    ceil_quantity(raw_need(rec, ctx))
}

pub fn calculate_actual_quantity(matching_items: &[&InventoryItem]) -> ActualQuantity {
    ActualQuantity {
        quantity: matching_items.iter().map(|item| item.quantity).sum(),
        calories: None,
    }
}

/// Sum the rows and list every unmet, non-overridden row as a shortage.
pub fn aggregate_totals(results: &[ItemCalculationResult<'_>]) -> ShortageCalculationResult {
    let total_needed = results.iter().map(|r| r.recommended_qty as f64).sum();
    let total_actual = results.iter().map(|r| r.actual_qty).sum();

    let shortages = results
        .iter()
        .filter(|r| r.is_short() && !r.has_marked_as_enough)
        .map(CategoryShortage::from_result)
        .collect();

    ShortageCalculationResult {
        shortages,
        total_actual,
        total_needed,
        primary_unit: shared_unit(results),
        ..Default::default()
    }
}

/// A zero-need category is not applicable rather than satisfied.
pub fn has_enough_inventory(result: &ShortageCalculationResult) -> bool {
    result.total_needed > 0.0 && result.total_actual >= result.total_needed
}

/// The unit every row shares, if they share one.
fn shared_unit(results: &[ItemCalculationResult<'_>]) -> Option<Unit> {
    let first = results.first()?.unit;
    results.iter().all(|r| r.unit == first).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_quantity() {
        assert_eq!(ceil_quantity(5.5), 6);
        assert_eq!(ceil_quantity(6.0), 6);
        assert_eq!(ceil_quantity(0.01), 1);
        assert_eq!(ceil_quantity(0.0), 0);
        assert_eq!(ceil_quantity(-3.0), 0);
        assert_eq!(ceil_quantity(f64::NAN), 0);
        // 0.1 * 3 carries float noise above 0.3
        assert_eq!(ceil_quantity(0.1 * 3.0 * 10.0), 3);
        assert_eq!(ceil_quantity(1.1 * 3.0), 4);
    }

    #[test]
    fn test_ceil_quantity_keeps_small_real_fractions() {
        assert_eq!(ceil_quantity(5.000_000_000_5), 6);
        assert_eq!(ceil_quantity(1e-12), 1);
        assert_eq!(ceil_quantity(24.75), 25);
    }
}
