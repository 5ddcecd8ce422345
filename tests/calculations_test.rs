use std::collections::BTreeSet;

use assert_float_eq::assert_f64_near;

use supply_tracker_rs::calculation::{
    calculate_category, CalculationInputs, CalculationOptions, CategoryStatus, CategoryStrategy,
};
use supply_tracker_rs::models::{
    HouseholdConfig, InventoryItem, RecommendedItemDefinition, Unit, CUSTOM_ITEM_TYPE,
};

fn household(adults: u32, children: u32, days: u32) -> HouseholdConfig {
    HouseholdConfig {
        adults,
        children,
        pets: 0,
        supply_duration_days: days,
        use_freezer: false,
        freezer_hold_time_hours: None,
    }
}

fn bottled_water() -> RecommendedItemDefinition {
    RecommendedItemDefinition::new("bottled-water", "Bottled water", "water-beverages", Unit::Liters, 3.0)
        .with_people_scaling()
        .with_day_scaling()
}

fn candles() -> RecommendedItemDefinition {
    RecommendedItemDefinition::new("candles", "Candles", "light-power", Unit::Pieces, 10.0)
}

fn inputs<'a>(
    items: &'a [InventoryItem],
    recommended: &'a [RecommendedItemDefinition],
    household: &'a HouseholdConfig,
    disabled: &'a BTreeSet<String>,
    options: &'a CalculationOptions,
) -> CalculationInputs<'a> {
    CalculationInputs {
        items,
        recommended_items: recommended,
        household,
        disabled_recommended_items: disabled,
        options,
    }
}

#[test]
fn test_drinking_water_rounds_up() {
    let household = household(2, 1, 3);
    let recommended = vec![bottled_water()];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&[], &recommended, &household, &disabled, &options);

    let report = calculate_category("water-beverages", &inputs);

    assert_eq!(report.strategy, CategoryStrategy::Water);
    assert_eq!(report.items[0].recommended_qty, 25);
    assert_f64_near!(report.result.drinking_water_needed.unwrap(), 24.75);
    assert_f64_near!(report.result.preparation_water_needed.unwrap(), 0.0);
    assert!(!report.has_enough);
}

#[test]
fn test_food_preparation_water_adds_to_need() {
    let household = household(2, 1, 3);
    let recommended = vec![bottled_water()];
    let items = vec![
        InventoryItem::new("p1", "Pasta", "food", "pasta", 5.0, Unit::Packages)
            .with_water_requirement(0.5),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&items, &recommended, &household, &disabled, &options);

    let report = calculate_category("water-beverages", &inputs);

    assert_f64_near!(report.result.preparation_water_needed.unwrap(), 2.5);
    assert_eq!(report.items[0].recommended_qty, 28);
}

#[test]
fn test_other_beverages_follow_generic_rules() {
    let household = household(2, 1, 3);
    let recommended = vec![
        RecommendedItemDefinition::new("bottled-water", "Bottled water", "water-beverages", Unit::Liters, 100.0)
            .with_people_scaling()
            .with_day_scaling(),
        RecommendedItemDefinition::new("long-life-milk", "Long-life milk", "water-beverages", Unit::Liters, 0.5)
            .with_people_scaling(),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&[], &recommended, &household, &disabled, &options);

    let report = calculate_category("water-beverages", &inputs);

    // Bottled water is driven by drinking need, not its base quantity
    assert_eq!(report.items[0].recommended_qty, 25);
    // 0.5 * 2.75 = 1.375
    assert_eq!(report.items[1].rec_item.id, "long-life-milk");
    assert_eq!(report.items[1].recommended_qty, 2);
    assert_f64_near!(report.result.total_needed, 27.0);
}

#[test]
fn test_preparation_water_falls_back_to_template() {
    let household = household(2, 1, 3);
    let recommended = vec![
        bottled_water(),
        RecommendedItemDefinition::new("pasta", "Pasta", "food", Unit::Packages, 1.0)
            .with_water_requirement(0.5),
    ];
    let items = vec![InventoryItem::new("p1", "Pasta", "food", "pasta", 5.0, Unit::Packages)];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&items, &recommended, &household, &disabled, &options);

    let report = calculate_category("water-beverages", &inputs);

    assert_f64_near!(report.result.preparation_water_needed.unwrap(), 2.5);
    assert_eq!(report.items[0].recommended_qty, 28);
}

#[test]
fn test_generic_item_scales_with_people() {
    let household = household(2, 1, 3);
    let recommended = vec![
        RecommendedItemDefinition::new("masks", "Face masks", "medical-health", Unit::Pieces, 2.0)
            .with_people_scaling(),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&[], &recommended, &household, &disabled, &options);

    let report = calculate_category("medical-health", &inputs);

    assert_eq!(report.strategy, CategoryStrategy::Default);
    assert_eq!(report.items[0].recommended_qty, 6);
    assert_eq!(report.result.shortages.len(), 1);
    assert_f64_near!(report.result.shortages[0].missing, 6.0);
}

#[test]
fn test_zero_need_is_not_enough() {
    let household = household(2, 0, 3);
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&[], &[], &household, &disabled, &options);

    let report = calculate_category("cash-documents", &inputs);

    assert!(report.items.is_empty());
    assert!(!report.has_enough);
    assert_eq!(report.result.percentage(), None);
    assert_eq!(report.status(), CategoryStatus::NotApplicable);
}

#[test]
fn test_marked_as_enough_suppresses_shortage() {
    let household = household(2, 0, 3);
    let recommended = vec![candles()];
    let items = vec![
        InventoryItem::new("c1", "Candles", "light-power", "candles", 2.0, Unit::Pieces)
            .marked_enough(),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&items, &recommended, &household, &disabled, &options);

    let report = calculate_category("light-power", &inputs);

    assert!(report.items[0].has_marked_as_enough);
    assert!(report.result.shortages.is_empty());
    // Totals stay raw
    assert_f64_near!(report.result.total_actual, 2.0);
    assert_f64_near!(report.result.total_needed, 10.0);
    assert_eq!(report.status(), CategoryStatus::Ok);
}

#[test]
fn test_actual_quantity_sums_matching_items() {
    let household = household(1, 0, 3);
    let recommended = vec![candles()];
    let items = vec![
        InventoryItem::new("c1", "Candles", "light-power", "candles", 3.0, Unit::Pieces),
        InventoryItem::new("c2", "Tea lights", "light-power", CUSTOM_ITEM_TYPE, 4.5, Unit::Pieces)
            .satisfying("candles"),
        InventoryItem::new("c3", "Lantern", "light-power", CUSTOM_ITEM_TYPE, 1.0, Unit::Pieces),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&items, &recommended, &household, &disabled, &options);

    let report = calculate_category("light-power", &inputs);

    assert_eq!(report.items[0].matching_items.len(), 2);
    assert_f64_near!(report.items[0].actual_qty, 7.5);
    assert_f64_near!(report.result.total_actual, 7.5);
    assert_eq!(report.result.primary_unit, Some(Unit::Pieces));
    assert_eq!(report.status(), CategoryStatus::Warning);
}

#[test]
fn test_food_is_short_on_calories() {
    let household = household(2, 0, 3);
    let recommended = vec![
        RecommendedItemDefinition::new("canned-soup", "Canned soup", "food", Unit::Cans, 1.0)
            .with_people_scaling()
            .with_day_scaling()
            .with_calories_per_unit(400.0),
    ];
    let items = vec![
        InventoryItem::new("s1", "Soup", "food", "canned-soup", 10.0, Unit::Cans),
        InventoryItem::new("k1", "Crackers", "food", CUSTOM_ITEM_TYPE, 2.0, Unit::Packages)
            .with_calories_per_unit(500.0),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&items, &recommended, &household, &disabled, &options);

    let report = calculate_category("food", &inputs);

    assert_eq!(report.strategy, CategoryStrategy::Food);
    assert_eq!(report.items[0].recommended_qty, 6);
    assert!(report.result.shortages.is_empty());
    assert_f64_near!(report.result.total_needed_calories.unwrap(), 12000.0);
    assert_f64_near!(report.result.total_actual_calories.unwrap(), 5000.0);
    assert_f64_near!(report.result.missing_calories.unwrap(), 7000.0);
    assert!(!report.has_enough);
    assert_eq!(report.status(), CategoryStatus::Warning);
}

#[test]
fn test_custom_children_multiplier() {
    let household = household(2, 2, 1);
    let recommended = vec![bottled_water()];
    let disabled = BTreeSet::new();
    let options = CalculationOptions {
        children_multiplier: 0.5,
        ..CalculationOptions::default()
    };
    let inputs = inputs(&[], &recommended, &household, &disabled, &options);

    let report = calculate_category("water-beverages", &inputs);

    assert_f64_near!(report.result.drinking_water_needed.unwrap(), 9.0);
    assert_eq!(report.items[0].recommended_qty, 9);
}

#[test]
fn test_disabled_recommendation_is_skipped() {
    let household = household(2, 0, 3);
    let recommended = vec![
        candles(),
        RecommendedItemDefinition::new("flashlight", "Flashlight", "light-power", Unit::Pieces, 2.0),
    ];
    let disabled: BTreeSet<String> = ["candles".to_string()].into_iter().collect();
    let options = CalculationOptions::default();
    let inputs = inputs(&[], &recommended, &household, &disabled, &options);

    let report = calculate_category("light-power", &inputs);

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].rec_item.id, "flashlight");
    assert_f64_near!(report.result.total_needed, 2.0);
}

#[test]
fn test_freezer_items_need_a_freezer() {
    let recommended = vec![
        RecommendedItemDefinition::new("frozen-meals", "Frozen meals", "food", Unit::Pieces, 1.0)
            .requiring_freezer(),
    ];
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();

    let without = household(2, 0, 3);
    let report = calculate_category("food", &inputs(&[], &recommended, &without, &disabled, &options));
    assert!(report.items.is_empty());

    let with = HouseholdConfig {
        use_freezer: true,
        ..household(2, 0, 3)
    };
    let report = calculate_category("food", &inputs(&[], &recommended, &with, &disabled, &options));
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].recommended_qty, 1);
}

#[test]
fn test_pet_items_scale_with_pets() {
    let recommended = vec![
        RecommendedItemDefinition::new("pet-food", "Pet food", "pets", Unit::Cans, 1.0)
            .with_pet_scaling()
            .with_day_scaling(),
    ];
    let household = HouseholdConfig {
        pets: 2,
        ..household(1, 0, 3)
    };
    let disabled = BTreeSet::new();
    let options = CalculationOptions::default();
    let inputs = inputs(&[], &recommended, &household, &disabled, &options);

    let report = calculate_category("pets", &inputs);

    assert_eq!(report.items[0].recommended_qty, 6);
}
