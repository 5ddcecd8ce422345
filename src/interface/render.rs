use chrono::NaiveDate;

use crate::calculation::{CalculationOptions, CategoryReport, CategoryStatus};
use crate::models::{Alert, Category, HouseholdConfig, InventoryItem, Kit};
use crate::state::ImportSummary;

/// Display dashboard alerts, most severe first.
pub fn display_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts. Your supplies look good.");
        return;
    }

    println!();
    println!("=== Alerts ({}) ===", alerts.len());
    println!();
    for alert in alerts {
        println!("  [{:<8}] {}", alert.alert_type.label(), alert.message);
        println!("             id: {}", alert.id);
    }
    println!();
}

fn status_label(status: CategoryStatus) -> &'static str {
    match status {
        CategoryStatus::Ok => "ok",
        CategoryStatus::Warning => "low",
        CategoryStatus::Critical => "critical",
        CategoryStatus::NotApplicable => "-",
    }
}

/// One line per category with its completion percentage.
pub fn display_category_summary(reports: &[(&Category, CategoryReport<'_>)]) {
    println!();
    println!("=== Categories ===");
    println!();

    let max_name_len = reports
        .iter()
        .map(|(c, _)| c.name.chars().count())
        .max()
        .unwrap_or(10);

    for (category, report) in reports {
        let percentage = report
            .result
            .percentage()
            .map(|p| format!("{:>3.0}%", p))
            .unwrap_or_else(|| "   -".to_string());
        println!(
            "  {:<width$}  {}  {:<8}  {} shortage(s)",
            category.name,
            percentage,
            status_label(report.status()),
            report.result.shortages.len(),
            width = max_name_len
        );
    }
    println!();
}

/// Detailed rows for one category.
pub fn display_category_report(category: &Category, report: &CategoryReport<'_>) {
    println!();
    println!(
        "=== {} ({} strategy) ===",
        category.name,
        report.strategy.strategy_id()
    );
    println!();

    if report.items.is_empty() {
        println!("  No active recommendations.");
    }

    for row in &report.items {
        let marker = if row.has_marked_as_enough {
            " [marked enough]"
        } else if row.is_short() {
            " [short]"
        } else {
            ""
        };
        println!(
            "  {:<28} {:>7.1} / {:>4} {}{}",
            row.rec_item.name, row.actual_qty, row.recommended_qty, row.unit, marker
        );
    }

    let result = &report.result;
    println!();
    match result.primary_unit {
        Some(unit) => println!(
            "  Total: {:.1} of {:.0} {}",
            result.total_actual, result.total_needed, unit
        ),
        None => println!(
            "  Total: {:.1} of {:.0} units",
            result.total_actual, result.total_needed
        ),
    }
    if let (Some(drinking), Some(preparation)) =
        (result.drinking_water_needed, result.preparation_water_needed)
    {
        println!(
            "  Water: {:.1} L drinking + {:.1} L food preparation",
            drinking, preparation
        );
    }
    if let (Some(actual), Some(needed)) =
        (result.total_actual_calories, result.total_needed_calories)
    {
        println!("  Calories: {:.0} of {:.0} kcal", actual, needed);
    }
    println!("  Enough: {}", if report.has_enough { "yes" } else { "no" });
    println!();
}

/// List inventory items, optionally with days to expiry.
pub fn display_inventory(items: &[&InventoryItem], today: NaiveDate) {
    if items.is_empty() {
        println!("Inventory: (none)");
        return;
    }

    println!();
    println!("=== Inventory ({} items) ===", items.len());
    println!();

    for item in items {
        let expiry = match item.days_until_expiration(today) {
            Some(days) if days < 0 => format!(", expired {} days ago", -days),
            Some(days) => format!(", expires in {} days", days),
            None => String::new(),
        };
        let enough = if item.marked_as_enough { " [enough]" } else { "" };
        println!(
            "  {}  {} - {} {} ({}){}{}",
            item.id, item.name, item.quantity, item.unit, item.category_id, expiry, enough
        );
    }
    println!();
}

pub fn display_household(household: &HouseholdConfig, options: &CalculationOptions) {
    println!();
    println!("=== Household ===");
    println!("  Adults:          {}", household.adults);
    println!("  Children:        {}", household.children);
    println!("  Pets:            {}", household.pets);
    println!("  Supply duration: {} days", household.supply_duration_days);
    println!("  Freezer:         {}", if household.use_freezer { "yes" } else { "no" });
    if let Some(hours) = household.freezer_hold_time_hours {
        println!("  Freezer holds:   {} h", hours);
    }
    println!(
        "  People multiplier: {:.2}",
        household.people_multiplier(options.children_multiplier)
    );
    println!();
}

pub fn display_kits(kits: &[Kit], active_id: &str) {
    println!();
    println!("=== Kits ===");
    for kit in kits {
        let marker = if kit.id == active_id { "*" } else { " " };
        println!("  {} {} - {} ({} items)", marker, kit.id, kit.name, kit.items.len());
    }
    println!();
}

pub fn display_categories(categories: &[Category]) {
    println!();
    println!("=== Categories ===");
    for category in categories {
        let icon = category.icon.as_deref().unwrap_or(" ");
        let custom = if category.is_custom { " (custom)" } else { "" };
        println!("  {} {} - {}{}", icon, category.id, category.name, custom);
    }
    println!();
}

pub fn display_import_summary(summary: &ImportSummary) {
    println!("Import complete:");
    if summary.household_replaced {
        println!("  household replaced");
    }
    if summary.settings_replaced {
        println!("  settings replaced");
    }
    println!(
        "  items: {} added, {} updated, {} skipped",
        summary.items_added, summary.items_updated, summary.items_skipped
    );
    println!("  categories merged: {}", summary.categories_merged);
    println!(
        "  kits: {} merged, {} skipped",
        summary.kits_merged, summary.kits_skipped
    );
    println!(
        "  newly disabled recommendations: {}, newly dismissed alerts: {}",
        summary.recommendations_disabled, summary.alerts_dismissed
    );
}
