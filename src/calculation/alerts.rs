use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::calculation::constants::*;
use crate::calculation::context::{CalculationInputs, CalculationOptions};
use crate::calculation::results::CategoryShortage;
use crate::calculation::shortage::calculate_category;
use crate::models::{
    Alert, AlertType, Category, HouseholdConfig, InventoryItem, RecommendedItemDefinition,
};

/// Turns a message key and named arguments into user-facing text.
pub trait Translator {
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTranslator;

impl EnglishTranslator {
    fn template(key: &str) -> Option<&'static str> {
        Some(match key {
            "alerts.outOfStock" => "{itemName} is out of stock ({needed} {unit} recommended)",
            "alerts.criticallyLow" => "{itemName} is critically low: {actual} of {needed} {unit}",
            "alerts.lowStock" => "{itemName} is running low: {actual} of {needed} {unit}",
            "alerts.almostEnough" => "{itemName} needs {missing} {unit} more",
            "alerts.expired" => "{itemName} expired {days} days ago",
            "alerts.expiresToday" => "{itemName} expires today",
            "alerts.expiringSoon" => "{itemName} expires in {days} days",
            "alerts.caloriesShort" => {
                "Food supplies are {missing} kcal short of the {needed} kcal needed"
            }
            "alerts.backupReminder" => "No backup in the last {days} days, export your data",
            _ => return None,
        })
    }
}

impl Translator for EnglishTranslator {
    fn translate(&self, key: &str, args: &[(&str, String)]) -> String {
        let Some(template) = Self::template(key) else {
            return key.to_string();
        };
        fill_placeholders(template, args)
    }
}

/// Replace each `{name}` in `template` with its argument in one pass, so
/// argument values are never scanned for placeholders themselves. Unknown
/// names are left as written.
fn fill_placeholders(template: &str, args: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Everything besides the items and household that alert generation reads.
#[derive(Debug, Clone, Copy)]
pub struct DashboardContext<'a> {
    pub categories: &'a [Category],
    pub recommended_items: &'a [RecommendedItemDefinition],
    pub disabled_recommended_items: &'a BTreeSet<String>,
    pub dismissed_alert_ids: &'a BTreeSet<String>,
    pub options: &'a CalculationOptions,
    pub today: NaiveDate,
    pub last_backup_date: Option<NaiveDate>,
}

/// Build, deduplicate, filter and order every dashboard alert.
///
/// Shortage alerts come from the category strategies; expiry alerts are
/// evaluated per item independently of them.
pub fn generate_dashboard_alerts(
    items: &[InventoryItem],
    translator: &dyn Translator,
    household: &HouseholdConfig,
    ctx: &DashboardContext<'_>,
) -> Vec<Alert> {
    let inputs = CalculationInputs {
        items,
        recommended_items: ctx.recommended_items,
        household,
        disabled_recommended_items: ctx.disabled_recommended_items,
        options: ctx.options,
    };

    let mut alerts = Vec::new();

    for category in ctx.categories {
        let report = calculate_category(&category.id, &inputs);
        for shortage in &report.result.shortages {
            alerts.push(shortage_alert(shortage, &category.id, translator));
        }
        if let (Some(missing), Some(needed)) = (
            report.result.missing_calories,
            report.result.total_needed_calories,
        ) {
            if missing > 0.0 {
                alerts.push(Alert {
                    id: format!("calories-{}", category.id),
                    alert_type: AlertType::Warning,
                    message: translator.translate(
                        "alerts.caloriesShort",
                        &[
                            ("missing", format_amount(missing)),
                            ("needed", format_amount(needed)),
                        ],
                    ),
                    item_name: None,
                    category_id: Some(category.id.clone()),
                });
            }
        }
    }

    alerts.extend(
        items
            .iter()
            .filter_map(|item| expiration_alert(item, ctx.today, translator)),
    );

    if !items.is_empty() && backup_overdue(ctx.last_backup_date, ctx.today) {
        alerts.push(Alert {
            id: "backup-reminder".to_string(),
            alert_type: AlertType::Info,
            message: translator.translate(
                "alerts.backupReminder",
                &[("days", BACKUP_REMINDER_DAYS.to_string())],
            ),
            item_name: None,
            category_id: None,
        });
    }

    let alerts = dedupe_alerts(alerts)
        .into_iter()
        .filter(|alert| !ctx.dismissed_alert_ids.contains(&alert.id))
        .collect();
    let alerts = sort_alerts(alerts);
    debug!(count = alerts.len(), "generated dashboard alerts");
    alerts
}

/// Severity policy: nothing stocked is critical, below the low-stock line is
/// a warning, anything else is informational.
pub fn shortage_alert(
    shortage: &CategoryShortage,
    category_id: &str,
    translator: &dyn Translator,
) -> Alert {
    let percentage = shortage.percentage();
    let (alert_type, key) = if shortage.actual <= 0.0 {
        (AlertType::Critical, "alerts.outOfStock")
    } else if percentage < CRITICALLY_LOW_STOCK_PERCENTAGE {
        (AlertType::Warning, "alerts.criticallyLow")
    } else if percentage < LOW_STOCK_PERCENTAGE {
        (AlertType::Warning, "alerts.lowStock")
    } else {
        (AlertType::Info, "alerts.almostEnough")
    };

    let message = translator.translate(
        key,
        &[
            ("itemName", shortage.item_name.clone()),
            ("actual", format_amount(shortage.actual)),
            ("needed", format_amount(shortage.needed)),
            ("missing", format_amount(shortage.missing)),
            ("unit", shortage.unit.to_string()),
        ],
    );

    Alert {
        id: format!("shortage-{}-{}", category_id, shortage.item_id),
        alert_type,
        message,
        item_name: Some(shortage.item_name.clone()),
        category_id: Some(category_id.to_string()),
    }
}

/// Expired items are critical, items expiring within
/// [`EXPIRING_SOON_ALERT_DAYS`] are warnings. Empty stock raises nothing.
pub fn expiration_alert(
    item: &InventoryItem,
    today: NaiveDate,
    translator: &dyn Translator,
) -> Option<Alert> {
    if item.quantity <= 0.0 {
        return None;
    }
    let days = item.days_until_expiration(today)?;

    let (id, alert_type, message) = if days < 0 {
        (
            format!("expired-{}", item.id),
            AlertType::Critical,
            translator.translate(
                "alerts.expired",
                &[("itemName", item.name.clone()), ("days", (-days).to_string())],
            ),
        )
    } else if days == 0 {
        (
            format!("expiring-{}", item.id),
            AlertType::Warning,
            translator.translate("alerts.expiresToday", &[("itemName", item.name.clone())]),
        )
    } else if days <= EXPIRING_SOON_ALERT_DAYS {
        (
            format!("expiring-{}", item.id),
            AlertType::Warning,
            translator.translate(
                "alerts.expiringSoon",
                &[("itemName", item.name.clone()), ("days", days.to_string())],
            ),
        )
    } else {
        return None;
    };

    Some(Alert {
        id,
        alert_type,
        message,
        item_name: Some(item.name.clone()),
        category_id: Some(item.category_id.clone()),
    })
}

fn backup_overdue(last_backup: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_backup.is_none_or(|date| today.signed_duration_since(date).num_days() > BACKUP_REMINDER_DAYS)
}

/// Keep the first alert for each id.
pub fn dedupe_alerts(alerts: Vec<Alert>) -> Vec<Alert> {
    let mut seen = HashSet::new();
    alerts
        .into_iter()
        .filter(|alert| seen.insert(alert.id.clone()))
        .collect()
}

/// Most severe first. Stable: equal priorities keep generation order.
pub fn sort_alerts(mut alerts: Vec<Alert>) -> Vec<Alert> {
    alerts.sort_by_key(|alert| alert.alert_type.priority());
    alerts
}

/// Whole numbers without decimals, everything else to one decimal place.
fn format_amount(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
