use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::CalculationOptions;
use crate::error::{Result, SupplyError};
use crate::models::{
    is_standard_category, Category, HouseholdConfig, HouseholdConfigFactory,
    HouseholdConfigInput, InventoryItem, Kit,
};
use crate::state::app_data::{AppData, CURRENT_SCHEMA_VERSION};
use crate::state::manager::validate_item;

/// Independently exportable parts of the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BackupSection {
    Household,
    Settings,
    Inventory,
    Categories,
    Kits,
    Recommendations,
    DismissedAlerts,
}

impl BackupSection {
    pub const ALL: [BackupSection; 7] = [
        BackupSection::Household,
        BackupSection::Settings,
        BackupSection::Inventory,
        BackupSection::Categories,
        BackupSection::Kits,
        BackupSection::Recommendations,
        BackupSection::DismissedAlerts,
    ];
}

/// A backup document. Every section is optional so partial backups parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupFile {
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household: Option<HouseholdConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CalculationOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_kits: Option<Vec<Kit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_kit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_recommended_items: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_alert_ids: Option<BTreeSet<String>>,
}

/// What an import changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub household_replaced: bool,
    pub settings_replaced: bool,
    pub items_added: usize,
    pub items_updated: usize,
    pub items_skipped: usize,
    pub categories_merged: usize,
    pub kits_merged: usize,
    pub kits_skipped: usize,
    pub recommendations_disabled: usize,
    pub alerts_dismissed: usize,
}

/// Copy the selected sections out of `data`.
pub fn export_backup(data: &AppData, sections: &[BackupSection], now: DateTime<Utc>) -> BackupFile {
    let mut backup = BackupFile {
        version: Some(CURRENT_SCHEMA_VERSION),
        exported_at: Some(now),
        ..Default::default()
    };

    for section in sections {
        match section {
            BackupSection::Household => backup.household = Some(data.household.clone()),
            BackupSection::Settings => backup.settings = Some(data.settings.clone()),
            BackupSection::Inventory => {
                backup.inventory = Some(data.inventory.items().to_vec())
            }
            BackupSection::Categories => {
                backup.custom_categories = Some(data.custom_categories.clone())
            }
            BackupSection::Kits => {
                backup.custom_kits = Some(data.custom_kits.clone());
                backup.active_kit_id = Some(data.active_kit_id.clone());
            }
            BackupSection::Recommendations => {
                backup.disabled_recommended_items = Some(data.disabled_recommended_items.clone())
            }
            BackupSection::DismissedAlerts => {
                backup.dismissed_alert_ids = Some(data.dismissed_alert_ids.clone())
            }
        }
    }

    backup
}

pub fn parse_backup(json: &str) -> Result<BackupFile> {
    let backup: BackupFile = serde_json::from_str(json)?;
    if let Some(version) = backup.version {
        if version > CURRENT_SCHEMA_VERSION {
            return Err(SupplyError::UnsupportedBackupVersion(version));
        }
    }
    Ok(backup)
}

pub fn read_backup<P: AsRef<Path>>(path: P) -> Result<BackupFile> {
    parse_backup(&fs::read_to_string(path)?)
}

pub fn write_backup<P: AsRef<Path>>(path: P, backup: &BackupFile) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(backup)?)?;
    Ok(())
}

/// Merge the selected sections of `backup` into `data`.
///
/// Sections absent from the backup are left untouched. Household and
/// settings are replaced; items, categories and kits merge by id with the
/// backup winning; id sets are unioned. Invalid entries are skipped.
/// The household and settings are validated before anything is changed.
pub fn import_backup(
    data: &mut AppData,
    backup: BackupFile,
    sections: &[BackupSection],
) -> Result<ImportSummary> {
    let wants = |section: BackupSection| sections.contains(&section);
    let mut summary = ImportSummary::default();

    let household = match backup.household {
        Some(household) if wants(BackupSection::Household) => Some(
            HouseholdConfigFactory::create(HouseholdConfigInput::from(&household))?,
        ),
        _ => None,
    };
    let settings = match backup.settings {
        Some(settings) if wants(BackupSection::Settings) => Some(settings.validated()?),
        _ => None,
    };

    if let Some(household) = household {
        data.household = household;
        summary.household_replaced = true;
    }
    if let Some(settings) = settings {
        data.settings = settings;
        summary.settings_replaced = true;
    }

    if let Some(categories) = backup
        .custom_categories
        .filter(|_| wants(BackupSection::Categories))
    {
        for category in categories {
            if is_standard_category(&category.id) || category.id.trim().is_empty() {
                warn!(id = %category.id, "skipping category from backup");
                continue;
            }
            let category = Category {
                is_custom: true,
                ..category
            };
            match data
                .custom_categories
                .iter_mut()
                .find(|c| c.id == category.id)
            {
                Some(existing) => *existing = category,
                None => data.custom_categories.push(category),
            }
            summary.categories_merged += 1;
        }
    }

    let categories = data.categories();

    if wants(BackupSection::Kits) {
        for kit in backup.custom_kits.unwrap_or_default() {
            match kit.validated(&categories).and_then(|kit| data.import_kit(kit)) {
                Ok(()) => summary.kits_merged += 1,
                Err(err) => {
                    warn!(error = %err, "skipping kit from backup");
                    summary.kits_skipped += 1;
                }
            }
        }
        if let Some(active) = backup.active_kit_id {
            if let Err(err) = data.select_kit(&active) {
                warn!(error = %err, "keeping current kit");
            }
        }
    }

    if let Some(items) = backup.inventory.filter(|_| wants(BackupSection::Inventory)) {
        for item in items {
            if let Err(err) = validate_item(&item, &categories) {
                warn!(id = %item.id, error = %err, "skipping item from backup");
                summary.items_skipped += 1;
                continue;
            }
            if data.inventory.upsert(item) {
                summary.items_updated += 1;
            } else {
                summary.items_added += 1;
            }
        }
    }

    if let Some(ids) = backup
        .disabled_recommended_items
        .filter(|_| wants(BackupSection::Recommendations))
    {
        for id in ids {
            if data.disabled_recommended_items.insert(id) {
                summary.recommendations_disabled += 1;
            }
        }
    }

    if let Some(ids) = backup
        .dismissed_alert_ids
        .filter(|_| wants(BackupSection::DismissedAlerts))
    {
        for id in ids {
            if data.dismissed_alert_ids.insert(id) {
                summary.alerts_dismissed += 1;
            }
        }
    }

    info!(?summary, "imported backup");
    Ok(summary)
}
