use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use supply_tracker_rs::calculation::{
    generate_dashboard_alerts, CalculationOptions, DashboardContext, EnglishTranslator,
};
use supply_tracker_rs::models::{
    standard_categories, AlertType, InventoryItem, RecommendedItemDefinition, Unit,
    CUSTOM_ITEM_TYPE,
};
use supply_tracker_rs::state::{
    export_backup, import_backup, read_backup, write_backup, AppData, BackupSection, FileStore,
    KeyValueStore, STORAGE_KEY,
};
use supply_tracker_rs::SupplyError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn light_kit() -> Vec<RecommendedItemDefinition> {
    vec![
        RecommendedItemDefinition::new("candles", "Candles", "light-power", Unit::Pieces, 10.0),
        RecommendedItemDefinition::new("flashlight", "Flashlight", "light-power", Unit::Pieces, 2.0),
    ]
}

fn light_items() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new("f1", "Flashlight", "light-power", "flashlight", 1.0, Unit::Pieces),
        InventoryItem::new("b1", "Batteries", "light-power", CUSTOM_ITEM_TYPE, 4.0, Unit::Pieces)
            .with_expiration(date(2026, 1, 1)),
    ]
}

#[test]
fn test_dashboard_alerts_are_ordered_by_severity() {
    let categories = standard_categories();
    let recommended = light_kit();
    let items = light_items();
    let disabled = BTreeSet::new();
    let dismissed = BTreeSet::new();
    let options = CalculationOptions::default();
    let household = Default::default();

    let ctx = DashboardContext {
        categories: &categories,
        recommended_items: &recommended,
        disabled_recommended_items: &disabled,
        dismissed_alert_ids: &dismissed,
        options: &options,
        today: date(2026, 10, 16),
        last_backup_date: None,
    };
    let alerts = generate_dashboard_alerts(&items, &EnglishTranslator, &household, &ctx);

    let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "shortage-light-power-candles",
            "expired-b1",
            "shortage-light-power-flashlight",
            "backup-reminder",
        ]
    );
    assert_eq!(alerts[0].alert_type, AlertType::Critical);
    assert_eq!(alerts[1].alert_type, AlertType::Critical);
    // 1 of 2 is exactly the low-stock line, so only informational
    assert_eq!(alerts[2].alert_type, AlertType::Info);
    assert_eq!(alerts[3].alert_type, AlertType::Info);
}

#[test]
fn test_dismissed_and_recent_backup_hide_alerts() {
    let categories = standard_categories();
    let recommended = light_kit();
    let items = light_items();
    let disabled: BTreeSet<String> = ["candles".to_string()].into_iter().collect();
    let dismissed: BTreeSet<String> = ["expired-b1".to_string()].into_iter().collect();
    let options = CalculationOptions::default();
    let household = Default::default();

    let ctx = DashboardContext {
        categories: &categories,
        recommended_items: &recommended,
        disabled_recommended_items: &disabled,
        dismissed_alert_ids: &dismissed,
        options: &options,
        today: date(2026, 10, 16),
        last_backup_date: Some(date(2026, 10, 1)),
    };
    let alerts = generate_dashboard_alerts(&items, &EnglishTranslator, &household, &ctx);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "shortage-light-power-flashlight");
}

#[test]
fn test_state_survives_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");

    let mut store = FileStore::new(&path);
    let mut data = AppData::load(&store).unwrap();
    data.household.children = 3;
    for item in light_items() {
        data.inventory.upsert(item);
    }
    data.save(&mut store).unwrap();

    let reopened = FileStore::new(&path);
    assert!(reopened.get(STORAGE_KEY).unwrap().is_some());
    let loaded = AppData::load(&reopened).unwrap();
    assert_eq!(loaded.household.children, 3);
    assert_eq!(loaded.inventory.len(), 2);
    assert_eq!(
        loaded.inventory.get("b1").unwrap().expiration_date,
        Some(date(2026, 1, 1))
    );
}

#[test]
fn test_partial_backup_merges_by_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backup.json");

    let mut source = AppData::default();
    source.household.adults = 1;
    source.household.pets = 2;
    for item in light_items() {
        source.inventory.upsert(item);
    }
    source.dismiss_alert("backup-reminder");

    let exported_at = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    let backup = export_backup(
        &source,
        &[BackupSection::Inventory, BackupSection::DismissedAlerts],
        exported_at,
    );
    assert!(backup.household.is_none());
    write_backup(&path, &backup).unwrap();

    let mut target = AppData::default();
    target
        .inventory
        .upsert(InventoryItem::new("f1", "Old flashlight", "light-power", "flashlight", 5.0, Unit::Pieces));
    target.dismiss_alert("expired-x");

    let summary = import_backup(&mut target, read_backup(&path).unwrap(), &BackupSection::ALL).unwrap();

    assert!(!summary.household_replaced);
    assert_eq!(summary.items_updated, 1);
    assert_eq!(summary.items_added, 1);
    assert_eq!(target.household.adults, 2);
    assert_eq!(target.inventory.get("f1").unwrap().name, "Flashlight");
    assert_eq!(target.dismissed_alert_ids.len(), 2);
}

#[test]
fn test_backup_from_newer_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("future.json");
    std::fs::write(&path, r#"{"version": 7, "inventory": []}"#).unwrap();

    assert!(matches!(
        read_backup(&path),
        Err(SupplyError::UnsupportedBackupVersion(7))
    ));
}

#[test]
fn test_invalid_household_in_backup_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"version": 1,
            "household": {"adults": 0, "children": 0, "supplyDurationDays": 3},
            "inventory": [{"id": "w1", "name": "Water", "categoryId": "water-beverages",
                           "itemType": "bottled-water", "quantity": 4, "unit": "liters"}]}"#,
    )
    .unwrap();

    let mut data = AppData::default();
    let result = import_backup(&mut data, read_backup(&path).unwrap(), &BackupSection::ALL);

    assert!(matches!(result, Err(SupplyError::HouseholdConfig(_))));
    assert!(data.inventory.is_empty());
}
