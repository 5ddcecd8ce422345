use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, SupplyError};
use crate::models::{Category, InventoryItem, Unit, CUSTOM_ITEM_TYPE};

/// Values for a new inventory item, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub name: String,
    pub category_id: String,
    pub item_type: String,
    pub satisfies_recommendation: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    pub expiration_date: Option<NaiveDate>,
    pub never_expires: bool,
    pub requires_water_liters: Option<f64>,
    pub calories_per_unit: Option<f64>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl NewInventoryItem {
    pub fn new(
        name: impl Into<String>,
        category_id: impl Into<String>,
        item_type: impl Into<String>,
        quantity: f64,
        unit: Unit,
    ) -> Self {
        Self {
            name: name.into(),
            category_id: category_id.into(),
            item_type: item_type.into(),
            satisfies_recommendation: None,
            quantity,
            unit,
            expiration_date: None,
            never_expires: false,
            requires_water_liters: None,
            calories_per_unit: None,
            location: None,
            notes: None,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub expiration_date: Option<NaiveDate>,
    pub never_expires: Option<bool>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// The household's stocked items, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
}

impl InventoryStore {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut InventoryItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| SupplyError::ItemNotFound(id.to_string()))
    }

    pub fn items_in_category<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.category_id == category_id)
    }

    pub fn references_category(&self, category_id: &str) -> bool {
        self.items.iter().any(|item| item.category_id == category_id)
    }

    /// Validate and store a new item under a fresh id.
    pub fn add_item(&mut self, new: NewInventoryItem, categories: &[Category]) -> Result<&InventoryItem> {
        validate_new_item(&new, categories)?;

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            category_id: new.category_id,
            item_type: new.item_type,
            satisfies_recommendation: new.satisfies_recommendation,
            quantity: new.quantity,
            unit: new.unit,
            expiration_date: new.expiration_date,
            never_expires: new.never_expires,
            requires_water_liters: new.requires_water_liters,
            calories_per_unit: new.calories_per_unit,
            weight_grams: None,
            marked_as_enough: false,
            location: new.location,
            notes: new.notes,
        };
        info!(id = %item.id, name = %item.name, category = %item.category_id, "added item");

        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn update_item(&mut self, id: &str, update: ItemUpdate) -> Result<&InventoryItem> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(SupplyError::InvalidInput("name must not be empty".to_string()));
            }
        }
        if let Some(quantity) = update.quantity {
            validate_quantity(quantity)?;
        }

        let item = self.get_mut(id)?;
        if let Some(name) = update.name {
            item.name = name.trim().to_string();
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(date) = update.expiration_date {
            item.expiration_date = Some(date);
            item.never_expires = false;
        }
        if let Some(never_expires) = update.never_expires {
            item.never_expires = never_expires;
            if never_expires {
                item.expiration_date = None;
            }
        }
        if let Some(location) = update.location {
            item.location = Some(location);
        }
        if let Some(notes) = update.notes {
            item.notes = Some(notes);
        }
        info!(id, "updated item");
        Ok(item)
    }

    pub fn remove_item(&mut self, id: &str) -> Result<InventoryItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| SupplyError::ItemNotFound(id.to_string()))?;
        info!(id, "removed item");
        Ok(self.items.remove(index))
    }

    /// Set or clear the user's "this is enough" override.
    pub fn set_marked_as_enough(&mut self, id: &str, marked: bool) -> Result<()> {
        self.get_mut(id)?.marked_as_enough = marked;
        Ok(())
    }

    /// Insert or replace by id. Returns true when an item was replaced.
    pub fn upsert(&mut self, item: InventoryItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => {
                self.items.push(item);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(SupplyError::InvalidInput(format!(
            "quantity must be a non-negative number, got {}",
            quantity
        )));
    }
    Ok(())
}

/// Check a stored item's invariants, e.g. one arriving from a backup.
pub fn validate_item(item: &InventoryItem, categories: &[Category]) -> Result<()> {
    if item.id.trim().is_empty() {
        return Err(SupplyError::InvalidInput("item id must not be empty".to_string()));
    }
    if !categories.iter().any(|c| c.id == item.category_id) {
        return Err(SupplyError::CategoryNotFound(item.category_id.clone()));
    }
    validate_quantity(item.quantity)
}

fn validate_new_item(new: &NewInventoryItem, categories: &[Category]) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(SupplyError::InvalidInput("name must not be empty".to_string()));
    }
    if !categories.iter().any(|c| c.id == new.category_id) {
        return Err(SupplyError::CategoryNotFound(new.category_id.clone()));
    }
    validate_quantity(new.quantity)?;
    if new.satisfies_recommendation.is_some() && new.item_type != CUSTOM_ITEM_TYPE {
        return Err(SupplyError::InvalidInput(
            "only custom items can be linked to a recommendation".to_string(),
        ));
    }
    for (field, value) in [
        ("requiresWaterLiters", new.requires_water_liters),
        ("caloriesPerUnit", new.calories_per_unit),
    ] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(SupplyError::InvalidInput(format!(
                    "{} must be a non-negative number",
                    field
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standard_categories;

    fn store_with_water() -> (InventoryStore, String) {
        let mut store = InventoryStore::default();
        let id = store
            .add_item(
                NewInventoryItem::new("Spring water", "water-beverages", "bottled-water", 6.0, Unit::Liters),
                &standard_categories(),
            )
            .unwrap()
            .id
            .clone();
        (store, id)
    }

    #[test]
    fn test_add_item() {
        let (store, id) = store_with_water();
        assert_eq!(store.len(), 1);
        let item = store.get(&id).unwrap();
        assert_eq!(item.quantity, 6.0);
        assert!(!item.marked_as_enough);
    }

    #[test]
    fn test_add_item_validation() {
        let mut store = InventoryStore::default();
        let categories = standard_categories();

        let negative = NewInventoryItem::new("Water", "water-beverages", "bottled-water", -1.0, Unit::Liters);
        assert!(matches!(store.add_item(negative, &categories), Err(SupplyError::InvalidInput(_))));

        let unknown = NewInventoryItem::new("Water", "space", "bottled-water", 1.0, Unit::Liters);
        assert!(matches!(store.add_item(unknown, &categories), Err(SupplyError::CategoryNotFound(_))));

        let mut linked = NewInventoryItem::new("Water", "water-beverages", "bottled-water", 1.0, Unit::Liters);
        linked.satisfies_recommendation = Some("bottled-water".to_string());
        assert!(store.add_item(linked, &categories).is_err());

        assert!(store.is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let (mut store, id) = store_with_water();
        store
            .update_item(
                &id,
                ItemUpdate {
                    quantity: Some(10.0),
                    never_expires: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        let item = store.get(&id).unwrap();
        assert_eq!(item.quantity, 10.0);
        assert!(item.never_expires);

        assert!(store
            .update_item(&id, ItemUpdate { quantity: Some(f64::NAN), ..Default::default() })
            .is_err());

        let removed = store.remove_item(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(matches!(store.remove_item(&id), Err(SupplyError::ItemNotFound(_))));
    }

    #[test]
    fn test_mark_as_enough() {
        let (mut store, id) = store_with_water();
        store.set_marked_as_enough(&id, true).unwrap();
        assert!(store.get(&id).unwrap().marked_as_enough);
        store.set_marked_as_enough(&id, false).unwrap();
        assert!(!store.get(&id).unwrap().marked_as_enough);
    }

    #[test]
    fn test_upsert() {
        let (mut store, id) = store_with_water();
        let mut replacement = store.get(&id).unwrap().clone();
        replacement.quantity = 1.0;
        assert!(store.upsert(replacement));
        assert_eq!(store.get(&id).unwrap().quantity, 1.0);

        let other = InventoryItem::new("other", "Soup", "food", "canned-soup", 2.0, Unit::Cans);
        assert!(!store.upsert(other));
        assert_eq!(store.len(), 2);
        assert_eq!(store.items_in_category("food").count(), 1);
    }
}
