use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::calculation::{CalculationInputs, CalculationOptions};
use crate::error::{Result, SupplyError};
use crate::models::{
    built_in_kit, is_standard_category, standard_categories, Category, HouseholdConfig, Kit,
    RecommendedItemDefinition, BUILT_IN_KIT_ID,
};
use crate::state::InventoryStore;
use crate::state::store::KeyValueStore;

/// Key the whole application state is stored under.
pub const STORAGE_KEY: &str = "emergencySupplyTracker";

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Everything the tracker persists, stored as one JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub version: u32,
    pub household: HouseholdConfig,
    pub settings: CalculationOptions,
    pub inventory: InventoryStore,
    pub custom_categories: Vec<Category>,
    pub custom_kits: Vec<Kit>,
    pub active_kit_id: String,
    pub disabled_recommended_items: BTreeSet<String>,
    pub dismissed_alert_ids: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            household: HouseholdConfig::default(),
            settings: CalculationOptions::default(),
            inventory: InventoryStore::default(),
            custom_categories: Vec::new(),
            custom_kits: Vec::new(),
            active_kit_id: BUILT_IN_KIT_ID.to_string(),
            disabled_recommended_items: BTreeSet::new(),
            dismissed_alert_ids: BTreeSet::new(),
            last_backup_date: None,
            last_modified: None,
        }
    }
}

impl AppData {
    /// Read the blob, or defaults when nothing has been stored yet.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        match store.get(STORAGE_KEY)? {
            Some(value) => {
                let data: AppData = serde_json::from_value(value)?;
                if data.version > CURRENT_SCHEMA_VERSION {
                    return Err(SupplyError::UnsupportedBackupVersion(data.version));
                }
                debug!(items = data.inventory.len(), "loaded app data");
                Ok(data)
            }
            None => {
                info!("no stored data, starting fresh");
                Ok(AppData::default())
            }
        }
    }

    /// Replace the stored blob with this one.
    pub fn save(&mut self, store: &mut impl KeyValueStore) -> Result<()> {
        self.version = CURRENT_SCHEMA_VERSION;
        self.last_modified = Some(Utc::now());
        store.set(STORAGE_KEY, serde_json::to_value(&*self)?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Categories
    // ─────────────────────────────────────────────────────────────────────

    /// Standard categories followed by the user's own.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = standard_categories();
        categories.extend(self.custom_categories.iter().cloned());
        categories
    }

    pub fn add_custom_category(&mut self, id: &str, name: &str, icon: Option<String>) -> Result<()> {
        let id = id.trim();
        if id.is_empty() || name.trim().is_empty() {
            return Err(SupplyError::InvalidInput(
                "category id and name must not be empty".to_string(),
            ));
        }
        if is_standard_category(id) || self.custom_categories.iter().any(|c| c.id == id) {
            return Err(SupplyError::InvalidInput(format!(
                "category '{}' already exists",
                id
            )));
        }
        self.custom_categories
            .push(Category::custom(id, name.trim(), icon));
        info!(id, "added custom category");
        Ok(())
    }

    pub fn remove_custom_category(&mut self, id: &str) -> Result<Category> {
        if is_standard_category(id) {
            return Err(SupplyError::InvalidInput(format!(
                "'{}' is a standard category and cannot be removed",
                id
            )));
        }
        let index = self
            .custom_categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| SupplyError::CategoryNotFound(id.to_string()))?;
        if self.inventory.references_category(id) {
            return Err(SupplyError::InvalidInput(format!(
                "category '{}' still has items",
                id
            )));
        }
        info!(id, "removed custom category");
        Ok(self.custom_categories.remove(index))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Kits and recommendations
    // ─────────────────────────────────────────────────────────────────────

    /// The built-in kit followed by uploaded ones.
    pub fn kits(&self) -> Vec<Kit> {
        let mut kits = vec![built_in_kit()];
        kits.extend(self.custom_kits.iter().cloned());
        kits
    }

    /// The selected kit, falling back to the built-in one if it vanished.
    pub fn active_kit(&self) -> Kit {
        if self.active_kit_id == BUILT_IN_KIT_ID {
            return built_in_kit();
        }
        match self.custom_kits.iter().find(|k| k.id == self.active_kit_id) {
            Some(kit) => kit.clone(),
            None => {
                warn!(kit = %self.active_kit_id, "active kit missing, using built-in kit");
                built_in_kit()
            }
        }
    }

    pub fn recommended_items(&self) -> Vec<RecommendedItemDefinition> {
        self.active_kit().items
    }

    /// Store an uploaded kit, replacing one with the same id.
    pub fn import_kit(&mut self, kit: Kit) -> Result<()> {
        if kit.is_built_in() {
            return Err(SupplyError::InvalidInput(format!(
                "kit id '{}' is reserved",
                BUILT_IN_KIT_ID
            )));
        }
        info!(kit = %kit.id, items = kit.items.len(), "imported kit");
        match self.custom_kits.iter_mut().find(|k| k.id == kit.id) {
            Some(existing) => *existing = kit,
            None => self.custom_kits.push(kit),
        }
        Ok(())
    }

    pub fn select_kit(&mut self, id: &str) -> Result<()> {
        if id != BUILT_IN_KIT_ID && !self.custom_kits.iter().any(|k| k.id == id) {
            return Err(SupplyError::KitNotFound(id.to_string()));
        }
        self.active_kit_id = id.to_string();
        Ok(())
    }

    /// Remove an uploaded kit. Removing the active kit re-selects the built-in one.
    pub fn remove_kit(&mut self, id: &str) -> Result<Kit> {
        if id == BUILT_IN_KIT_ID {
            return Err(SupplyError::InvalidInput(
                "the built-in kit cannot be removed".to_string(),
            ));
        }
        let index = self
            .custom_kits
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| SupplyError::KitNotFound(id.to_string()))?;
        if self.active_kit_id == id {
            self.active_kit_id = BUILT_IN_KIT_ID.to_string();
        }
        Ok(self.custom_kits.remove(index))
    }

    /// Enable or disable one recommendation of the active kit.
    pub fn set_recommendation_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        if self.active_kit().find_item(id).is_none() {
            return Err(SupplyError::ItemNotFound(id.to_string()));
        }
        if enabled {
            self.disabled_recommended_items.remove(id);
        } else {
            self.disabled_recommended_items.insert(id.to_string());
        }
        Ok(())
    }

    /// Store new calculation settings once they validate.
    pub fn set_settings(&mut self, settings: CalculationOptions) -> Result<()> {
        self.settings = settings.validated()?;
        info!("updated calculation settings");
        Ok(())
    }

    pub fn dismiss_alert(&mut self, id: &str) {
        self.dismissed_alert_ids.insert(id.to_string());
    }

    /// Borrow the calculation inputs; `recommended` must come from
    /// [`AppData::recommended_items`]. `options` is usually `settings`
    /// with any per-run overrides applied.
    pub fn calculation_inputs<'a>(
        &'a self,
        recommended: &'a [RecommendedItemDefinition],
        options: &'a CalculationOptions,
    ) -> CalculationInputs<'a> {
        CalculationInputs {
            items: self.inventory.items(),
            recommended_items: recommended,
            household: &self.household,
            disabled_recommended_items: &self.disabled_recommended_items,
            options,
        }
    }
}
