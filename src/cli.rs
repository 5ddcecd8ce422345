use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::calculation::CalculationOptions;
use crate::error::Result;
use crate::models::{HouseholdPreset, Unit};
use crate::state::BackupSection;

/// Supply tracker: keeps a household's emergency supplies in line with a recommendation kit.
#[derive(Parser, Debug)]
#[command(name = "supply_tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the state JSON file.
    #[arg(short, long, default_value = "supply_state.json", global = true)]
    pub file: PathBuf,

    /// Log calculation details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Evaluate expiry as of this date instead of today (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(flatten)]
    pub options: OptionOverrides,
}

/// Per-run overrides of the stored calculation settings.
#[derive(Args, Debug, Default)]
pub struct OptionOverrides {
    /// How much a child counts relative to an adult.
    #[arg(long, global = true)]
    pub children_multiplier: Option<f64>,

    /// Daily kilocalories per adult.
    #[arg(long, global = true)]
    pub daily_calories: Option<f64>,

    /// Daily liters of drinking water per adult.
    #[arg(long, global = true)]
    pub daily_water: Option<f64>,
}

impl OptionOverrides {
    /// Layer the overrides over `options` and validate the result.
    pub fn apply(&self, mut options: CalculationOptions) -> Result<CalculationOptions> {
        if let Some(value) = self.children_multiplier {
            options.children_multiplier = value;
        }
        if let Some(value) = self.daily_calories {
            options.daily_calories_per_person = value;
        }
        if let Some(value) = self.daily_water {
            options.daily_water_per_person = value;
        }
        options.validated()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show alerts and a per-category summary.
    Status,

    /// Show or change the household configuration.
    Household {
        #[command(subcommand)]
        action: Option<HouseholdAction>,
    },

    /// Show calculation settings, including any per-run overrides.
    Settings {
        /// Store the overrides given on this run.
        #[arg(long)]
        save: bool,
    },

    /// Add an item to the inventory.
    Add(AddItem),

    /// Change an inventory item.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        expires: Option<NaiveDate>,
        #[arg(long)]
        never_expires: Option<bool>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove an inventory item.
    Remove { id: String },

    /// Mark an item as enough, suppressing its shortage.
    MarkEnough {
        id: String,
        /// Clear the mark instead.
        #[arg(long)]
        unset: bool,
    },

    /// List inventory items.
    List {
        #[arg(long)]
        category: Option<String>,
    },

    /// Show recommended versus stocked quantities.
    Shortages {
        #[arg(long)]
        category: Option<String>,
    },

    /// Enable or disable a recommendation of the active kit.
    Recommendation {
        #[command(subcommand)]
        action: ToggleAction,
    },

    /// Manage categories.
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage recommendation kits.
    Kit {
        #[command(subcommand)]
        action: KitAction,
    },

    /// Export a JSON backup.
    Export {
        path: PathBuf,
        /// Sections to include (default: all).
        #[arg(long, value_enum, value_delimiter = ',')]
        sections: Vec<BackupSection>,
    },

    /// Import a JSON backup, merging it into the current data.
    Import {
        path: PathBuf,
        /// Sections to import (default: all).
        #[arg(long, value_enum, value_delimiter = ',')]
        sections: Vec<BackupSection>,
    },

    /// Write a CSV shopping list of current shortages.
    ShoppingList { path: PathBuf },

    /// Hide an alert by id.
    Dismiss { id: String },
}

impl Default for Command {
    fn default() -> Self {
        Command::Status
    }
}

#[derive(Subcommand, Debug)]
pub enum HouseholdAction {
    /// Print the household configuration.
    Show,
    /// Set household values; omitted values are kept.
    Set {
        #[arg(long, allow_negative_numbers = true)]
        adults: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        children: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        pets: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
        #[arg(long)]
        freezer: Option<bool>,
        #[arg(long)]
        freezer_hours: Option<f64>,
    },
    /// Start from a preset household.
    Preset {
        #[arg(value_enum)]
        preset: HouseholdPreset,
    },
    /// Fill in the household form interactively.
    Setup,
}

#[derive(Args, Debug)]
pub struct AddItem {
    /// Recommended item id or name; fuzzy matches are offered.
    #[arg(long, conflicts_with = "custom")]
    pub recommended: Option<String>,

    /// Name of a custom item not in the kit.
    #[arg(long)]
    pub custom: Option<String>,

    /// Category of a custom item.
    #[arg(long, requires = "custom")]
    pub category: Option<String>,

    /// For a custom item: the recommendation it covers.
    #[arg(long, requires = "custom")]
    pub satisfies: Option<String>,

    #[arg(long)]
    pub quantity: f64,

    #[arg(long, value_enum)]
    pub unit: Option<Unit>,

    #[arg(long)]
    pub expires: Option<NaiveDate>,

    #[arg(long)]
    pub never_expires: bool,

    /// Liters of water needed to prepare one unit.
    #[arg(long)]
    pub water_per_unit: Option<f64>,

    #[arg(long)]
    pub calories_per_unit: Option<f64>,

    /// Display name override for a recommended item.
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ToggleAction {
    Disable { id: String },
    Enable { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    List,
    Add {
        id: String,
        name: String,
        #[arg(long)]
        icon: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum KitAction {
    List,
    /// Import a kit JSON file.
    Import {
        path: PathBuf,
        /// Make it the active kit.
        #[arg(long)]
        select: bool,
    },
    Select {
        id: String,
    },
    Remove {
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SupplyError;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let cli = Cli::parse_from(["supply_tracker", "--daily-water", "4.5", "status"]);
        let options = cli.options.apply(CalculationOptions::default()).unwrap();
        assert_eq!(options.daily_water_per_person, 4.5);
        assert_eq!(options.children_multiplier, CalculationOptions::default().children_multiplier);
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = OptionOverrides {
            daily_water: Some(-3.0),
            ..Default::default()
        };
        assert!(matches!(
            overrides.apply(CalculationOptions::default()),
            Err(SupplyError::InvalidInput(_))
        ));

        let overrides = OptionOverrides {
            children_multiplier: Some(f64::NAN),
            ..Default::default()
        };
        assert!(overrides.apply(CalculationOptions::default()).is_err());
    }

    #[test]
    fn test_invalid_stored_settings_are_caught() {
        let stored = CalculationOptions {
            daily_calories_per_person: 0.0,
            ..CalculationOptions::default()
        };
        assert!(OptionOverrides::default().apply(stored).is_err());
    }
}
