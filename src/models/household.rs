use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculation::constants::DEFAULT_SUPPLY_DURATION_DAYS;
use crate::models::validation::{
    check_float_range, check_int_range, join_violations, FieldViolation,
};

pub const MAX_ADULTS: i64 = 20;
pub const MAX_CHILDREN: i64 = 20;
pub const MAX_PETS: i64 = 20;
pub const MAX_SUPPLY_DURATION_DAYS: i64 = 365;
pub const MAX_FREEZER_HOLD_TIME_HOURS: f64 = 168.0;

/// Who the household stocks supplies for, and for how long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdConfig {
    pub adults: u32,
    pub children: u32,
    #[serde(default)]
    pub pets: u32,
    pub supply_duration_days: u32,
    #[serde(default)]
    pub use_freezer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freezer_hold_time_hours: Option<f64>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
            pets: 0,
            supply_duration_days: DEFAULT_SUPPLY_DURATION_DAYS,
            use_freezer: false,
            freezer_hold_time_hours: None,
        }
    }
}

impl HouseholdConfig {
    /// Adult-equivalent head count: each adult counts 1.0, each child
    /// counts `children_multiplier`.
    #[inline]
    pub fn people_multiplier(&self, children_multiplier: f64) -> f64 {
        self.adults as f64 + self.children as f64 * children_multiplier
    }

    pub fn total_people(&self) -> u32 {
        self.adults + self.children
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} adults, {} children, {} pets, {} days, freezer: {}",
            self.adults, self.children, self.pets, self.supply_duration_days, self.use_freezer
        )
    }
}

/// Unvalidated household values as entered by the user.
///
/// Signed so that negative input can be reported instead of wrapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdConfigInput {
    pub adults: i64,
    pub children: i64,
    #[serde(default)]
    pub pets: i64,
    pub supply_duration_days: i64,
    #[serde(default)]
    pub use_freezer: bool,
    #[serde(default)]
    pub freezer_hold_time_hours: Option<f64>,
}

impl From<&HouseholdConfig> for HouseholdConfigInput {
    fn from(config: &HouseholdConfig) -> Self {
        Self {
            adults: config.adults as i64,
            children: config.children as i64,
            pets: config.pets as i64,
            supply_duration_days: config.supply_duration_days as i64,
            use_freezer: config.use_freezer,
            freezer_hold_time_hours: config.freezer_hold_time_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid household configuration: {}", join_violations(.violations))]
pub struct HouseholdConfigValidationError {
    pub violations: Vec<FieldViolation>,
}

impl HouseholdConfigValidationError {
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Starting points for common household shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HouseholdPreset {
    Single,
    Couple,
    Family,
}

/// Builds validated [`HouseholdConfig`] values.
pub struct HouseholdConfigFactory;

impl HouseholdConfigFactory {
    /// Validate every field and collect all violations before failing.
    pub fn create(
        input: HouseholdConfigInput,
    ) -> std::result::Result<HouseholdConfig, HouseholdConfigValidationError> {
        let mut violations = Vec::new();

        check_int_range(&mut violations, "adults", input.adults, 0, MAX_ADULTS);
        check_int_range(&mut violations, "children", input.children, 0, MAX_CHILDREN);
        check_int_range(&mut violations, "pets", input.pets, 0, MAX_PETS);
        check_int_range(
            &mut violations,
            "supplyDurationDays",
            input.supply_duration_days,
            1,
            MAX_SUPPLY_DURATION_DAYS,
        );
        if let Some(hours) = input.freezer_hold_time_hours {
            check_float_range(
                &mut violations,
                "freezerHoldTimeHours",
                hours,
                0.0,
                MAX_FREEZER_HOLD_TIME_HOURS,
            );
        }
        if violations.is_empty() && input.adults + input.children == 0 {
            violations.push(FieldViolation::new(
                "adults",
                "must be at least 1 when there are no children",
            ));
        }

        if !violations.is_empty() {
            return Err(HouseholdConfigValidationError { violations });
        }

        Ok(HouseholdConfig {
            adults: input.adults as u32,
            children: input.children as u32,
            pets: input.pets as u32,
            supply_duration_days: input.supply_duration_days as u32,
            use_freezer: input.use_freezer,
            freezer_hold_time_hours: input.freezer_hold_time_hours,
        })
    }

    pub fn from_preset(preset: HouseholdPreset) -> HouseholdConfig {
        let (adults, children) = match preset {
            HouseholdPreset::Single => (1, 0),
            HouseholdPreset::Couple => (2, 0),
            HouseholdPreset::Family => (2, 2),
        };
        HouseholdConfig {
            adults,
            children,
            ..HouseholdConfig::default()
        }
    }
}
