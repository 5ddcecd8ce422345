// ─────────────────────────────────────────────────────────────────────────────
// Category and item identifiers with special calculation rules
// ─────────────────────────────────────────────────────────────────────────────

pub const WATER_CATEGORY_ID: &str = "water-beverages";
pub const FOOD_CATEGORY_ID: &str = "food";
pub const PETS_CATEGORY_ID: &str = "pets";

/// The recommendation that absorbs drinking and food-preparation water.
pub const BOTTLED_WATER_ID: &str = "bottled-water";

// ─────────────────────────────────────────────────────────────────────────────
// Household defaults
// ─────────────────────────────────────────────────────────────────────────────

/// How much a child counts relative to an adult.
pub const DEFAULT_CHILDREN_MULTIPLIER: f64 = 0.75;

/// Liters of drinking water per adult-equivalent per day.
pub const DEFAULT_DAILY_WATER_PER_PERSON: f64 = 3.0;

/// Kilocalories per adult-equivalent per day.
pub const DEFAULT_DAILY_CALORIES_PER_PERSON: f64 = 2000.0;

/// 72 hours.
pub const DEFAULT_SUPPLY_DURATION_DAYS: u32 = 3;

pub const MAX_CHILDREN_MULTIPLIER: f64 = 2.0;
pub const MAX_DAILY_WATER_PER_PERSON: f64 = 20.0;
pub const MAX_DAILY_CALORIES_PER_PERSON: f64 = 10_000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Alert thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Stock below this percentage of the recommendation is critically low.
pub const CRITICALLY_LOW_STOCK_PERCENTAGE: f64 = 25.0;

/// Stock below this percentage of the recommendation is low.
pub const LOW_STOCK_PERCENTAGE: f64 = 50.0;

/// Items expiring within this many days raise a warning.
pub const EXPIRING_SOON_ALERT_DAYS: i64 = 30;

/// Days without an export before a backup reminder appears.
pub const BACKUP_REMINDER_DAYS: i64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Numeric tolerances
// ─────────────────────────────────────────────────────────────────────────────

/// Needs within this many ULPs of a whole number are float noise, not a
/// fraction of a unit.
pub const QUANTITY_ULP_TOLERANCE: f64 = 4.0;
