use thiserror::Error;

use crate::models::{HouseholdConfigValidationError, ProductTemplateValidationError};

#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Kit not found: {0}")]
    KitNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    HouseholdConfig(#[from] HouseholdConfigValidationError),

    #[error(transparent)]
    ProductTemplate(#[from] ProductTemplateValidationError),

    #[error("Unsupported backup version: {0}")]
    UnsupportedBackupVersion(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SupplyError>;
