use serde::{Deserialize, Serialize};

/// Alert severity. Declaration order is display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Critical,
    Warning,
    Info,
}

impl AlertType {
    /// Sort key: lower is more severe.
    pub fn priority(self) -> u8 {
        match self {
            AlertType::Critical => 0,
            AlertType::Warning => 1,
            AlertType::Info => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertType::Critical => "CRITICAL",
            AlertType::Warning => "WARNING",
            AlertType::Info => "INFO",
        }
    }
}

/// A user-facing dashboard alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}
