use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sprint: SprintConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintConfig {
    /// Day the assessments begin; the dashboard counts down to its UTC midnight
    #[serde(default = "default_assessment_date")]
    pub assessment_date: NaiveDate,
}

impl Default for SprintConfig {
    fn default() -> Self {
        SprintConfig {
            assessment_date: default_assessment_date(),
        }
    }
}

fn default_assessment_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 18).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// `"dark"` selects the dark palette; anything else (or absent) is light
    #[serde(default)]
    pub theme: Option<String>,
    /// Hex color overrides applied on top of the active palette
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl UiConfig {
    pub fn is_dark(&self) -> bool {
        self.theme.as_deref() == Some("dark")
    }
}
