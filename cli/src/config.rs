//! CLI configuration: YAML file plus command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use batchcode_core::DatePolicy;
use batchcode_observability::LogConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::display::DateStyle;

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Date windows applied to every decoded date
    #[serde(default)]
    pub policy: DatePolicy,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub date_style: DateStyle,
    /// Analyse as if today were this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parse config YAML")
    }

    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read config file '{}'", path.display()))?;
                Self::from_yaml(&text)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line flags over file values.
    pub fn with_overrides(
        mut self,
        today: Option<NaiveDate>,
        date_style: Option<DateStyle>,
        verbose: u8,
    ) -> Self {
        if today.is_some() {
            self.today = today;
        }
        if let Some(style) = date_style {
            self.date_style = style;
        }
        self.log = self.log.with_verbosity(verbose);
        self
    }
}
