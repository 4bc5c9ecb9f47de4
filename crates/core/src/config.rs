use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Fixed column values for the ledger import file.
///
/// Every field is free text and copied into the output after trimming. A
/// config is a snapshot: build one per export and pass it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub method: String,
    pub category: String,
    pub subcategory: String,
    pub payment_source: String,
    pub income_target: String,
    pub currency: String,
    pub aggregation_setting: String,
    pub item_prefix: String,
    pub memo_prefix: String,
    pub include_source_in_memo: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            method: "payment".to_string(),
            category: "その他".to_string(),
            subcategory: "その他".to_string(),
            payment_source: "クレジットカード".to_string(),
            income_target: String::new(),
            currency: "JPY".to_string(),
            aggregation_setting: "常に集計に含める".to_string(),
            item_prefix: String::new(),
            memo_prefix: "カード明細取込".to_string(),
            include_source_in_memo: true,
        }
    }
}

impl ExportConfig {
    /// Missing keys fall back to their defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
