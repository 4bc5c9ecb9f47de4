use directories::ProjectDirs;
use meisai_core::{ConfigError, ExportConfig};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// `<platform config dir>/config.toml`, e.g. `~/.config/meisai/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "meisai", "meisai").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load the export config snapshot for this run.
///
/// An explicit path must exist. Without one, the platform default is used
/// when present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ExportConfig, ConfigError> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading export config");
        return ExportConfig::load(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading export config");
            ExportConfig::load(&path)
        }
        _ => Ok(ExportConfig::default()),
    }
}

/// Command-line values that replace fields of the loaded config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub method: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub payment_source: Option<String>,
    pub currency: Option<String>,
    pub item_prefix: Option<String>,
    pub memo_prefix: Option<String>,
    pub no_source_memo: bool,
}

impl ConfigOverrides {
    pub fn apply(self, config: ExportConfig) -> ExportConfig {
        ExportConfig {
            method: self.method.unwrap_or(config.method),
            category: self.category.unwrap_or(config.category),
            subcategory: self.subcategory.unwrap_or(config.subcategory),
            payment_source: self.payment_source.unwrap_or(config.payment_source),
            currency: self.currency.unwrap_or(config.currency),
            item_prefix: self.item_prefix.unwrap_or(config.item_prefix),
            memo_prefix: self.memo_prefix.unwrap_or(config.memo_prefix),
            include_source_in_memo: config.include_source_in_memo && !self.no_source_memo,
            ..config
        }
    }
}
