//! Configuration module for topicview
//!
//! Engine settings come from an optional TOML file in the user's config
//! directory, overlaid with `TOPICVIEW_*` environment variables. Anything not
//! set falls back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::nav::MOBILE_BREAKPOINT;
use crate::toc::ObserverOptions;

/// Engine configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix of entry fragments, `#<prefix>-<id>`
    pub page_prefix: String,

    /// Viewport width at or below which top-zone folds are single-open
    pub mobile_breakpoint: u32,

    /// Include the total in the status readout
    pub show_total: bool,

    /// Collapse every category on a startup without fragment
    pub collapse_categories_without_fragment: bool,

    /// Directory of the durable preference store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Visibility observer settings for the table of contents
    pub toc: ObserverOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_prefix: "topic".to_string(),
            mobile_breakpoint: MOBILE_BREAKPOINT,
            show_total: true,
            collapse_categories_without_fragment: false,
            storage_dir: None,
            toc: ObserverOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("topicview").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, which may not exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or the environment holds invalid values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("TOPICVIEW")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Render the configuration as TOML, in the layout of the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = self.to_toml()?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Directory of the durable store, the configured one or the platform default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no directory is configured and the system data
    /// directory cannot be determined.
    pub fn storage_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("topicview"))
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.page_prefix, "topic");
        assert_eq!(config.mobile_breakpoint, 640);
        assert!(config.show_total);
        assert!(!config.collapse_categories_without_fragment);
        assert_eq!(config.toc.root_margin, "-20% 0px -60% 0px");
        assert_eq!(config.toc.thresholds, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = EngineConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.page_prefix, EngineConfig::default().page_prefix);
        assert_eq!(config.toc, ObserverOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "page_prefix = \"news\"\nshow_total = false\n\n[toc]\nroot_margin = \"0px\"\n",
        )
        .unwrap();

        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.page_prefix, "news");
        assert!(!config.show_total);
        assert_eq!(config.mobile_breakpoint, 640);
        assert_eq!(config.toc.root_margin, "0px");
        assert_eq!(config.toc.thresholds, ObserverOptions::default().thresholds);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = EngineConfig {
            page_prefix: "entry".to_string(),
            mobile_breakpoint: 480,
            collapse_categories_without_fragment: true,
            storage_dir: Some(temp_dir.path().join("store")),
            ..EngineConfig::default()
        };
        config.save_to(&path).unwrap();

        let reloaded = EngineConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_toml_lists_values_before_toc_table() {
        let text = EngineConfig::default().to_toml().unwrap();
        let toc = text.find("[toc]").unwrap();
        assert!(text.find("page_prefix = \"topic\"").unwrap() < toc);
        assert!(text.find("show_total = true").unwrap() < toc);
        assert!(!text.contains("storage_dir"));
        assert!(text.contains("root_margin = \"-20% 0px -60% 0px\""));
    }

    #[test]
    fn test_configured_storage_dir_wins() {
        let config = EngineConfig {
            storage_dir: Some(PathBuf::from("/tmp/topicview-store")),
            ..EngineConfig::default()
        };
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/tmp/topicview-store"));
    }
}
