//! Panel settings.
//!
//! Settings are plain serde structs read from TOML. Every field has a
//! default, so an empty document is a valid configuration:
//!
//! ```
//! use horizon_pluglist::config::{DeleteKeyMapping, PluginListConfig};
//!
//! let config = PluginListConfig::from_toml_str(r#"
//! platform = "mac-os"
//! delete-keys = "delete-and-backspace"
//!
//! [navigation]
//! fallback-page-rows = 8
//! "#).unwrap();
//!
//! assert_eq!(config.delete_keys, DeleteKeyMapping::DeleteAndBackspace);
//! assert_eq!(config.navigation.fallback_page_rows, 8);
//! assert!(config.hover_tracking);
//! ```

use std::path::{Path, PathBuf};

use horizon_pluglist_core::logging::targets;
use serde::{Deserialize, Serialize};

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML for these settings.
    #[error("invalid settings{}: {source}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// The settings could not be written as TOML.
    #[error("failed to serialize settings: {source}")]
    Serialize {
        #[source]
        source: toml::ser::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in '{}'", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Which platform conventions the keyboard and mouse follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformSetting {
    /// Detect from the build target.
    #[default]
    Auto,
    /// Cmd is the primary modifier; Ctrl+click opens the context menu.
    MacOs,
    /// Ctrl is the primary modifier.
    Other,
}

/// Which keys request deletion of the selected items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteKeyMapping {
    /// Delete everywhere, plus Backspace on macOS.
    #[default]
    Platform,
    /// Only the Delete key.
    DeleteOnly,
    /// Both Delete and Backspace.
    DeleteAndBackspace,
}

/// Keyboard navigation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationConfig {
    /// Rows PageUp/PageDown move when the viewport reports none visible.
    pub fallback_page_rows: usize,
    /// Whether Shift extends the selection with navigation keys.
    pub shift_extends: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            fallback_page_rows: 1,
            shift_extends: true,
        }
    }
}

/// Settings of a plugin list panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PluginListConfig {
    /// Platform conventions.
    pub platform: PlatformSetting,
    /// Keys that request deletion.
    pub delete_keys: DeleteKeyMapping,
    /// Whether the card under the pointer gets a hover marker.
    pub hover_tracking: bool,
    /// Whether loading items selects the first one.
    pub select_first_on_load: bool,
    /// Keyboard navigation.
    pub navigation: NavigationConfig,
}

impl Default for PluginListConfig {
    fn default() -> Self {
        Self {
            platform: PlatformSetting::Auto,
            delete_keys: DeleteKeyMapping::Platform,
            hover_tracking: true,
            select_first_on_load: false,
            navigation: NavigationConfig::default(),
        }
    }
}

impl PluginListConfig {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|source| ConfigError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Self = toml::from_str(&source).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded plugin list settings");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }

    /// Whether macOS conventions apply.
    pub fn is_mac(&self) -> bool {
        match self.platform {
            PlatformSetting::Auto => cfg!(target_os = "macos"),
            PlatformSetting::MacOs => true,
            PlatformSetting::Other => false,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.navigation.fallback_page_rows == 0 {
            return Err(ConfigError::invalid_value(
                "navigation.fallback-page-rows",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
