//! TOML-based configuration for relnav.
//!
//! Supports a config file (relnav.toml) with environment variable expansion
//! in path values.
//!
//! Example configuration:
//! ```toml
//! [navigator]
//! max_depth = 5
//!
//! [metadata]
//! schema_path = "${RELNAV_HOME}/schema.json"
//!
//! [preview]
//! records_path = "./records.json"
//! null_placeholder = "-"
//! value_separator = "; "
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::navigator::MAX_DEPTH;
use crate::preview::PreviewOptions;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub navigator: NavigatorSettings,
    pub metadata: MetadataSettings,
    pub preview: PreviewSettings,
}

/// Panel stack configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigatorSettings {
    /// Maximum number of panels, root included.
    pub max_depth: usize,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Metadata source configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Path to a JSON schema document (supports ${ENV_VAR} expansion).
    pub schema_path: Option<String>,
}

/// Preview configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Path to a JSON records document (supports ${ENV_VAR} expansion).
    pub records_path: Option<String>,

    /// Text shown for cells that reached no value.
    pub null_placeholder: String,

    /// Separator between fanned-out values in one cell.
    pub value_separator: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        let options = PreviewOptions::default();
        Self {
            records_path: None,
            null_placeholder: options.null_placeholder,
            value_separator: options.value_separator,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `RELNAV_CONFIG`
    /// 2. `./relnav.toml`
    /// 3. `~/.config/relnav/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("RELNAV_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("relnav.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("relnav").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.navigator.max_depth < 2 {
            return Err(SettingsError::InvalidConfig(format!(
                "navigator.max_depth must be at least 2, got {}",
                self.navigator.max_depth
            )));
        }
        Ok(())
    }

    /// Schema document path with environment variables expanded.
    pub fn schema_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        expand_optional_path(self.metadata.schema_path.as_deref())
    }

    /// Records document path with environment variables expanded.
    pub fn records_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        expand_optional_path(self.preview.records_path.as_deref())
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            null_placeholder: self.preview.null_placeholder.clone(),
            value_separator: self.preview.value_separator.clone(),
        }
    }
}

fn expand_optional_path(path: Option<&str>) -> Result<Option<PathBuf>, SettingsError> {
    path.map(|p| expand_env_vars(p).map(PathBuf::from)).transpose()
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR ends at the first non-alphanumeric, non-underscore char
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
