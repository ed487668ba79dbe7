//! Configuration module for relnav.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, MetadataSettings, NavigatorSettings, PreviewSettings, Settings,
    SettingsError,
};
