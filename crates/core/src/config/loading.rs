//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

use super::defaults::*;
use super::{global_config_path, CacheScope, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `MENU_CHILDREN_` and use double
    /// underscores for nested values. For example:
    /// - `MENU_CHILDREN_FILTER__CACHE_SCOPE=per_menu`
    /// - `MENU_CHILDREN_FILTER__TARGET_MENUS=main,footer`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // Section defaults (config crate doesn't apply serde defaults for keys it never saw)
        let builder = set_config_default(builder, "filter.cache_misses", default_cache_misses())?;
        let builder = set_config_default(
            builder,
            "filter.cache_scope",
            CacheScope::default().to_string(),
        )?;
        let builder = set_config_default(
            builder,
            "filter.predicate_group",
            default_predicate_group() as i64,
        )?;
        let builder = set_config_default(builder, "schema.base_table", default_base_table())?;
        let builder = set_config_default(builder, "schema.base_field", default_base_field())?;
        let builder = set_config_default(builder, "schema.link_table", default_link_table())?;
        let builder =
            set_config_default(builder, "schema.join_condition", default_join_condition())?;
        let builder = set_config_default(builder, "schema.menu_column", default_menu_column())?;
        let builder =
            set_config_default(builder, "schema.parent_column", default_parent_column())?;
        let mut builder =
            set_config_default(builder, "schema.root_parent", default_root_parent())?;

        // Add the config file if it exists
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        } else {
            debug!(
                "No configuration file at {}, using defaults",
                path.display()
            );
        }

        // Add environment variables with MENU_CHILDREN_ prefix
        builder = builder.add_source(
            Environment::with_prefix("MENU_CHILDREN")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("filter.target_menus")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.menu-children/config.toml or custom --config path)
    /// 3. Environment variables (MENU_CHILDREN_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        let config = Self::from_file(&path)?;
        config.validate()?;
        Ok(config)
    }
}
