//! Configuration module for the menu children filter
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use crate::menu::MenuName;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

pub use defaults::default_root_parent;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.menu-children/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".menu-children").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Operator options for the filter
    #[serde(default)]
    pub filter: FilterConfig,

    /// Table and column names of the host schema
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Path patterns known to the bundled router
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// How cached lookups interact with a multi-menu search
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CacheScope {
    /// The first cache entry found for any candidate ends the whole search (default)
    #[default]
    ShortCircuit,
    /// A cached miss only skips its own menu; the search moves on to the next one
    PerMenu,
}

/// Operator options for the filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Menus to search for the parent link, in order. Empty searches every menu
    /// and applies no menu restriction.
    #[serde(default)]
    pub target_menus: Vec<String>,

    /// Record a no-match marker after an exhausted search
    #[serde(default = "default_cache_misses")]
    pub cache_misses: bool,

    /// Cache strategy for multi-menu searches
    #[serde(default)]
    pub cache_scope: CacheScope,

    /// Predicate group the filter clauses are added to
    #[serde(default = "default_predicate_group")]
    pub predicate_group: u32,
}

impl FilterConfig {
    /// Target menus as validated menu names, duplicates removed
    pub fn menus(&self) -> Result<Vec<MenuName>> {
        let mut menus: Vec<MenuName> = Vec::with_capacity(self.target_menus.len());
        for name in &self.target_menus {
            let menu = MenuName::new(name.as_str())
                .map_err(|e| Error::config(format!("Invalid target menu: {e}")))?;
            if !menus.contains(&menu) {
                menus.push(menu);
            }
        }
        Ok(menus)
    }
}

/// Host schema used when joining and filtering
///
/// Every name is interpolated into SQL text, so `Config::validate` only
/// accepts plain identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Primary table of the host query
    #[serde(default = "default_base_table")]
    pub base_table: String,

    /// Field selected from the primary table
    #[serde(default = "default_base_field")]
    pub base_field: String,

    /// Table holding one row per menu link
    #[serde(default = "default_link_table")]
    pub link_table: String,

    /// Join condition between the primary table and the link table
    #[serde(default = "default_join_condition")]
    pub join_condition: String,

    /// Column of the link table holding the menu name
    #[serde(default = "default_menu_column")]
    pub menu_column: String,

    /// Column of the link table holding the parent link id
    #[serde(default = "default_parent_column")]
    pub parent_column: String,

    /// Parent value stored on top-level links
    #[serde(default = "default_root_parent")]
    pub root_parent: i64,
}

/// A path pattern and the route name it resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route name, e.g. `entity.node.canonical`
    pub name: String,

    /// Path pattern, e.g. `/node/{node}`
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

// Default implementations

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            target_menus: Vec::new(),
            cache_misses: default_cache_misses(),
            cache_scope: CacheScope::default(),
            predicate_group: default_predicate_group(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            base_table: default_base_table(),
            base_field: default_base_field(),
            link_table: default_link_table(),
            join_condition: default_join_condition(),
            menu_column: default_menu_column(),
            parent_column: default_parent_column(),
            root_parent: default_root_parent(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            routes: default_routes(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        self.filter.menus()?;

        let identifiers = [
            ("schema.base_table", &self.schema.base_table),
            ("schema.base_field", &self.schema.base_field),
            ("schema.link_table", &self.schema.link_table),
            ("schema.menu_column", &self.schema.menu_column),
            ("schema.parent_column", &self.schema.parent_column),
        ];
        for (key, value) in identifiers {
            if !is_identifier(value) {
                return Err(Error::config(format!(
                    "{key} must be a plain SQL identifier, got '{value}'"
                )));
            }
        }

        if self.schema.join_condition.trim().is_empty() {
            return Err(Error::config("schema.join_condition cannot be empty"));
        }

        for route in &self.routing.routes {
            if route.name.is_empty() {
                return Err(Error::config(format!(
                    "Route for path '{}' has an empty name",
                    route.path
                )));
            }
            if !route.path.starts_with('/') {
                return Err(Error::config(format!(
                    "Route path '{}' must start with '/'",
                    route.path
                )));
            }
        }

        Ok(())
    }
}
