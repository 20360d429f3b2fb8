//! Default values and functions for configuration

use super::RouteConfig;
use crate::route::NODE_CANONICAL_ROUTE;

// Default constants
pub(crate) const DEFAULT_BASE_TABLE: &str = "node_field_data";
pub(crate) const DEFAULT_BASE_FIELD: &str = "nid";
pub(crate) const DEFAULT_LINK_TABLE: &str = "menu_link_content_data";
pub(crate) const DEFAULT_JOIN_CONDITION: &str =
    "menu_link_content_data.link__uri = CONCAT('entity:node/', node_field_data.nid)";
pub(crate) const DEFAULT_MENU_COLUMN: &str = "menu_name";
pub(crate) const DEFAULT_PARENT_COLUMN: &str = "parent";
pub(crate) const DEFAULT_NODE_ROUTE_PATH: &str = "/node/{node}";

pub(crate) fn default_cache_misses() -> bool {
    true
}

pub(crate) fn default_predicate_group() -> u32 {
    0
}

pub(crate) fn default_base_table() -> String {
    DEFAULT_BASE_TABLE.to_string()
}

pub(crate) fn default_base_field() -> String {
    DEFAULT_BASE_FIELD.to_string()
}

pub(crate) fn default_link_table() -> String {
    DEFAULT_LINK_TABLE.to_string()
}

pub(crate) fn default_join_condition() -> String {
    DEFAULT_JOIN_CONDITION.to_string()
}

pub(crate) fn default_menu_column() -> String {
    DEFAULT_MENU_COLUMN.to_string()
}

pub(crate) fn default_parent_column() -> String {
    DEFAULT_PARENT_COLUMN.to_string()
}

/// Parent value stored on top-level links
pub fn default_root_parent() -> i64 {
    0
}

pub(crate) fn default_routes() -> Vec<RouteConfig> {
    vec![RouteConfig {
        name: NODE_CANONICAL_ROUTE.to_string(),
        path: DEFAULT_NODE_ROUTE_PATH.to_string(),
    }]
}
