//! Menu children filtering
//!
//! Resolves a page reference (a node id or a path) to a link in one of the
//! configured menus, then restricts a host query to the children of that link,
//! or to top-level links when the reference resolves to nothing.
//!
//! The collaborators around the core are traits: [`PathRouter`] turns paths
//! into routes, [`MenuLinkStore`] answers link lookups and [`HostQuery`]
//! receives joins and predicates. Reference implementations of each live in
//! [`routing`], [`memory`] and [`sql`].

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod cache;
mod factory;
pub mod memory;
pub mod orchestrator;
pub mod query;
pub mod resolver;
pub mod routing;
pub mod sql;

pub use cache::{CacheKey, CacheStats, CachedLink, LinkResolutionCache};
pub use factory::{create_filter, create_filter_with_router};
pub use memory::InMemoryLinkStore;
pub use orchestrator::{FilterOutcome, MenuChildrenFilter, ParentFilter};
pub use query::QueryFilterBuilder;
pub use resolver::MenuLinkResolver;
pub use routing::{PatternRouter, RouteResolver};
pub use sql::{Join, Predicate, RenderedQuery, SqlQuery};

use menu_children_core::{
    Error, MenuLink, MenuName, QueryValue, RouteDescriptor, RouteParameters,
};
use std::sync::Arc;

// ==== Traits ====

/// Routing collaborator: maps a normalized path to a canonical route
pub trait PathRouter: Send + Sync {
    /// Resolve a path such as `/node/42`
    ///
    /// Returns `Ok(None)` when no route matches. An `Err` is a failure of the
    /// router itself and aborts the filter.
    fn resolve_path(&self, path: &str) -> Result<Option<RouteDescriptor>, Error>;
}

/// Storage collaborator holding the menu trees
pub trait MenuLinkStore: Send + Sync {
    /// Load the links pointing at a route, in storage order
    ///
    /// `menu` restricts the search to one menu; `None` searches every menu.
    fn load_links_by_route(
        &self,
        route_name: &str,
        parameters: &RouteParameters,
        menu: Option<&MenuName>,
    ) -> Result<Vec<MenuLink>, Error>;
}

/// Host query capability the filter writes into
pub trait HostQuery {
    /// Join `table` to the primary table on `condition`
    fn add_join(&mut self, table: &str, condition: &str);

    /// Add a predicate to a where-group; every predicate is ANDed with the rest
    ///
    /// `expression` refers to its values through named placeholders
    /// (`:parent_lid`, `:menus[]`) listed in `args`.
    fn add_predicate(&mut self, group: u32, expression: &str, args: Vec<(String, QueryValue)>);
}

/// Finds the link for a route among candidate menus
pub trait LinkResolver: Send + Sync {
    /// Resolve `route` against `menus` in order; an empty list searches every menu
    fn resolve_link(
        &self,
        menus: &[MenuName],
        route: &RouteDescriptor,
    ) -> Result<Option<Arc<MenuLink>>, Error>;

    /// Forget every cached lookup
    fn reset_cache(&self);
}
