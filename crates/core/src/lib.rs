//! Core types for the menu children filter
//!
//! This crate provides the foundational types shared by the resolver, the
//! query filter and the CLI:
//!
//! - **Routes**: canonical route descriptors a page reference resolves to
//! - **Menus**: menu names, search scopes and menu links
//! - **Filters**: clauses applied to a host query
//! - **Configuration**: operator options and host schema
//! - **Error handling**: unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod filter;
pub mod menu;
pub mod route;

// Re-export main types for convenience
pub use config::{CacheScope, Config, FilterConfig, RouteConfig, RoutingConfig, SchemaConfig};
pub use error::{Error, Result, ResultExt};
pub use filter::{FilterClause, ParentRef, QueryValue};
pub use menu::{LinkId, MenuLink, MenuLinkBuilder, MenuName, MenuScope};
pub use route::{RouteDescriptor, RouteParameters, NODE_CANONICAL_ROUTE, NODE_PARAMETER};
