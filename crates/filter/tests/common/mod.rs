//! Test utilities for filter integration tests

#![allow(dead_code)]

use menu_children_core::{
    Config, Error, LinkId, MenuLink, MenuLinkBuilder, MenuName, QueryValue, RouteDescriptor,
    RouteParameters,
};
use menu_children_filter::{
    create_filter, HostQuery, InMemoryLinkStore, MenuChildrenFilter, MenuLinkStore, PathRouter,
};
use std::sync::Arc;

/// Create a menu name, panicking on invalid input
#[allow(dead_code)]
pub fn menu(name: &str) -> MenuName {
    MenuName::new(name).expect("valid menu name")
}

/// Create a link pointing at the canonical page of `node`
#[allow(dead_code)]
pub fn node_link(id: &str, parent: Option<&str>, menu_name: &str, node: u64) -> MenuLink {
    MenuLinkBuilder::default()
        .id(id)
        .parent(parent.map(LinkId::from))
        .menu(menu(menu_name))
        .route(RouteDescriptor::node(node))
        .build()
        .expect("Failed to build test link")
}

/// Filter over an in-memory store, built from the default configuration
#[allow(dead_code)]
pub fn filter_over(links: Vec<MenuLink>) -> (MenuChildrenFilter, Arc<InMemoryLinkStore>) {
    let store = Arc::new(InMemoryLinkStore::new(links));
    let filter =
        create_filter(&Config::default(), store.clone()).expect("Failed to create filter");
    (filter, store)
}

/// One call received by a [`RecordingQuery`]
#[derive(Debug, Clone, PartialEq)]
pub enum QueryCall {
    Join {
        table: String,
        condition: String,
    },
    Predicate {
        group: u32,
        expression: String,
        args: Vec<(String, QueryValue)>,
    },
}

/// Host query that records calls in order
#[derive(Debug, Default)]
pub struct RecordingQuery {
    pub calls: Vec<QueryCall>,
}

#[allow(dead_code)]
impl RecordingQuery {
    pub fn predicates(&self) -> Vec<&QueryCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, QueryCall::Predicate { .. }))
            .collect()
    }
}

impl HostQuery for RecordingQuery {
    fn add_join(&mut self, table: &str, condition: &str) {
        self.calls.push(QueryCall::Join {
            table: table.to_string(),
            condition: condition.to_string(),
        });
    }

    fn add_predicate(&mut self, group: u32, expression: &str, args: Vec<(String, QueryValue)>) {
        self.calls.push(QueryCall::Predicate {
            group,
            expression: expression.to_string(),
            args,
        });
    }
}

/// Storage that always fails
#[allow(dead_code)]
pub struct FailingStore;

impl MenuLinkStore for FailingStore {
    fn load_links_by_route(
        &self,
        _route_name: &str,
        _parameters: &RouteParameters,
        _menu: Option<&MenuName>,
    ) -> Result<Vec<MenuLink>, Error> {
        Err(Error::storage("menu tree unavailable"))
    }
}

/// Router that always fails
#[allow(dead_code)]
pub struct FailingRouter;

impl PathRouter for FailingRouter {
    fn resolve_path(&self, _path: &str) -> Result<Option<RouteDescriptor>, Error> {
        Err(Error::routing("router offline"))
    }
}
