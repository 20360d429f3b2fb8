//! Page reference normalization and path routing

use crate::PathRouter;
use matchit::Router;
use menu_children_core::{Error, RouteConfig, RouteDescriptor, RouteParameters};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Turns a raw page reference into a route descriptor
///
/// Numeric references ("42") map to the canonical node route. Anything else is
/// treated as a path, normalized to a single leading `/` and handed to the
/// [`PathRouter`].
pub struct RouteResolver {
    router: Arc<dyn PathRouter>,
}

impl RouteResolver {
    pub fn new(router: Arc<dyn PathRouter>) -> Self {
        Self { router }
    }

    /// Resolve a page reference; `Ok(None)` when the path matches no route
    pub fn resolve(&self, input: &str) -> Result<Option<RouteDescriptor>, Error> {
        if let Some(id) = parse_node_id(input) {
            return Ok(Some(RouteDescriptor::node(id)));
        }

        let path = normalize_path(input);
        let route = self.router.resolve_path(&path)?;
        if route.is_none() {
            debug!("No route for path {path}");
        }
        Ok(route)
    }
}

/// Node id of a numeric reference, ignoring surrounding whitespace
pub fn parse_node_id(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// `node/42/` -> `/node/42`
///
/// Only separators are stripped; whitespace is part of the path.
pub fn normalize_path(input: &str) -> String {
    format!("/{}", input.trim_matches('/'))
}

/// [`PathRouter`] over path patterns such as `/node/{node}`
///
/// Parameters come back in the order they appear in the pattern.
pub struct PatternRouter {
    router: Router<String>,
    patterns: Vec<RouteConfig>,
}

impl PatternRouter {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            patterns: Vec::new(),
        }
    }

    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, Error> {
        let mut router = Self::new();
        for route in routes {
            router.insert(&route.name, &route.path)?;
        }
        Ok(router)
    }

    pub fn insert(&mut self, name: &str, path: &str) -> Result<(), Error> {
        self.router
            .insert(path, name.to_string())
            .map_err(|e| Error::config(format!("Invalid route pattern '{path}': {e}")))?;
        self.patterns.push(RouteConfig {
            name: name.to_string(),
            path: path.to_string(),
        });
        Ok(())
    }
}

impl Default for PatternRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PatternRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRouter")
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl PathRouter for PatternRouter {
    fn resolve_path(&self, path: &str) -> Result<Option<RouteDescriptor>, Error> {
        match self.router.at(path) {
            Ok(matched) => {
                let parameters: RouteParameters = matched.params.iter().collect();
                Ok(Some(RouteDescriptor::new(matched.value.as_str(), parameters)))
            }
            Err(_) => Ok(None),
        }
    }
}
