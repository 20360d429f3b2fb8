use crate::cache::LinkResolutionCache;
use crate::orchestrator::MenuChildrenFilter;
use crate::query::QueryFilterBuilder;
use crate::resolver::MenuLinkResolver;
use crate::routing::{PatternRouter, RouteResolver};
use crate::{MenuLinkStore, PathRouter};
use menu_children_core::{Config, Error};
use std::sync::Arc;

/// Creates a filter from configuration.
///
/// Routes come from `[routing]`, cache behavior from `[filter]` and table
/// names from `[schema]`. The returned filter owns a fresh cache.
///
/// # Errors
/// Returns an error if the configuration is invalid or a route pattern
/// cannot be registered
///
/// # Example
/// ```ignore
/// let config = Config::load(None)?;
/// let store = Arc::new(InMemoryLinkStore::from_json_file(path)?);
/// let filter = create_filter(&config, store)?;
/// ```
pub fn create_filter(
    config: &Config,
    store: Arc<dyn MenuLinkStore>,
) -> Result<MenuChildrenFilter, Error> {
    let router = PatternRouter::from_config(&config.routing.routes)?;
    create_filter_with_router(config, Arc::new(router), store)
}

/// Creates a filter from configuration around a caller-supplied router.
pub fn create_filter_with_router(
    config: &Config,
    router: Arc<dyn PathRouter>,
    store: Arc<dyn MenuLinkStore>,
) -> Result<MenuChildrenFilter, Error> {
    config.validate()?;

    let resolver = MenuLinkResolver::new(store, Arc::new(LinkResolutionCache::new()))
        .with_cache_scope(config.filter.cache_scope)
        .with_cache_misses(config.filter.cache_misses);

    Ok(MenuChildrenFilter::new(
        RouteResolver::new(router),
        Arc::new(resolver),
        QueryFilterBuilder::from_config(config),
    ))
}
