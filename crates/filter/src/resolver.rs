//! Search of candidate menus for the link of a route

use crate::cache::{CacheKey, CachedLink, LinkResolutionCache};
use crate::{LinkResolver, MenuLinkStore};
use menu_children_core::{CacheScope, Error, MenuLink, MenuName, MenuScope, RouteDescriptor};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves routes to menu links, consulting a shared [`LinkResolutionCache`]
///
/// Candidate menus are searched in order and the first menu with a matching
/// link wins. When a menu holds several links for the route, the first one in
/// storage order is taken.
///
/// With [`CacheScope::ShortCircuit`] (the default) the first cache entry met
/// for any candidate ends the search, even if a later candidate would match.
/// After an exhausted search a no-match marker is recorded under the key of the
/// first candidate, so a repeated search over the same menus stops there.
/// [`CacheScope::PerMenu`] records misses per menu and only skips that menu.
pub struct MenuLinkResolver {
    store: Arc<dyn MenuLinkStore>,
    cache: Arc<LinkResolutionCache>,
    scope: CacheScope,
    cache_misses: bool,
}

impl MenuLinkResolver {
    pub fn new(store: Arc<dyn MenuLinkStore>, cache: Arc<LinkResolutionCache>) -> Self {
        Self {
            store,
            cache,
            scope: CacheScope::default(),
            cache_misses: true,
        }
    }

    pub fn with_cache_scope(mut self, scope: CacheScope) -> Self {
        self.scope = scope;
        self
    }

    /// Whether exhausted searches leave a no-match marker behind
    pub fn with_cache_misses(mut self, cache_misses: bool) -> Self {
        self.cache_misses = cache_misses;
        self
    }

    pub fn cache(&self) -> &Arc<LinkResolutionCache> {
        &self.cache
    }

    /// Query storage for one candidate, keeping the first link returned
    fn lookup(&self, scope: &MenuScope, route: &RouteDescriptor) -> Result<Option<MenuLink>, Error> {
        debug!("Looking up links for {route} in {scope}");
        let links =
            self.store
                .load_links_by_route(route.route_name(), route.parameters(), scope.menu())?;

        if links.len() > 1 {
            warn!(
                "{} links in {scope} point at {route}; using the first one",
                links.len()
            );
        }

        Ok(links.into_iter().next())
    }

    fn resolve_short_circuit(
        &self,
        candidates: &[MenuScope],
        route: &RouteDescriptor,
    ) -> Result<Option<Arc<MenuLink>>, Error> {
        for scope in candidates {
            let key = CacheKey::new(scope, route);

            if let Some(cached) = self.cache.get(&key) {
                debug!("Cache hit for {key}");
                return Ok(cached.link());
            }

            if let Some(link) = self.lookup(scope, route)? {
                let link = Arc::new(link);
                self.cache.put(key, CachedLink::Found(Arc::clone(&link)));
                return Ok(Some(link));
            }
        }

        if self.cache_misses {
            if let Some(first) = candidates.first() {
                self.cache
                    .put(CacheKey::new(first, route), CachedLink::NoMatch);
            }
        }

        debug!("No link found for {route}");
        Ok(None)
    }

    fn resolve_per_menu(
        &self,
        candidates: &[MenuScope],
        route: &RouteDescriptor,
    ) -> Result<Option<Arc<MenuLink>>, Error> {
        for scope in candidates {
            let key = CacheKey::new(scope, route);

            match self.cache.get(&key) {
                Some(CachedLink::Found(link)) => {
                    debug!("Cache hit for {key}");
                    return Ok(Some(link));
                }
                Some(CachedLink::NoMatch) => {
                    debug!("Cached miss for {key}, trying next menu");
                    continue;
                }
                None => {}
            }

            match self.lookup(scope, route)? {
                Some(link) => {
                    let link = Arc::new(link);
                    self.cache.put(key, CachedLink::Found(Arc::clone(&link)));
                    return Ok(Some(link));
                }
                None if self.cache_misses => self.cache.put(key, CachedLink::NoMatch),
                None => {}
            }
        }

        debug!("No link found for {route}");
        Ok(None)
    }
}

impl LinkResolver for MenuLinkResolver {
    fn resolve_link(
        &self,
        menus: &[MenuName],
        route: &RouteDescriptor,
    ) -> Result<Option<Arc<MenuLink>>, Error> {
        if !route.is_routed() {
            debug!("Route without a name, skipping link lookup");
            return Ok(None);
        }

        let candidates = MenuScope::candidates(menus);
        match self.scope {
            CacheScope::ShortCircuit => self.resolve_short_circuit(&candidates, route),
            CacheScope::PerMenu => self.resolve_per_menu(&candidates, route),
        }
    }

    fn reset_cache(&self) {
        self.cache.reset();
    }
}
