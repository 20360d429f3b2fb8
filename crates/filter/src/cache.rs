//! Memo of resolved route lookups
//!
//! Entries are authoritative until [`LinkResolutionCache::reset`]; nothing
//! invalidates them when menu content changes. Hosts that need fresh lookups
//! reset the cache at request boundaries.

use dashmap::DashMap;
use menu_children_core::{MenuLink, MenuScope, RouteDescriptor};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Cache key: `menu:route_name:value1:value2...`
///
/// Only parameter values take part, in key order. Two routes with the same
/// name and the same values under different keys share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(scope: &MenuScope, route: &RouteDescriptor) -> Self {
        let values: Vec<&str> = route.parameters().values().collect();
        let key = format!("{scope}:{}:{}", route.route_name(), values.join(":"));
        trace!("Built cache key {key}");
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached lookup outcome
#[derive(Debug, Clone)]
pub enum CachedLink {
    Found(Arc<MenuLink>),
    /// The lookup was performed and nothing matched
    NoMatch,
}

impl CachedLink {
    pub fn link(&self) -> Option<Arc<MenuLink>> {
        match self {
            CachedLink::Found(link) => Some(Arc::clone(link)),
            CachedLink::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Process-wide lookup cache, shared by every resolver it is handed to
#[derive(Debug, Default)]
pub struct LinkResolutionCache {
    entries: DashMap<CacheKey, CachedLink>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LinkResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<CachedLink> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn put(&self, key: CacheKey, value: CachedLink) {
        self.entries.insert(key, value);
    }

    /// Drop every entry and zero the counters
    pub fn reset(&self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Reset link resolution cache ({dropped} entries dropped)");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
