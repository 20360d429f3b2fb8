//! In-memory menu link storage

use crate::MenuLinkStore;
use menu_children_core::{Error, MenuLink, MenuName, ResultExt, RouteParameters};
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Link fixture file layout: `{"links": [...]}`
#[derive(Debug, Deserialize)]
struct LinkFixture {
    links: Vec<MenuLink>,
}

/// Menu links held in memory, matched by route name and exact parameters
///
/// Links are returned in insertion order. Every lookup is counted, which tests
/// use to observe cache behavior.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: Vec<MenuLink>,
    lookups: AtomicUsize,
}

impl InMemoryLinkStore {
    pub fn new(links: Vec<MenuLink>) -> Self {
        Self {
            links,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, Error> {
        let fixture: LinkFixture = serde_json::from_str(content)
            .map_err(|e| Error::storage(format!("Failed to parse link fixture: {e}")))?;
        Ok(Self::new(fixture.links))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read link fixture {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn links(&self) -> &[MenuLink] {
        &self.links
    }

    /// Number of lookups served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl MenuLinkStore for InMemoryLinkStore {
    fn load_links_by_route(
        &self,
        route_name: &str,
        parameters: &RouteParameters,
        menu: Option<&MenuName>,
    ) -> Result<Vec<MenuLink>, Error> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .links
            .iter()
            .filter(|link| {
                link.route.route_name() == route_name
                    && link.route.parameters() == parameters
                    && menu.is_none_or(|m| &link.menu == m)
            })
            .cloned()
            .collect())
    }
}
