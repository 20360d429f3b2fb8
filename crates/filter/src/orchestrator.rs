//! Entry point wiring a page reference and the target menus into a host query

use crate::query::QueryFilterBuilder;
use crate::routing::RouteResolver;
use crate::{HostQuery, LinkResolver};
use menu_children_core::{Error, FilterClause, MenuLink, MenuName, RouteDescriptor};
use std::sync::Arc;
use tracing::debug;

/// Clauses applied by [`MenuChildrenFilter::apply`]
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Menu restriction, present whenever menus were given
    pub membership: Option<FilterClause>,
    /// Parent restriction, present only when a page reference was supplied
    pub parent: Option<ParentFilter>,
}

/// Result of the parent pass for a supplied page reference
#[derive(Debug, Clone)]
pub struct ParentFilter {
    /// Route the reference resolved to, `None` when it could not be routed
    pub route: Option<RouteDescriptor>,
    /// Link found for the route
    pub link: Option<Arc<MenuLink>>,
    pub clause: FilterClause,
}

/// Restricts a host query to the children of the link a page reference points at
///
/// Two passes run against the query:
/// 1. the link table is joined and, when menus are configured, restricted to
///    them; this happens whether or not a reference is supplied;
/// 2. for a non-empty reference, the parent of the joined link must be the
///    resolved link, or the root when nothing resolves.
///
/// An absent or empty reference skips the second pass entirely. That is not
/// the same as a reference that resolves to nothing, which restricts the query
/// to top-level links.
pub struct MenuChildrenFilter {
    routes: RouteResolver,
    links: Arc<dyn LinkResolver>,
    clauses: QueryFilterBuilder,
}

impl MenuChildrenFilter {
    pub fn new(
        routes: RouteResolver,
        links: Arc<dyn LinkResolver>,
        clauses: QueryFilterBuilder,
    ) -> Self {
        Self {
            routes,
            links,
            clauses,
        }
    }

    pub fn clauses(&self) -> &QueryFilterBuilder {
        &self.clauses
    }

    pub fn apply(
        &self,
        query: &mut dyn HostQuery,
        raw_input: Option<&str>,
        menus: &[MenuName],
    ) -> Result<FilterOutcome, Error> {
        let membership = self.set_relationship(query, menus);

        let parent = match raw_input.filter(|input| !input.is_empty()) {
            Some(input) => Some(self.filter_children(query, input, menus)?),
            None => {
                debug!("No page reference supplied, parent left unrestricted");
                None
            }
        };

        Ok(FilterOutcome { membership, parent })
    }

    /// Join the link table and restrict it to `menus`
    pub fn set_relationship(
        &self,
        query: &mut dyn HostQuery,
        menus: &[MenuName],
    ) -> Option<FilterClause> {
        self.clauses.join(query);
        let clause = self.clauses.tree_membership_clause(menus);
        if let Some(clause) = &clause {
            self.clauses.apply(query, clause);
        }
        clause
    }

    /// Restrict the joined links to the children of the link `input` points at
    pub fn filter_children(
        &self,
        query: &mut dyn HostQuery,
        input: &str,
        menus: &[MenuName],
    ) -> Result<ParentFilter, Error> {
        let (route, link) = self.resolve(input, menus)?;
        let clause = self.clauses.parent_clause(link.as_deref());
        self.clauses.apply(query, &clause);

        Ok(ParentFilter {
            route,
            link,
            clause,
        })
    }

    /// Resolve a page reference to its route and the link found for it
    pub fn resolve(
        &self,
        input: &str,
        menus: &[MenuName],
    ) -> Result<(Option<RouteDescriptor>, Option<Arc<MenuLink>>), Error> {
        let route = self.routes.resolve(input)?;
        let link = match &route {
            Some(route) => self.links.resolve_link(menus, route)?,
            None => {
                debug!("Page reference '{input}' did not resolve to a route");
                None
            }
        };
        Ok((route, link))
    }

    /// Forget cached link lookups, e.g. at a request boundary
    pub fn reset_cache(&self) {
        self.links.reset_cache();
    }
}
