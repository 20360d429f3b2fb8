//! Translation of filter clauses into host query instructions

use crate::HostQuery;
use menu_children_core::{
    Config, FilterClause, MenuLink, MenuName, ParentRef, QueryValue, SchemaConfig,
};
use tracing::debug;

const MENUS_PLACEHOLDER: &str = ":menus[]";
const PARENT_PLACEHOLDER: &str = ":parent_lid";

/// Builds the menu membership and parent clauses and writes them into a
/// [`HostQuery`]
///
/// Every clause lands in the same where-group, so the clauses combine with
/// each other and with the host's own predicates as a plain conjunction.
#[derive(Debug, Clone)]
pub struct QueryFilterBuilder {
    schema: SchemaConfig,
    group: u32,
}

impl QueryFilterBuilder {
    pub fn new(schema: SchemaConfig, group: u32) -> Self {
        Self { schema, group }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.schema.clone(), config.filter.predicate_group)
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// Restrict links to `menus`; `None` when no menus are given
    pub fn tree_membership_clause(&self, menus: &[MenuName]) -> Option<FilterClause> {
        let mut unique: Vec<MenuName> = Vec::with_capacity(menus.len());
        for menu in menus {
            if !unique.contains(menu) {
                unique.push(menu.clone());
            }
        }
        if unique.is_empty() {
            None
        } else {
            Some(FilterClause::MenuMembership(unique))
        }
    }

    /// Require children of `link`, or top-level links when there is none
    pub fn parent_clause(&self, link: Option<&MenuLink>) -> FilterClause {
        match link {
            Some(link) => FilterClause::Parent(ParentRef::Link(link.id.clone())),
            None => FilterClause::Parent(ParentRef::Root),
        }
    }

    /// Join the link table to the primary table
    pub fn join(&self, query: &mut dyn HostQuery) {
        query.add_join(&self.schema.link_table, &self.schema.join_condition);
    }

    pub fn apply(&self, query: &mut dyn HostQuery, clause: &FilterClause) {
        let table = &self.schema.link_table;
        match clause {
            FilterClause::MenuMembership(menus) => {
                let names = menus
                    .iter()
                    .map(|m| QueryValue::Text(m.as_str().to_string()))
                    .collect();
                query.add_predicate(
                    self.group,
                    &format!("{table}.{} IN ({MENUS_PLACEHOLDER})", self.schema.menu_column),
                    vec![(MENUS_PLACEHOLDER.to_string(), QueryValue::List(names))],
                );
            }
            FilterClause::Parent(parent) => {
                // Root and link ids bind as text so both compare against one column type
                let value = match parent {
                    ParentRef::Root => QueryValue::Text(self.schema.root_parent.to_string()),
                    ParentRef::Link(id) => QueryValue::Text(id.as_str().to_string()),
                };
                query.add_predicate(
                    self.group,
                    &format!("{table}.{} = {PARENT_PLACEHOLDER}", self.schema.parent_column),
                    vec![(PARENT_PLACEHOLDER.to_string(), value)],
                );
            }
        }
        debug!("Applied clause {clause}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{Join, SqlQuery};
    use menu_children_core::{LinkId, MenuLinkBuilder, RouteDescriptor};
    use pretty_assertions::assert_eq;

    fn builder() -> QueryFilterBuilder {
        QueryFilterBuilder::from_config(&Config::default())
    }

    fn menu(name: &str) -> MenuName {
        MenuName::new(name).unwrap()
    }

    #[test]
    fn test_membership_clause_empty_is_none() {
        assert_eq!(builder().tree_membership_clause(&[]), None);
    }

    #[test]
    fn test_membership_clause_deduplicates() {
        let clause = builder().tree_membership_clause(&[menu("main"), menu("footer"), menu("main")]);
        assert_eq!(
            clause,
            Some(FilterClause::MenuMembership(vec![menu("main"), menu("footer")]))
        );
    }

    #[test]
    fn test_parent_clause() {
        let link = MenuLinkBuilder::default()
            .id("7")
            .parent(LinkId::from("3"))
            .menu(menu("main"))
            .route(RouteDescriptor::node(42))
            .build()
            .unwrap();
        assert_eq!(
            builder().parent_clause(Some(&link)),
            FilterClause::Parent(ParentRef::Link(LinkId::from("7")))
        );
        assert_eq!(
            builder().parent_clause(None),
            FilterClause::Parent(ParentRef::Root)
        );
    }

    #[test]
    fn test_apply_writes_predicates() {
        let builder = builder();
        let mut query = SqlQuery::from_schema(builder.schema());
        builder.join(&mut query);
        builder.apply(
            &mut query,
            &FilterClause::MenuMembership(vec![menu("main")]),
        );
        builder.apply(&mut query, &FilterClause::Parent(ParentRef::Root));

        assert_eq!(
            query.joins(),
            &[Join {
                table: "menu_link_content_data".to_string(),
                condition: "menu_link_content_data.link__uri = CONCAT('entity:node/', node_field_data.nid)"
                    .to_string(),
            }]
        );
        let group = query.group(0);
        assert_eq!(group.len(), 2);
        assert_eq!(
            group[0].expression,
            "menu_link_content_data.menu_name IN (:menus[])"
        );
        assert_eq!(
            group[1].expression,
            "menu_link_content_data.parent = :parent_lid"
        );
        assert_eq!(
            group[1].args,
            vec![(":parent_lid".to_string(), QueryValue::Text("0".to_string()))]
        );
    }

    #[test]
    fn test_root_and_link_parents_bind_same_type() {
        let builder = builder();
        let mut query = SqlQuery::from_schema(builder.schema());
        builder.apply(&mut query, &FilterClause::Parent(ParentRef::Root));
        builder.apply(
            &mut query,
            &FilterClause::Parent(ParentRef::Link(LinkId::from("7"))),
        );

        let rendered = query.render().unwrap();
        assert_eq!(
            rendered.binds,
            vec![
                QueryValue::Text("0".to_string()),
                QueryValue::Text("7".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_uses_configured_group_and_root() {
        let mut config = Config::default();
        config.filter.predicate_group = 2;
        config.schema.root_parent = -1;
        let builder = QueryFilterBuilder::from_config(&config);
        let mut query = SqlQuery::from_schema(builder.schema());
        builder.apply(&mut query, &FilterClause::Parent(ParentRef::Root));

        assert!(query.group(0).is_empty());
        assert_eq!(
            query.group(2)[0].args,
            vec![(":parent_lid".to_string(), QueryValue::Text("-1".to_string()))]
        );
    }
}
