//! Filter clauses produced for a host query

use crate::menu::{LinkId, MenuLink, MenuName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value bound to a placeholder of a host query predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Integer(i64),
    Text(String),
    List(Vec<QueryValue>),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Integer(i) => write!(f, "{i}"),
            QueryValue::Text(s) => write!(f, "{s:?}"),
            QueryValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "({})", rendered.join(", "))
            }
        }
    }
}

/// Parent a child row must point at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// Top-level entries only
    Root,
    Link(LinkId),
}

/// A restriction applied to the joined menu link row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// The link must belong to one of these menus
    MenuMembership(Vec<MenuName>),
    /// The link's parent must equal this reference
    Parent(ParentRef),
}

impl FilterClause {
    /// Whether a link row satisfies this clause
    pub fn admits(&self, link: &MenuLink) -> bool {
        match self {
            FilterClause::MenuMembership(menus) => menus.contains(&link.menu),
            FilterClause::Parent(ParentRef::Root) => link.parent.is_none(),
            FilterClause::Parent(ParentRef::Link(id)) => link.parent.as_ref() == Some(id),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterClause::MenuMembership(menus) => {
                let names: Vec<String> = menus.iter().map(|m| format!("{:?}", m.as_str())).collect();
                write!(f, "menu IN ({})", names.join(", "))
            }
            FilterClause::Parent(ParentRef::Root) => f.write_str("parent = <root>"),
            FilterClause::Parent(ParentRef::Link(id)) => write!(f, "parent = {id}"),
        }
    }
}
