//! Menus and menu links

use crate::error::{Error, Result};
use crate::route::RouteDescriptor;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine name of a menu (a named tree of links)
///
/// Only lowercase ASCII letters, digits, `_` and `-` are accepted, which keeps
/// every real menu name distinct from the [`MenuScope::All`] cache segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MenuName(String);

impl MenuName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_input("Menu name cannot be empty"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-'))
        {
            return Err(Error::invalid_input(format!(
                "Invalid character '{c}' in menu name '{name}'"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MenuName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MenuName> for String {
    fn from(value: MenuName) -> Self {
        value.0
    }
}

impl AsRef<str> for MenuName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate in a link search: a single menu, or every known menu
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MenuScope {
    All,
    Menu(MenuName),
}

impl MenuScope {
    /// Segment used for this scope in cache keys
    pub const ALL_SEGMENT: &'static str = "*";

    /// Candidate scopes for a configured menu list; empty means every menu
    pub fn candidates(menus: &[MenuName]) -> Vec<MenuScope> {
        if menus.is_empty() {
            vec![MenuScope::All]
        } else {
            menus.iter().cloned().map(MenuScope::Menu).collect()
        }
    }

    /// The menu to restrict a storage lookup to, `None` for an unrestricted search
    pub fn menu(&self) -> Option<&MenuName> {
        match self {
            MenuScope::All => None,
            MenuScope::Menu(name) => Some(name),
        }
    }
}

impl fmt::Display for MenuScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuScope::All => f.write_str(Self::ALL_SEGMENT),
            MenuScope::Menu(name) => f.write_str(name.as_str()),
        }
    }
}

/// Identifier of a menu link, as assigned by the link storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LinkId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node of a menu tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct MenuLink {
    /// Identifier of the link
    pub id: LinkId,

    /// Parent link, `None` for a top-level link
    #[builder(default = "None")]
    #[serde(default)]
    pub parent: Option<LinkId>,

    /// Menu the link belongs to
    pub menu: MenuName,

    /// Route the link points at
    pub route: RouteDescriptor,

    /// Human readable label
    #[builder(default = "None")]
    #[serde(default)]
    pub title: Option<String>,
}

impl MenuLink {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
