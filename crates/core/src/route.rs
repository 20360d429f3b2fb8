//! Canonical route descriptors
//!
//! A page reference supplied by a user ("42", "node/42", "/about/team") is
//! normalized into a [`RouteDescriptor`]: a route name plus an ordered set of
//! parameters. Menu links are stored against the same descriptors, which is
//! what makes a lookup by route possible.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Route name used for "entity by numeric id" references
pub const NODE_CANONICAL_ROUTE: &str = "entity.node.canonical";

/// Parameter key carried by [`NODE_CANONICAL_ROUTE`]
pub const NODE_PARAMETER: &str = "node";

/// Ordered route parameters
///
/// Keys keep their insertion order. Keys whose value is absent are dropped on
/// construction, so a descriptor never carries a key without a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteParameters {
    entries: Vec<(String, String)>,
}

impl RouteParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from optional values, dropping every `None`
    pub fn from_optional<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            if let Some(value) = value {
                params.insert(key, value);
            }
        }
        params
    }

    /// Insert a parameter, replacing the value of an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameter values in key order, without their keys
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl Serialize for RouteParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for RouteParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ParametersVisitor)
    }
}

struct ParametersVisitor;

impl<'de> Visitor<'de> for ParametersVisitor {
    type Value = RouteParameters;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of route parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut params = RouteParameters::new();
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            let text = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "route parameter '{key}' must be a scalar value"
                    )));
                }
            };
            params.insert(key, text);
        }
        Ok(params)
    }
}

/// A canonical (route name, parameters) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteDescriptor {
    name: String,
    #[serde(default)]
    parameters: RouteParameters,
}

impl RouteDescriptor {
    pub fn new(name: impl Into<String>, parameters: RouteParameters) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Descriptor for the canonical page of the entity with the given id
    pub fn node(id: u64) -> Self {
        let mut parameters = RouteParameters::new();
        parameters.insert(NODE_PARAMETER, id.to_string());
        Self::new(NODE_CANONICAL_ROUTE, parameters)
    }

    pub fn route_name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &RouteParameters {
        &self.parameters
    }

    /// A descriptor without a route name cannot be looked up
    pub fn is_routed(&self) -> bool {
        !self.name.is_empty()
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            let rendered: Vec<String> = self
                .parameters
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            write!(f, " {{{}}}", rendered.join(", "))?;
        }
        Ok(())
    }
}
