//! SQL host query
//!
//! Records joins and grouped predicates and renders them as PostgreSQL text
//! with positional binds. Predicates name their values with placeholders
//! (`:parent_lid`, `:menus[]`); a list value expands to one bind per item.

use crate::HostQuery;
use menu_children_core::{Error, QueryValue, SchemaConfig};
use sqlx::{Postgres, QueryBuilder};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub expression: String,
    pub args: Vec<(String, QueryValue)>,
}

/// SQL text plus the values bound to `$1..$n`, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery {
    pub sql: String,
    pub binds: Vec<QueryValue>,
}

#[derive(Debug, Clone)]
pub struct SqlQuery {
    base_table: String,
    fields: Vec<String>,
    joins: Vec<Join>,
    groups: BTreeMap<u32, Vec<Predicate>>,
}

impl SqlQuery {
    pub fn new(base_table: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            base_table: base_table.into(),
            fields,
            joins: Vec::new(),
            groups: BTreeMap::new(),
        }
    }

    /// `SELECT base_table.base_field FROM base_table`
    pub fn from_schema(schema: &SchemaConfig) -> Self {
        Self::new(
            schema.base_table.as_str(),
            vec![format!("{}.{}", schema.base_table, schema.base_field)],
        )
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Predicates of one where-group, in insertion order
    pub fn group(&self, group: u32) -> &[Predicate] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predicate_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn render(&self) -> Result<RenderedQuery, Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM {}",
            self.fields.join(", "),
            self.base_table
        ));
        let mut binds = Vec::new();

        for join in &self.joins {
            builder.push(format!(" LEFT JOIN {} ON {}", join.table, join.condition));
        }

        let mut first = true;
        for predicate in self.groups.values().flatten() {
            builder.push(if first { " WHERE (" } else { " AND (" });
            first = false;
            push_expression(&mut builder, &mut binds, predicate)?;
            builder.push(")");
        }

        Ok(RenderedQuery {
            sql: builder.sql().to_string(),
            binds,
        })
    }
}

impl HostQuery for SqlQuery {
    fn add_join(&mut self, table: &str, condition: &str) {
        let join = Join {
            table: table.to_string(),
            condition: condition.to_string(),
        };
        if !self.joins.contains(&join) {
            self.joins.push(join);
        }
    }

    fn add_predicate(&mut self, group: u32, expression: &str, args: Vec<(String, QueryValue)>) {
        self.groups.entry(group).or_default().push(Predicate {
            expression: expression.to_string(),
            args,
        });
    }
}

/// Copy the expression into the builder, replacing placeholders with binds
fn push_expression(
    builder: &mut QueryBuilder<'_, Postgres>,
    binds: &mut Vec<QueryValue>,
    predicate: &Predicate,
) -> Result<(), Error> {
    let expr = predicate.expression.as_str();
    let mut literal_start = 0;
    let mut chars = expr.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != ':' {
            continue;
        }
        // `::type` casts are literal text
        if let Some(&(_, ':')) = chars.peek() {
            chars.next();
            continue;
        }

        let mut end = start + 1;
        while let Some(&(i, ch)) = chars.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                end = i + ch.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        if end == start + 1 {
            continue;
        }
        if expr[end..].starts_with("[]") {
            end += 2;
            chars.next();
            chars.next();
        }

        let name = &expr[start..end];
        let value = predicate
            .args
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::query(format!("Unbound placeholder {name} in '{expr}'")))?;

        builder.push(&expr[literal_start..start]);
        push_value(builder, binds, value, name)?;
        literal_start = end;
    }

    builder.push(&expr[literal_start..]);
    Ok(())
}

fn push_value(
    builder: &mut QueryBuilder<'_, Postgres>,
    binds: &mut Vec<QueryValue>,
    value: &QueryValue,
    name: &str,
) -> Result<(), Error> {
    match value {
        QueryValue::Integer(i) => {
            builder.push_bind(*i);
        }
        QueryValue::Text(s) => {
            builder.push_bind(s.clone());
        }
        QueryValue::List(items) => {
            if items.is_empty() {
                return Err(Error::query(format!("Empty list bound to {name}")));
            }
            let mut separated = builder.separated(", ");
            for item in items {
                match item {
                    QueryValue::Integer(i) => {
                        separated.push_bind(*i);
                    }
                    QueryValue::Text(s) => {
                        separated.push_bind(s.clone());
                    }
                    QueryValue::List(_) => {
                        return Err(Error::query(format!("Nested list bound to {name}")));
                    }
                }
                binds.push(item.clone());
            }
            return Ok(());
        }
    }
    binds.push(value.clone());
    Ok(())
}
