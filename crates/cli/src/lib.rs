//! Library interface for the menu-children CLI
//!
//! Command handlers live here so they can be tested without spawning the
//! binary; main.rs only parses arguments and prints.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use menu_children_core::{Config, MenuName};
use menu_children_filter::{create_filter, InMemoryLinkStore, MenuChildrenFilter, SqlQuery};
use std::path::Path;
use std::sync::Arc;

/// Build a filter over the links of a JSON fixture
pub fn load_filter(config: &Config, links_path: &Path) -> Result<MenuChildrenFilter> {
    let store = InMemoryLinkStore::from_json_file(links_path)
        .with_context(|| format!("Failed to load links from {}", links_path.display()))?;
    create_filter(config, Arc::new(store)).context("Failed to create filter")
}

/// Menus given on the command line, falling back to `filter.target_menus`
pub fn target_menus(config: &Config, menus: &[String]) -> Result<Vec<MenuName>> {
    if menus.is_empty() {
        return config.filter.menus().context("Invalid target menus");
    }
    menus
        .iter()
        .map(|m| MenuName::new(m.as_str()).with_context(|| format!("Invalid menu name '{m}'")))
        .collect()
}

/// Describe the link a page reference resolves to
pub fn resolve_command(
    config: &Config,
    links_path: &Path,
    menus: &[String],
    input: &str,
) -> Result<String> {
    let filter = load_filter(config, links_path)?;
    let menus = target_menus(config, menus)?;

    let (route, link) = filter.resolve(input, &menus)?;
    let Some(route) = route else {
        return Ok(format!("'{input}' does not resolve to a route"));
    };

    Ok(match link {
        Some(link) => {
            let mut out = format!("{route}\nlink {} in {}", link.id, link.menu);
            if let Some(parent) = &link.parent {
                out.push_str(&format!(" (parent {parent})"));
            }
            if let Some(title) = &link.title {
                out.push_str(&format!(": {title}"));
            }
            out
        }
        None => format!("{route}\nno link"),
    })
}

/// Render the filtered query for a page reference
pub fn filter_command(
    config: &Config,
    links_path: &Path,
    menus: &[String],
    input: Option<&str>,
) -> Result<String> {
    let filter = load_filter(config, links_path)?;
    let menus = target_menus(config, menus)?;

    let mut query = SqlQuery::from_schema(filter.clauses().schema());
    let outcome = filter.apply(&mut query, input, &menus)?;
    let rendered = query.render()?;

    let mut out = rendered.sql;
    for (i, bind) in rendered.binds.iter().enumerate() {
        out.push_str(&format!("\n  ${} = {bind}", i + 1));
    }
    if let Some(parent) = outcome.parent {
        out.push_str(&format!("\n-- {}", parent.clause));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LINKS: &str = r#"{
        "links": [
            {"id": "3", "menu": "main", "route": {"name": "entity.node.canonical", "parameters": {"node": "1"}}},
            {"id": "7", "parent": "3", "menu": "main", "title": "Team",
             "route": {"name": "entity.node.canonical", "parameters": {"node": 42}}}
        ]
    }"#;

    fn links_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LINKS.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_target_menus_fallback() {
        let mut config = Config::default();
        config.filter.target_menus = vec!["footer".to_string()];

        let menus = target_menus(&config, &[]).unwrap();
        assert_eq!(menus, vec![MenuName::new("footer").unwrap()]);

        let menus = target_menus(&config, &["main".to_string()]).unwrap();
        assert_eq!(menus, vec![MenuName::new("main").unwrap()]);

        assert!(target_menus(&config, &["Main Menu".to_string()]).is_err());
    }

    #[test]
    fn test_resolve_command() {
        let file = links_file();
        let out = resolve_command(&Config::default(), file.path(), &[], "node/42").unwrap();
        assert!(out.ends_with("link 7 in main (parent 3): Team"));

        let out = resolve_command(&Config::default(), file.path(), &[], "/nowhere").unwrap();
        assert_eq!(out, "'/nowhere' does not resolve to a route");

        let out = resolve_command(&Config::default(), file.path(), &[], "99").unwrap();
        assert!(out.ends_with("no link"));
    }

    #[test]
    fn test_filter_command() {
        let file = links_file();
        let out = filter_command(
            &Config::default(),
            file.path(),
            &["main".to_string()],
            Some("42"),
        )
        .unwrap();

        assert!(out.contains("WHERE (menu_link_content_data.menu_name IN ($1))"));
        assert!(out.contains("$1 = \"main\""));
        assert!(out.contains("$2 = \"7\""));
        assert!(out.ends_with("-- parent = 7"));
    }

    #[test]
    fn test_filter_command_without_input() {
        let file = links_file();
        let out = filter_command(&Config::default(), file.path(), &[], None).unwrap();
        assert!(!out.contains("WHERE"));
    }

    #[test]
    fn test_filter_command_blank_input_limits_to_top_level() {
        let file = links_file();
        let out = filter_command(&Config::default(), file.path(), &[], Some("   ")).unwrap();
        assert!(out.contains("WHERE (menu_link_content_data.parent = $1)"));
        assert!(out.contains("$1 = \"0\""));
        assert!(out.ends_with("-- parent = <root>"));
    }

    #[test]
    fn test_missing_links_file() {
        let err = load_filter(&Config::default(), Path::new("/nonexistent/links.json"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to load links"));
    }
}
