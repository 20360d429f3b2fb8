use menu_children_core::config::{CacheScope, Config};
use menu_children_core::MenuName;

#[test]
fn test_filter_config_defaults() {
    let config = Config::default();
    assert!(config.filter.target_menus.is_empty());
    assert!(config.filter.cache_misses);
    assert_eq!(config.filter.cache_scope, CacheScope::ShortCircuit);
    assert_eq!(config.filter.predicate_group, 0);
}

#[test]
fn test_schema_config_defaults() {
    let config = Config::default();
    assert_eq!(config.schema.base_table, "node_field_data");
    assert_eq!(config.schema.base_field, "nid");
    assert_eq!(config.schema.link_table, "menu_link_content_data");
    assert_eq!(config.schema.menu_column, "menu_name");
    assert_eq!(config.schema.parent_column, "parent");
    assert_eq!(config.schema.root_parent, 0);
}

#[test]
fn test_target_menus_convert_to_menu_names() {
    let mut config = Config::default();
    config.filter.target_menus = vec!["main".to_string(), "account".to_string()];
    assert!(config.validate().is_ok());

    let menus = config.filter.menus().unwrap();
    assert_eq!(
        menus,
        vec![
            MenuName::new("main").unwrap(),
            MenuName::new("account").unwrap()
        ]
    );
}

#[test]
fn test_config_validation_schema_identifiers() {
    let mut config = Config::default();

    config.schema.link_table = "menu_tree".to_string();
    assert!(config.validate().is_ok());

    config.schema.link_table = "menu tree".to_string();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("schema.link_table"));

    config.schema.link_table = "1menu".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_empty_join_condition() {
    let mut config = Config::default();
    config.schema.join_condition = "   ".to_string();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("join_condition"));
}
