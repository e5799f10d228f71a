use std::fs;

use serial_test::serial;
use tally_core::config::{AppConfig, ConfigError, ConfigValue, PROFILE_ENV};

#[test]
fn empty_config() {
    let config = AppConfig::empty();
    assert!(matches!(
        config.get::<String>("nonexistent"),
        Err(ConfigError::NotFound(_))
    ));
    assert_eq!(config.profile(), "test");
}

#[test]
fn set_and_get() {
    let mut config = AppConfig::empty();
    config.set("openapi.title", ConfigValue::String("Expenses".into()));
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "Expenses");
    assert!(config.contains_key("openapi.title"));
}

#[test]
fn get_or_and_get_opt() {
    let mut config = AppConfig::empty();
    config.set("server.port", ConfigValue::String("not a port".into()));

    assert_eq!(config.get_or("missing", 42i64), 42);
    assert_eq!(config.get_or("server.port", 3000u16), 3000);
    assert!(config.get_opt::<String>("missing").unwrap().is_none());
    assert!(matches!(
        config.get_opt::<u16>("server.port"),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn type_conversions() {
    let mut config = AppConfig::empty();
    config.set("int", ConfigValue::Integer(42));
    config.set("flag", ConfigValue::String("yes".into()));
    config.set("null", ConfigValue::Null);
    config.set("big", ConfigValue::Integer(70_000));

    assert_eq!(config.get::<i64>("int").unwrap(), 42);
    assert_eq!(config.get::<String>("int").unwrap(), "42");
    assert!(config.get::<bool>("flag").unwrap());
    assert!(config.get::<Option<String>>("null").unwrap().is_none());
    assert!(config.get::<u16>("big").is_err());
}

#[test]
fn flatten_yaml() {
    let yaml = r#"
server:
  port: 3000
openapi:
  title: "Expense Tracker"
  docs:
    ui: true
  servers:
    - "http://localhost:3000"
    - "https://api.example.com"
"#;
    let config = AppConfig::from_yaml_str(yaml, "test").unwrap();

    assert_eq!(config.get::<u16>("server.port").unwrap(), 3000);
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "Expense Tracker");
    assert!(config.get::<bool>("openapi.docs.ui").unwrap());
    assert_eq!(
        config.get::<Vec<String>>("openapi.servers").unwrap(),
        ["http://localhost:3000", "https://api.example.com"]
    );
    let docs = config.get::<ConfigValue>("openapi.docs").unwrap();
    assert_eq!(docs.field("ui"), Some(&ConfigValue::Bool(true)));
}

#[test]
fn comma_separated_list_from_string() {
    let mut config = AppConfig::empty();
    config.set("tags", ConfigValue::String("Expenses, Categories,,".into()));
    assert_eq!(config.get::<Vec<String>>("tags").unwrap(), ["Expenses", "Categories"]);
}

#[test]
fn invalid_yaml_is_load_error() {
    let result = AppConfig::from_yaml_str("openapi: [unclosed", "test");
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial]
fn load_layers_profile_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("application.yaml"),
        "openapi:\n  title: base\n  version: \"1.0.0\"\nserver:\n  port: 3000\n",
    )
    .unwrap();
    fs::write(dir.path().join("application-prod.yaml"), "openapi:\n  title: prod\n").unwrap();

    std::env::remove_var(PROFILE_ENV);
    std::env::set_var("SERVER_PORT", "8081");
    let config = AppConfig::load_from(dir.path(), "prod").unwrap();
    std::env::remove_var("SERVER_PORT");

    assert_eq!(config.profile(), "prod");
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "prod");
    assert_eq!(config.get::<String>("openapi.version").unwrap(), "1.0.0");
    assert_eq!(config.get::<u16>("server.port").unwrap(), 8081);
}

#[test]
#[serial]
fn profile_env_overrides_argument() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("application-staging.yaml"), "openapi:\n  title: staging\n").unwrap();

    std::env::set_var(PROFILE_ENV, "staging");
    let config = AppConfig::load_from(dir.path(), "dev");
    std::env::remove_var(PROFILE_ENV);

    let config = config.unwrap();
    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "staging");
}

#[test]
#[serial]
fn missing_files_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::env::remove_var(PROFILE_ENV);
    let config = AppConfig::load_from(dir.path(), "dev").unwrap();
    assert_eq!(config.profile(), "dev");
    assert!(!config.contains_key("openapi.title"));
}
