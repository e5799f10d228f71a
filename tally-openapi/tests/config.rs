use tally_core::config::{AppConfig, ConfigValue};
use tally_openapi::{OpenApiConfig, ServerInfo};

#[test]
fn config_new() {
    let config = OpenApiConfig::new("My API", "1.0.0");
    assert_eq!(config.title, "My API");
    assert_eq!(config.version, "1.0.0");
    assert!(config.description.is_none());
    assert!(config.servers.is_empty());
    assert_eq!(config.docs_path, "/api-docs");
    assert!(!config.docs_ui);
    assert!(!config.strict);
}

#[test]
fn config_default_matches_served_metadata() {
    let config = OpenApiConfig::default();
    assert_eq!(config.title, "API Documentation");
    assert_eq!(config.version, "1.0.0");
    assert_eq!(
        config.description.as_deref(),
        Some("Comprehensive API Documentation generated using decorators")
    );
    assert_eq!(config.license.as_ref().unwrap().name, "MIT");
    assert_eq!(
        config.servers,
        [
            ServerInfo::new("http://localhost:3000", "Local Development"),
            ServerInfo::new("https://api.example.com", "Production"),
        ]
    );
}

#[test]
fn config_builders() {
    let config = OpenApiConfig::new("My API", "1.0.0")
        .with_description("A great API")
        .with_docs_ui(true)
        .with_docs_ui(false)
        .with_docs_path("/openapi.json")
        .with_strict(true);
    assert_eq!(config.description.as_deref(), Some("A great API"));
    assert!(!config.docs_ui);
    assert_eq!(config.docs_path, "/openapi.json");
    assert!(config.strict);
}

#[test]
fn from_empty_config_is_default() {
    let config = OpenApiConfig::from_config(&AppConfig::empty()).unwrap();
    assert_eq!(config, OpenApiConfig::default());
}

#[test]
fn from_yaml_config() {
    let yaml = r#"
openapi:
  title: "Expense Tracker API"
  version: "2.1.0"
  contact:
    name: "Finance Team"
  docs:
    path: "/docs/openapi.json"
    ui: true
  strict: true
  servers:
    - url: "http://localhost:8080"
      description: "Local"
    - "https://expenses.example.com"
"#;
    let app = AppConfig::from_yaml_str(yaml, "test").unwrap();
    let config = OpenApiConfig::from_config(&app).unwrap();

    assert_eq!(config.title, "Expense Tracker API");
    assert_eq!(config.version, "2.1.0");
    assert_eq!(config.contact.as_ref().unwrap().name, "Finance Team");
    assert!(config.contact.as_ref().unwrap().email.is_none());
    assert_eq!(config.docs_path, "/docs/openapi.json");
    assert!(config.docs_ui);
    assert!(config.strict);
    assert_eq!(config.servers.len(), 2);
    assert_eq!(config.servers[0], ServerInfo::new("http://localhost:8080", "Local"));
    assert_eq!(config.servers[1].url, "https://expenses.example.com");
    assert!(config.servers[1].description.is_none());
    // Untouched keys keep their defaults.
    assert_eq!(config.license, OpenApiConfig::default().license);
}

#[test]
fn from_config_rejects_malformed_servers() {
    let mut app = AppConfig::empty();
    app.set("openapi.servers", ConfigValue::List(vec![ConfigValue::Integer(3)]));
    assert!(OpenApiConfig::from_config(&app).is_err());
}
