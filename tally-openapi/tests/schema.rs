use schemars::JsonSchema;
use serde_json::{json, Value};
use tally_openapi::schema::{schema_ref, SchemaProvider, SchemaRegistry};

// ── SchemaRegistry ──────────────────────────────────────────────────────────

#[test]
fn registry_new_empty() {
    let registry = SchemaRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.into_schemas().is_empty());
}

#[test]
fn register_single_schema() {
    let mut registry = SchemaRegistry::new();
    registry.register("Category", json!({"type": "object"}));

    assert!(registry.contains("Category"));
    assert_eq!(registry.get("Category"), Some(&json!({"type": "object"})));
    assert_eq!(registry.len(), 1);
}

#[test]
fn register_duplicate_overwrites() {
    let mut registry = SchemaRegistry::new();
    registry.register("A", json!({"type": "object", "description": "v1"}));
    registry.register("A", json!({"type": "string"}));

    let schemas = registry.get_all();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas["A"], json!({"type": "string"}));
}

#[test]
fn get_all_returns_a_copy() {
    let mut registry = SchemaRegistry::new();
    registry.register("Expense", json!({"type": "object"}));

    let mut snapshot = registry.get_all();
    snapshot.insert("Injected".into(), json!({}));
    snapshot["Expense"] = json!({"type": "string"});

    assert!(!registry.contains("Injected"));
    assert_eq!(registry.get("Expense"), Some(&json!({"type": "object"})));
}

#[test]
fn clear_empties_registry() {
    let mut registry = SchemaRegistry::new();
    registry.register_object("Category", &[("name", "string")]);
    registry.clear();
    assert!(registry.is_empty());
    assert!(!registry.contains("Category"));
}

#[test]
fn register_object_schema() {
    let mut registry = SchemaRegistry::new();
    registry.register_object("Expense", &[("description", "string"), ("amount", "number")]);

    let expense = registry.get("Expense").unwrap();
    assert_eq!(expense["type"], "object");
    assert_eq!(expense["properties"]["description"]["type"], "string");
    assert_eq!(expense["properties"]["amount"]["type"], "number");
    assert_eq!(expense["required"], json!(["description", "amount"]));
}

#[test]
fn load_schemas_registers_all_in_order() {
    let mut registry = SchemaRegistry::new();
    registry.load_schemas([
        ("ErrorResponse", json!({"type": "object"})),
        ("Expense", json!({"type": "object"})),
        ("Category", json!({"type": "object"})),
    ]);

    let names: Vec<String> = registry.get_all().keys().cloned().collect();
    assert_eq!(names, ["ErrorResponse", "Expense", "Category"]);
}

#[test]
fn schema_ref_points_into_components() {
    assert_eq!(schema_ref("Expense"), json!({"$ref": "#/components/schemas/Expense"}));
}

// ── Derived schemas ─────────────────────────────────────────────────────────

#[allow(dead_code)]
#[derive(JsonSchema)]
struct Color {
    hex: String,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct Label {
    name: String,
    color: Color,
}

#[test]
fn register_type_uses_type_name() {
    let mut registry = SchemaRegistry::new();
    let name = registry.register_type::<Label>();

    assert_eq!(name, "Label");
    let label = registry.get("Label").unwrap();
    assert_eq!(label["type"], "object");
    assert!(label.get("$schema").is_none());
    assert!(label.get("$defs").is_none());
}

#[test]
fn register_type_promotes_nested_definitions() {
    let mut registry = SchemaRegistry::new();
    registry.register_type::<Label>();

    assert!(registry.contains("Color"));
    assert_eq!(
        registry.get("Label").unwrap()["properties"]["color"]["$ref"],
        "#/components/schemas/Color"
    );
}

#[test]
fn register_type_keeps_existing_nested_definition() {
    let mut registry = SchemaRegistry::new();
    registry.register("Color", json!({"type": "string"}));
    registry.register_type::<Label>();

    assert_eq!(registry.get("Color"), Some(&json!({"type": "string"})));
}

// ── SchemaProvider ──────────────────────────────────────────────────────────

struct MonthlySummary;

impl SchemaProvider for MonthlySummary {
    fn schema_name() -> &'static str {
        "MonthlySummary"
    }

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "totalExpenses": { "type": "number" },
                "month": { "type": "number" },
                "year": { "type": "number" }
            }
        })
    }
}

#[test]
fn register_provider_populates_registry() {
    let mut registry = SchemaRegistry::new();
    registry.register_provider::<MonthlySummary>();

    let summary = registry.get("MonthlySummary").unwrap();
    assert_eq!(summary["properties"]["totalExpenses"]["type"], "number");
}
