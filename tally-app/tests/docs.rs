use axum::body::Body;
use http::Request;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tally_app::{app_router, ApiDescription};
use tally_openapi::OpenApiConfig;
use tower::ServiceExt;

fn compiled() -> Value {
    ApiDescription::declare()
        .compile(&OpenApiConfig::default().with_strict(true))
        .unwrap()
        .into_value()
}

#[test]
fn every_declared_operation_is_complete() {
    let spec = compiled();
    let operations: usize = spec["paths"]
        .as_object()
        .unwrap()
        .values()
        .map(|item| item.as_object().unwrap().len())
        .sum();
    assert_eq!(operations, 12);
}

#[test]
fn paths_follow_controller_order() {
    let spec = compiled();
    let paths: Vec<&str> = spec["paths"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        [
            "/expenses",
            "/expenses/{id}",
            "/categories",
            "/categories/{id}",
            "/dashboard/summary",
            "/health",
        ]
    );
}

#[test]
fn categories_list_and_tags() {
    let spec = compiled();
    assert_eq!(spec["paths"]["/categories"]["get"]["summary"], "Get all categories");
    assert_eq!(spec["paths"]["/categories"]["post"]["summary"], "Create a new category");

    let tags = spec["tags"].as_array().unwrap();
    assert!(tags.contains(&json!({ "name": "Categories", "description": "Categories operations" })));
    let names: Vec<&str> = tags.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Expenses", "Categories", "Dashboard", "System"]);
}

#[test]
fn expense_filters_are_optional_queries() {
    let spec = compiled();
    let params = spec["paths"]["/expenses"]["get"]["parameters"].as_array().unwrap();
    let names: Vec<&str> = params.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["month", "year", "category"]);
    assert!(params.iter().all(|p| p["in"] == "query" && p["required"] == false));
}

#[test]
fn dashboard_summary_requires_month_and_year() {
    let spec = compiled();
    let op = &spec["paths"]["/dashboard/summary"]["get"];
    assert!(op["parameters"].as_array().unwrap().iter().all(|p| p["required"] == true));
    assert_eq!(
        op["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/MonthlySummary"
    );
}

#[test]
fn category_mutations_document_all_statuses() {
    let spec = compiled();
    let responses = spec["paths"]["/categories/{id}"]["put"]["responses"].as_object().unwrap();
    let statuses: Vec<&str> = responses.keys().map(String::as_str).collect();
    assert_eq!(statuses, ["200", "403", "404"]);
    assert_eq!(
        spec["paths"]["/categories"]["post"]["requestBody"]["content"]["application/json"]["schema"]
            ["required"],
        json!(["name"])
    );
}

#[test]
fn shared_schemas_are_components() {
    let spec = compiled();
    let schemas = spec["components"]["schemas"].as_object().unwrap();
    for name in ["ErrorResponse", "Expense", "Category", "MonthlySummary", "CategoryBreakdown"] {
        assert!(schemas.contains_key(name), "missing schema {name}");
    }
    assert!(schemas["Expense"]["properties"]["_id"].is_object());
    assert!(schemas["MonthlySummary"]["properties"]["totalExpenses"].is_object());
}

#[test]
fn every_ref_resolves() {
    fn collect_refs(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(obj) => {
                if let Some(Value::String(target)) = obj.get("$ref") {
                    out.push(target.clone());
                }
                obj.values().for_each(|v| collect_refs(v, out));
            }
            Value::Array(items) => items.iter().for_each(|v| collect_refs(v, out)),
            _ => {}
        }
    }

    let spec = compiled();
    let mut refs = Vec::new();
    collect_refs(&spec, &mut refs);
    assert!(!refs.is_empty());
    for target in refs {
        let name = target.strip_prefix("#/components/schemas/").unwrap();
        assert!(spec["components"]["schemas"].get(name).is_some(), "dangling {target}");
    }
}

#[tokio::test]
async fn router_serves_docs_and_health() {
    let config = OpenApiConfig::default();
    let document = ApiDescription::declare().compile(&config).unwrap();
    let app = app_router(&config, &document);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api-docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let served: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(&served, document.as_value());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "OK");
}

#[tokio::test]
async fn documented_operations_are_not_served() {
    let config = OpenApiConfig::default();
    let document = ApiDescription::declare().compile(&config).unwrap();
    assert!(document["paths"]["/expenses"]["get"].is_object());

    let response = app_router(&config, &document)
        .oneshot(Request::builder().uri("/expenses").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
}
