use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tally_core::{default_cors, default_trace, MetaStore, TypeKey};
use tally_openapi::{openapi_routes, CompileError, CompiledDocument, OpenApiConfig, SchemaRegistry};

pub mod controllers;
pub mod models;
pub mod schemas;

use controllers::{CategoryController, DashboardController, ExpenseController, HealthController};

/// Everything the document compiler reads: declared facts, shared schemas,
/// and the controllers to compile, in path order.
pub struct ApiDescription {
    pub store: MetaStore,
    pub schemas: SchemaRegistry,
    pub controllers: Vec<TypeKey>,
}

impl ApiDescription {
    /// Register shared schemas and declare every controller.
    pub fn declare() -> Self {
        let mut schemas = SchemaRegistry::new();
        schemas::register_shared_schemas(&mut schemas);

        let mut store = MetaStore::new();
        let controllers = vec![
            store.declare::<ExpenseController>(),
            store.declare::<CategoryController>(),
            store.declare::<DashboardController>(),
            store.declare::<HealthController>(),
        ];

        Self {
            store,
            schemas,
            controllers,
        }
    }

    pub fn compile(&self, config: &OpenApiConfig) -> Result<CompiledDocument, CompileError> {
        tally_openapi::compile(config, &self.store, &self.schemas, &self.controllers)
    }
}

/// Documentation routes plus the health check, with CORS and request tracing.
///
/// This binary serves documentation only: the expense, category and dashboard
/// operations described in the document have no handlers here.
pub fn app_router(config: &OpenApiConfig, document: &CompiledDocument) -> Router {
    let started = Instant::now();
    let health = get(move || async move {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Json(json!({
            "status": "OK",
            "timestamp": timestamp.to_string(),
            "uptime": started.elapsed().as_secs_f64(),
        }))
    });

    Router::new()
        .route("/health", health)
        .merge(openapi_routes(config, document))
        .layer(default_cors())
        .layer(default_trace())
}
