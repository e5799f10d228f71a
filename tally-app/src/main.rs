use std::error::Error;

use tally_app::{app_router, ApiDescription};
use tally_core::{init_tracing, AppConfig};
use tally_openapi::OpenApiConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = AppConfig::load("dev").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to empty configuration");
        AppConfig::empty()
    });
    let openapi = OpenApiConfig::from_config(&config)?;

    let api = ApiDescription::declare();
    let document = api.compile(&openapi)?;
    tracing::info!(
        paths = document["paths"].as_object().map_or(0, |p| p.len()),
        schemas = api.schemas.len(),
        "API document compiled"
    );

    let app = app_router(&openapi, &document);
    let port: u16 = config.get_or("server.port", 3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, docs = %openapi.docs_path, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
