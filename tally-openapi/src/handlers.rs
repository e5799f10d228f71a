use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::builder::CompiledDocument;
use crate::config::OpenApiConfig;

/// Build a router serving the compiled document at `config.docs_path` and,
/// when `config.docs_ui` is set, a Swagger UI page at `/docs`.
///
/// The document is serialized once here and served unchanged afterwards.
pub fn openapi_routes<S>(config: &OpenApiConfig, document: &CompiledDocument) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let spec_json: Arc<str> = Arc::from(document.to_json_pretty());

    let mut router = Router::<S>::new().route(
        &config.docs_path,
        get(move || {
            let json = Arc::clone(&spec_json);
            async move { ([(CONTENT_TYPE, "application/json")], json.to_string()).into_response() }
        }),
    );

    if config.docs_ui {
        let page = docs_page(&config.title, &config.docs_path);
        router = router.route("/docs", get(move || async move { Html(page) }));
    }

    tracing::info!(path = %config.docs_path, docs_ui = config.docs_ui, "API documentation routes ready");
    router
}

fn docs_page(title: &str, spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
    </script>
</body>
</html>"##
    )
}
