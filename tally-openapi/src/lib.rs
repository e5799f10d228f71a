mod builder;
mod config;
mod handlers;
pub mod schema;

pub use builder::{
    build_spec, build_spec_strict, compile, CompileError, CompiledDocument, OmittedOperation,
    OPENAPI_VERSION,
};
pub use config::{Contact, License, OpenApiConfig, ServerInfo};
pub use handlers::openapi_routes;
pub use schema::{schema_ref, SchemaProvider, SchemaRegistry};
