use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tally_core::meta::{FactKey, MetaStore, OperationDescriptor, ParamSpec, TypeKey};

use crate::config::OpenApiConfig;
use crate::schema::SchemaRegistry;

pub const OPENAPI_VERSION: &str = "3.0.3";

const JSON_MEDIA_TYPE: &str = "application/json";

/// The compiled API document. Compiling again yields a fresh value; this one never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompiledDocument(Value);

impl CompiledDocument {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Deref for CompiledDocument {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

/// An annotated member that did not make it into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedOperation {
    pub controller: &'static str,
    pub member: String,
    pub missing: Vec<FactKey>,
}

impl fmt::Display for OmittedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<&str> = self.missing.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "{}::{} (missing {})",
            self.controller,
            self.member,
            missing.join(", ")
        )
    }
}

#[derive(Debug)]
pub enum CompileError {
    /// Strict mode found members without a summary, method or path.
    IncompleteOperations(Vec<OmittedOperation>),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::IncompleteOperations(omitted) => {
                write!(f, "{} incomplete operation(s):", omitted.len())?;
                for op in omitted {
                    write!(f, "\n  - {op}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Compile the document from the controllers' declared facts.
///
/// Never fails: members without a summary, method or path are left out,
/// and colliding paths or status codes resolve to the last one written.
pub fn build_spec(
    config: &OpenApiConfig,
    store: &MetaStore,
    schemas: &SchemaRegistry,
    controllers: &[TypeKey],
) -> CompiledDocument {
    assemble(config, store, schemas, controllers).0
}

/// Like [`build_spec`], but reports every member the eligibility check left out.
pub fn build_spec_strict(
    config: &OpenApiConfig,
    store: &MetaStore,
    schemas: &SchemaRegistry,
    controllers: &[TypeKey],
) -> Result<CompiledDocument, CompileError> {
    let (document, omitted) = assemble(config, store, schemas, controllers);
    if omitted.is_empty() {
        Ok(document)
    } else {
        Err(CompileError::IncompleteOperations(omitted))
    }
}

/// Compile with the mode selected by `config.strict`.
pub fn compile(
    config: &OpenApiConfig,
    store: &MetaStore,
    schemas: &SchemaRegistry,
    controllers: &[TypeKey],
) -> Result<CompiledDocument, CompileError> {
    if config.strict {
        build_spec_strict(config, store, schemas, controllers)
    } else {
        Ok(build_spec(config, store, schemas, controllers))
    }
}

fn assemble(
    config: &OpenApiConfig,
    store: &MetaStore,
    schemas: &SchemaRegistry,
    controllers: &[TypeKey],
) -> (CompiledDocument, Vec<OmittedOperation>) {
    let mut paths: Map<String, Value> = Map::new();
    let mut tags: Vec<String> = Vec::new();
    let mut omitted = Vec::new();

    for &ty in controllers {
        let (base_path, controller_tags) = match store.controller(ty) {
            Some(c) => (c.base_path.as_str(), c.tags.as_slice()),
            None => {
                tracing::debug!(controller = ty.short_name(), "Controller has no base path declared");
                ("", &[][..])
            }
        };

        for tag in controller_tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        for member in store.members(ty) {
            let descriptor = store.operation(ty, member);
            let missing = descriptor.missing();
            if !missing.is_empty() {
                tracing::debug!(
                    controller = ty.short_name(),
                    member = %member,
                    missing = ?missing,
                    "Skipping incomplete operation"
                );
                omitted.push(OmittedOperation {
                    controller: ty.name(),
                    member: member.clone(),
                    missing,
                });
                continue;
            }
            let (Some(method), Some(path)) = (descriptor.method, descriptor.path.as_deref()) else {
                continue;
            };

            let full_path = format!("{base_path}{path}");
            let operation = operation_object(ty, member, &descriptor, &full_path);

            let path_item = paths
                .entry(full_path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(obj) = path_item.as_object_mut() {
                if obj.insert(method.as_str().to_string(), operation).is_some() {
                    tracing::warn!(
                        path = %full_path,
                        method = %method,
                        controller = ty.short_name(),
                        member = %member,
                        "Operation overwrites an earlier declaration for the same path and method"
                    );
                }
            }
        }
    }

    let document = json!({
        "openapi": OPENAPI_VERSION,
        "info": info_object(config),
        "servers": config.servers,
        "paths": paths,
        "components": {
            "schemas": schemas.get_all(),
            "securitySchemes": {
                "bearerAuth": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT"
                }
            }
        },
        "tags": tags
            .iter()
            .map(|name| json!({ "name": name, "description": format!("{name} operations") }))
            .collect::<Vec<_>>(),
        "security": [{ "bearerAuth": [] }],
    });

    tracing::debug!(
        paths = document["paths"].as_object().map_or(0, Map::len),
        omitted = omitted.len(),
        "API document compiled"
    );

    (CompiledDocument(document), omitted)
}

fn operation_object(
    ty: TypeKey,
    member: &str,
    descriptor: &OperationDescriptor,
    full_path: &str,
) -> Value {
    let mut operation: Map<String, Value> = Map::new();
    // Unique per document: qualified by the controller.
    operation.insert(
        "operationId".into(),
        json!(format!("{}_{}", ty.short_name(), member)),
    );

    if let Some(ref op) = descriptor.operation {
        operation.insert("summary".into(), json!(op.summary));
        if let Some(ref description) = op.description {
            operation.insert("description".into(), json!(description));
        }
        if op.deprecated {
            operation.insert("deprecated".into(), json!(true));
        }
    }

    if let Some(ref tags) = descriptor.tags {
        if !tags.is_empty() {
            operation.insert("tags".into(), json!(tags));
        }
    }

    // Path parameters first, then query parameters, each in declaration order.
    let parameters: Vec<Value> = descriptor
        .params
        .iter()
        .map(|p| parameter_object(p, "path"))
        .chain(descriptor.queries.iter().map(|q| parameter_object(q, "query")))
        .collect();
    operation.insert("parameters".into(), json!(parameters));

    if let Some(ref body) = descriptor.body {
        operation.insert(
            "requestBody".into(),
            json!({
                "description": body.description,
                "required": body.required.unwrap_or(true),
                "content": {
                    JSON_MEDIA_TYPE: { "schema": body.schema }
                }
            }),
        );
    }

    let mut responses: Map<String, Value> = Map::new();
    for response in &descriptor.responses {
        let mut object: Map<String, Value> = Map::new();
        object.insert("description".into(), json!(response.description));
        if let Some(ref schema) = response.schema {
            object.insert(
                "content".into(),
                json!({ JSON_MEDIA_TYPE: { "schema": schema } }),
            );
        }
        if responses
            .insert(response.status_code.clone(), Value::Object(object))
            .is_some()
        {
            tracing::warn!(
                path = %full_path,
                member = %member,
                status = %response.status_code,
                "Duplicate response status code, keeping the last declaration"
            );
        }
    }
    operation.insert("responses".into(), Value::Object(responses));

    if let Some(ref security) = descriptor.security {
        operation.insert("security".into(), json!(security));
    }

    Value::Object(operation)
}

fn parameter_object(param: &ParamSpec, location: &str) -> Value {
    let description = match param.description {
        Some(ref d) => d.clone(),
        None if location == "path" => format!("Path parameter: {}", param.name),
        None => format!("Query parameter: {}", param.name),
    };
    json!({
        "name": param.name,
        "in": location,
        "required": param.required,
        "schema": { "type": param.param_type },
        "description": description,
    })
}

fn info_object(config: &OpenApiConfig) -> Value {
    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }
    if let Some(ref contact) = config.contact {
        let mut obj: Map<String, Value> = Map::new();
        obj.insert("name".into(), json!(contact.name));
        if let Some(ref email) = contact.email {
            obj.insert("email".into(), json!(email));
        }
        info.insert("contact".into(), Value::Object(obj));
    }
    if let Some(ref license) = config.license {
        let mut obj: Map<String, Value> = Map::new();
        obj.insert("name".into(), json!(license.name));
        if let Some(ref url) = license.url {
            obj.insert("url".into(), json!(url));
        }
        info.insert("license".into(), Value::Object(obj));
    }
    Value::Object(info)
}
