use schemars::JsonSchema;
use serde_json::{json, Map, Value};

/// Build a `$ref` pointing at a schema in `components/schemas`.
pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Named, reusable schemas merged into the document's `components/schemas`.
///
/// Registering a name twice replaces the earlier schema. Schemas are not
/// validated. Iteration follows first-registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: Map<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema definition under the given name.
    pub fn register(&mut self, name: impl Into<String>, schema: Value) {
        let name = name.into();
        if self.schemas.insert(name.clone(), schema).is_some() {
            tracing::debug!(schema = %name, "Replaced registered schema");
        }
    }

    /// Register every `(name, schema)` pair, logging each one.
    pub fn load_schemas<I, S>(&mut self, schemas: I)
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        for (name, schema) in schemas {
            let name = name.into();
            tracing::info!(schema = %name, "Registered schema");
            self.register(name, schema);
        }
        tracing::info!(count = self.len(), "Schemas loaded");
    }

    /// Register a flat object schema where every field is required.
    ///
    /// Each field is `(name, type)` with an OpenAPI primitive type such as
    /// `"string"`, `"integer"`, `"number"` or `"boolean"`.
    pub fn register_object(&mut self, name: &str, fields: &[(&str, &str)]) {
        let properties: Map<String, Value> = fields
            .iter()
            .map(|(field, ty)| (field.to_string(), json!({ "type": ty })))
            .collect();
        let required: Vec<&str> = fields.iter().map(|(field, _)| *field).collect();

        self.register(
            name,
            json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        );
    }

    /// Derive and register the schema of `T`, returning the name it was registered under.
    ///
    /// Nested definitions are registered alongside it (existing entries win)
    /// and their references rewritten to point into `components/schemas`.
    pub fn register_type<T: JsonSchema>(&mut self) -> String {
        let name = T::schema_name().into_owned();
        let mut root = serde_json::to_value(schemars::schema_for!(T))
            .unwrap_or_else(|_| json!({ "type": "object" }));

        if let Some(obj) = root.as_object_mut() {
            obj.remove("$schema");
            if let Some(Value::Object(defs)) = obj.remove("$defs") {
                for (def_name, mut def_schema) in defs {
                    rewrite_refs(&mut def_schema);
                    self.schemas.entry(def_name).or_insert(def_schema);
                }
            }
        }
        rewrite_refs(&mut root);

        self.register(name.clone(), root);
        name
    }

    /// Register a [`SchemaProvider`]'s schema.
    pub fn register_provider<P: SchemaProvider>(&mut self) {
        P::register_schema(self);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// A copy of every registered schema. Changing it leaves the registry untouched.
    pub fn get_all(&self) -> Map<String, Value> {
        self.schemas.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn clear(&mut self) {
        self.schemas.clear();
    }

    pub fn into_schemas(self) -> Map<String, Value> {
        self.schemas
    }
}

/// Types that name and describe their own schema.
pub trait SchemaProvider {
    /// The schema name (typically the type name, e.g. `"Expense"`).
    fn schema_name() -> &'static str;

    fn json_schema() -> Value;

    fn register_schema(registry: &mut SchemaRegistry) {
        registry.register(Self::schema_name(), Self::json_schema());
    }
}

/// Rewrite `#/$defs/X` references to `#/components/schemas/X`, recursively.
fn rewrite_refs(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(target)) = obj.get_mut("$ref") {
                if let Some(name) = target.strip_prefix("#/$defs/") {
                    *target = format!("#/components/schemas/{name}");
                }
            }
            for v in obj.values_mut() {
                rewrite_refs(v);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(rewrite_refs),
        _ => {}
    }
}
