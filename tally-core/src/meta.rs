use serde::Serialize;
use serde_json::Value;
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a controller type.
///
/// Equality and hashing only consider the `TypeId`; the type name is kept
/// around for log messages and strict-mode reports.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `tally_app::controllers::CategoryController`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// What a fact is attached to: a type, or one named member of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Type(TypeKey),
    Member(TypeKey, String),
}

impl Subject {
    pub fn of_type<T: 'static>() -> Self {
        Subject::Type(TypeKey::of::<T>())
    }

    pub fn member<T: 'static>(name: impl Into<String>) -> Self {
        Subject::Member(TypeKey::of::<T>(), name.into())
    }

    pub fn type_key(&self) -> TypeKey {
        match self {
            Subject::Type(ty) | Subject::Member(ty, _) => *ty,
        }
    }
}

/// The fixed set of keys a fact can be stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKey {
    Controller,
    Operation,
    Method,
    Path,
    Params,
    Queries,
    Body,
    Responses,
    Tags,
    Security,
}

impl FactKey {
    /// List-valued keys accumulate across writes instead of being replaced.
    pub fn is_list(self) -> bool {
        matches!(self, FactKey::Params | FactKey::Queries | FactKey::Responses)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FactKey::Controller => "controller",
            FactKey::Operation => "operation",
            FactKey::Method => "method",
            FactKey::Path => "path",
            FactKey::Params => "params",
            FactKey::Queries => "queries",
            FactKey::Body => "body",
            FactKey::Responses => "responses",
            FactKey::Tags => "tags",
            FactKey::Security => "security",
        }
    }
}

/// A single recorded metadata value. The variant determines its [`FactKey`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fact {
    Controller(ControllerDescriptor),
    Operation(OperationSpec),
    Method(HttpMethod),
    Path(String),
    Params(Vec<ParamSpec>),
    Queries(Vec<ParamSpec>),
    Body(BodySpec),
    Responses(Vec<ResponseSpec>),
    Tags(Vec<String>),
    Security(Vec<SecurityRequirement>),
}

impl Fact {
    pub fn key(&self) -> FactKey {
        match self {
            Fact::Controller(_) => FactKey::Controller,
            Fact::Operation(_) => FactKey::Operation,
            Fact::Method(_) => FactKey::Method,
            Fact::Path(_) => FactKey::Path,
            Fact::Params(_) => FactKey::Params,
            Fact::Queries(_) => FactKey::Queries,
            Fact::Body(_) => FactKey::Body,
            Fact::Responses(_) => FactKey::Responses,
            Fact::Tags(_) => FactKey::Tags,
            Fact::Security(_) => FactKey::Security,
        }
    }
}

/// Per-type and per-member facts written by controller annotations.
///
/// Lookups are exact: a fact set on one type is never visible through another
/// type, and member facts match on the exact member name. Member names are
/// remembered in the order they were first annotated so the compiler can
/// enumerate a controller's operations deterministically.
#[derive(Debug, Clone, Default)]
pub struct MetaStore {
    facts: HashMap<Subject, HashMap<FactKey, Fact>>,
    members: HashMap<TypeKey, Vec<String>>,
}

impl MetaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fact.
    ///
    /// Params, queries and responses append to whatever is already stored
    /// for the subject; every other key is replaced by the latest write.
    pub fn set(&mut self, subject: Subject, fact: Fact) {
        if let Subject::Member(ty, name) = &subject {
            let members = self.members.entry(*ty).or_default();
            if !members.iter().any(|m| m == name) {
                members.push(name.clone());
            }
        }

        let slot = self.facts.entry(subject).or_default();
        match slot.get_mut(&fact.key()) {
            Some(current) => match (current, fact) {
                (Fact::Params(list), Fact::Params(more))
                | (Fact::Queries(list), Fact::Queries(more)) => list.extend(more),
                (Fact::Responses(list), Fact::Responses(more)) => list.extend(more),
                (current, fact) => *current = fact,
            },
            None => {
                slot.insert(fact.key(), fact);
            }
        }
    }

    /// Read back a fact, if one was recorded.
    pub fn get(&self, subject: &Subject, key: FactKey) -> Option<&Fact> {
        self.facts.get(subject)?.get(&key)
    }

    /// The controller descriptor declared on a type.
    pub fn controller(&self, ty: TypeKey) -> Option<&ControllerDescriptor> {
        match self.get(&Subject::Type(ty), FactKey::Controller) {
            Some(Fact::Controller(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    /// Member names annotated on a type, in first-declaration order.
    pub fn members(&self, ty: TypeKey) -> &[String] {
        self.members.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve everything recorded for one member into an [`OperationDescriptor`].
    ///
    /// Missing list facts resolve to empty lists; nothing here fails.
    pub fn operation(&self, ty: TypeKey, member: &str) -> OperationDescriptor {
        let mut descriptor = OperationDescriptor::default();
        let Some(facts) = self.facts.get(&Subject::Member(ty, member.to_string())) else {
            return descriptor;
        };

        for fact in facts.values() {
            match fact.clone() {
                Fact::Operation(op) => descriptor.operation = Some(op),
                Fact::Method(method) => descriptor.method = Some(method),
                Fact::Path(path) => descriptor.path = Some(path),
                Fact::Params(params) => descriptor.params = params,
                Fact::Queries(queries) => descriptor.queries = queries,
                Fact::Body(body) => descriptor.body = Some(body),
                Fact::Responses(responses) => descriptor.responses = responses,
                Fact::Tags(tags) => descriptor.tags = Some(tags),
                Fact::Security(security) => descriptor.security = Some(security),
                Fact::Controller(_) => {}
            }
        }
        descriptor
    }

    /// Drop every recorded fact.
    pub fn clear(&mut self) {
        self.facts.clear();
        self.members.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

// ── Metadata types ──────────────────────────────────────────────────────────

/// Base path and tags declared at the controller level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerDescriptor {
    pub base_path: String,
    pub tags: Vec<String>,
}

/// HTTP verbs an operation can be documented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary, description and deprecation flag of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OperationSpec {
    pub summary: String,
    pub description: Option<String>,
    pub deprecated: bool,
}

impl OperationSpec {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

impl From<&str> for OperationSpec {
    fn from(summary: &str) -> Self {
        Self::new(summary)
    }
}

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: Option<String>,
}

impl ParamSpec {
    /// An optional parameter of the given OpenAPI type (`"string"`, `"number"`, ...).
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request body shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySpec {
    pub description: String,
    pub schema: Value,
    pub required: Option<bool>,
}

impl BodySpec {
    pub fn new(description: impl Into<String>, schema: Value) -> Self {
        Self {
            description: description.into(),
            schema,
            required: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// One documented response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    pub status_code: String,
    pub description: String,
    pub schema: Option<Value>,
}

impl ResponseSpec {
    pub fn new(status_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            description: description.into(),
            schema: None,
        }
    }

    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// `{ schemeName: scopes }`, as it appears in an OpenAPI `security` list.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Everything recorded for one controller member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationDescriptor {
    pub operation: Option<OperationSpec>,
    pub method: Option<HttpMethod>,
    pub path: Option<String>,
    pub params: Vec<ParamSpec>,
    pub queries: Vec<ParamSpec>,
    pub body: Option<BodySpec>,
    pub responses: Vec<ResponseSpec>,
    pub tags: Option<Vec<String>>,
    pub security: Option<Vec<SecurityRequirement>>,
}

impl OperationDescriptor {
    /// Facts an operation needs before it can be compiled but does not have.
    ///
    /// An empty summary counts as missing; an empty path does not.
    pub fn missing(&self) -> Vec<FactKey> {
        let mut missing = Vec::new();
        if self.operation.as_ref().map_or(true, |op| op.summary.is_empty()) {
            missing.push(FactKey::Operation);
        }
        if self.method.is_none() {
            missing.push(FactKey::Method);
        }
        if self.path.is_none() {
            missing.push(FactKey::Path);
        }
        missing
    }

    pub fn is_eligible(&self) -> bool {
        self.missing().is_empty()
    }
}
