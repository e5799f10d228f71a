use std::marker::PhantomData;

use crate::meta::{
    BodySpec, ControllerDescriptor, Fact, HttpMethod, MetaStore, OperationSpec, ParamSpec,
    ResponseSpec, SecurityRequirement, Subject, TypeKey,
};

/// A type that documents its own HTTP operations.
///
/// `declare` is run once per store via [`MetaStore::declare`]; it writes the
/// controller's base path, tags and per-member facts through [`Annotations`].
///
/// ```ignore
/// struct CategoryController;
///
/// impl Controller for CategoryController {
///     fn declare(api: &mut Annotations<'_, Self>) {
///         api.controller("/categories", ["Categories"]);
///         api.member("get_categories")
///             .get("")
///             .operation("Get all categories")
///             .response(ResponseSpec::new("200", "List of categories"));
///     }
/// }
/// ```
pub trait Controller: Sized + 'static {
    fn declare(api: &mut Annotations<'_, Self>);
}

impl MetaStore {
    /// Run `C::declare` against this store and return the controller's key,
    /// ready to be handed to the document compiler.
    pub fn declare<C: Controller>(&mut self) -> TypeKey {
        let mut api = Annotations::<C>::new(self);
        C::declare(&mut api);
        let ty = TypeKey::of::<C>();
        tracing::trace!(
            controller = ty.short_name(),
            members = self.members(ty).len(),
            "Controller declared"
        );
        ty
    }
}

/// Type-level annotation helpers for controller `C`.
pub struct Annotations<'s, C> {
    store: &'s mut MetaStore,
    _controller: PhantomData<fn() -> C>,
}

impl<'s, C: 'static> Annotations<'s, C> {
    pub fn new(store: &'s mut MetaStore) -> Self {
        Self {
            store,
            _controller: PhantomData,
        }
    }

    /// Declare the controller's base path and the tags it contributes to the document.
    pub fn controller<I, S>(&mut self, base_path: impl Into<String>, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let descriptor = ControllerDescriptor {
            base_path: base_path.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        };
        self.store
            .set(Subject::of_type::<C>(), Fact::Controller(descriptor));
        self
    }

    /// Attach tags to the controller type itself, independently of [`Self::controller`].
    pub fn api_tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        self.store.set(Subject::of_type::<C>(), Fact::Tags(tags));
        self
    }

    /// Start annotating one member (handler) of the controller.
    pub fn member(&mut self, name: impl Into<String>) -> MemberAnnotations<'_> {
        MemberAnnotations {
            store: &mut *self.store,
            subject: Subject::member::<C>(name),
        }
    }
}

/// Member-level annotation helpers. Every method records facts and returns
/// `&mut Self`, so declarations read as one chain per handler.
pub struct MemberAnnotations<'a> {
    store: &'a mut MetaStore,
    subject: Subject,
}

impl MemberAnnotations<'_> {
    fn set(&mut self, fact: Fact) -> &mut Self {
        self.store.set(self.subject.clone(), fact);
        self
    }

    /// Record the verb and the path relative to the controller's base path.
    /// A second call replaces both.
    pub fn route(&mut self, method: HttpMethod, path: impl Into<String>) -> &mut Self {
        self.set(Fact::Method(method));
        self.set(Fact::Path(path.into()))
    }

    pub fn get(&mut self, path: impl Into<String>) -> &mut Self {
        self.route(HttpMethod::Get, path)
    }

    pub fn post(&mut self, path: impl Into<String>) -> &mut Self {
        self.route(HttpMethod::Post, path)
    }

    pub fn put(&mut self, path: impl Into<String>) -> &mut Self {
        self.route(HttpMethod::Put, path)
    }

    pub fn patch(&mut self, path: impl Into<String>) -> &mut Self {
        self.route(HttpMethod::Patch, path)
    }

    pub fn delete(&mut self, path: impl Into<String>) -> &mut Self {
        self.route(HttpMethod::Delete, path)
    }

    pub fn operation(&mut self, operation: impl Into<OperationSpec>) -> &mut Self {
        self.set(Fact::Operation(operation.into()))
    }

    /// Append a path parameter; declaration order is kept.
    pub fn param(&mut self, param: ParamSpec) -> &mut Self {
        self.set(Fact::Params(vec![param]))
    }

    /// Append a query parameter; declaration order is kept.
    pub fn query(&mut self, query: ParamSpec) -> &mut Self {
        self.set(Fact::Queries(vec![query]))
    }

    pub fn body(&mut self, body: BodySpec) -> &mut Self {
        self.set(Fact::Body(body))
    }

    /// Append a response. Repeating a status code keeps both entries.
    pub fn response(&mut self, response: ResponseSpec) -> &mut Self {
        self.set(Fact::Responses(vec![response]))
    }

    pub fn tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(Fact::Tags(tags.into_iter().map(Into::into).collect()))
    }

    /// Require the named security scheme with the given scopes.
    pub fn security<I, S>(&mut self, scheme: impl Into<String>, scopes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requirement = SecurityRequirement::new();
        requirement.insert(scheme.into(), scopes.into_iter().map(Into::into).collect());
        self.set(Fact::Security(vec![requirement]))
    }
}
