pub mod config;
pub mod controller;
pub mod layers;
pub mod meta;
pub mod prelude;

pub use config::{AppConfig, ConfigError, ConfigValue, FromConfigValue};
pub use controller::{Annotations, Controller, MemberAnnotations};
pub use layers::{default_cors, default_trace, init_tracing};
pub use meta::{
    BodySpec, ControllerDescriptor, Fact, FactKey, HttpMethod, MetaStore, OperationDescriptor,
    OperationSpec, ParamSpec, ResponseSpec, SecurityRequirement, Subject, TypeKey,
};
