//! Everything a controller declaration needs, in one `use`.
//!
//! ```ignore
//! use tally_core::prelude::*;
//!
//! pub struct HealthController;
//!
//! impl Controller for HealthController {
//!     fn declare(api: &mut Annotations<'_, Self>) {
//!         api.controller("/health", ["System"]);
//!         api.member("health")
//!             .get("")
//!             .operation("Health check")
//!             .response(ResponseSpec::new("200", "Service is healthy"));
//!     }
//! }
//! ```

pub use crate::controller::{Annotations, Controller, MemberAnnotations};
pub use crate::meta::{
    BodySpec, HttpMethod, MetaStore, OperationSpec, ParamSpec, ResponseSpec, TypeKey,
};
