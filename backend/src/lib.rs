//! Roster backend library.
//!
//! People and numbered models behind a REST API, with list endpoints that
//! bind loosely typed query parameters into typed filter predicates.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
