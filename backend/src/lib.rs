//! TrustyHire backend library.
//!
//! Recruiters post jobs and triage applicants; job seekers search, apply and
//! bookmark. The crate is laid out hexagonally: [`domain`] holds the rules
//! and ports, [`inbound`] adapts HTTP onto the driving ports and
//! [`outbound`] implements the driven ports against PostgreSQL, the identity
//! provider, the object store and SMTP.

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
pub use domain::TraceId;
pub use middleware::Trace;
