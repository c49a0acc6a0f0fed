//! Blog backend library: domain model, HTTP adapter and storage adapters.
//!
//! The binary in `main.rs` loads [`config::AppSettings`], picks a storage
//! adapter and serves [`build_app`].

pub mod app;
pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use app::build_app;
/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
