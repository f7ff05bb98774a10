//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeout)
//!     → routing::VersionRouter (guards for the path, in order)
//!         Proceed → that route's response
//!         Skip    → next route on the path; 404 once none is left
//!         Fail    → error response (400 for ApiVersionError)
//!     → Send to client
//! ```
//!
//! `middleware/version_guard.rs` guards a single axum route instead; a
//! `Skip` there is a 404 with no fall-through.

pub mod middleware;
pub mod server;

pub use middleware::{version_guard, ApiVersion};
pub use server::{shutdown_signal, HttpServer, ServerError};
