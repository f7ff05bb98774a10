//! Semver Route Guard Library
//!
//! Decides, per request, whether a versioned route should run, be skipped
//! in favor of another route, or reject the request.
//!
//! ```
//! use axum::{body::Body, http::Request};
//! use semver_router::guard::{Decision, GuardConfig};
//!
//! let v1 = GuardConfig::default().range("1.x.x").unwrap();
//!
//! let req = Request::builder()
//!     .header("accept-version", "1.0.1")
//!     .body(Body::empty())
//!     .unwrap();
//! assert!(v1.decide(&req).is_proceed());
//!
//! let req = Request::builder()
//!     .header("accept-version", "2.0.0")
//!     .body(Body::empty())
//!     .unwrap();
//! assert!(matches!(v1.decide(&req), Decision::Skip(_)));
//! ```

pub mod config;
pub mod guard;
pub mod http;
pub mod observability;
pub mod routing;
pub mod versioning;

pub use config::RouterConfig;
pub use guard::{version, ApiVersionError, ConfigError, Decision, Guard, GuardConfig, GuardOptions};
pub use http::{HttpServer, ServerError};
pub use routing::{RouteMatch, VersionRouter};
pub use versioning::VersionRange;
