//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks: ranges, header, routes)
//!     → RouterConfig (validated, immutable)
//!     → HttpServer builds one guard per route
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, LoadError};
pub use schema::{ListenerConfig, ObservabilityConfig, RouteConfig, RouterConfig, TimeoutConfig, VersioningConfig};
pub use validation::{validate_config, ValidationError};
