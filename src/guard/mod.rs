//! Version guard subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (once):
//!     GuardOptions (error factory, extractor | header)
//!     → builder.rs (reject ambiguous source, bad header name)
//!     → GuardConfig
//!     → GuardConfig::range("1.x.x") (reject invalid range)
//!     → Guard (immutable, shared by all requests)
//!
//! Per request:
//!     request
//!     → source.rs (header or custom extractor)
//!     → decision.rs (parse version, test range)
//!     → Decision: Proceed | Skip | Fail(error)
//! ```
//!
//! # Design Decisions
//! - Setup mistakes return `ConfigError`; request problems never do
//! - Out-of-range is a `Skip`, not an error
//! - An empty version is treated the same as a missing one

pub mod builder;
pub mod decision;
pub mod error;
pub mod source;

pub use builder::{version, GuardConfig, GuardOptions};
pub use decision::{Decision, Guard};
pub use error::{ApiVersionError, ConfigError, ErrorFactory, MALFORMED_VERSION, MISSING_VERSION};
pub use source::{Extractor, RequestHeaders, VersionSource, DEFAULT_VERSION_HEADER};
