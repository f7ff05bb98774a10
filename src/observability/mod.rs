//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! guard, middleware, server
//!     → tracing events (structured fields: version, range, outcome)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
