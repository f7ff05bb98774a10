//! HTTP middleware.

pub mod version_guard;

pub use version_guard::{version_guard, ApiVersion};
