//! Semantic version ranges.
//!
//! # Data Flow
//! ```text
//! Route registration:
//!     range string ("1.x.x", ">=1.2.0 <2.0.0 || 3.x")
//!     → range.rs (split into `||` alternatives and comparator tokens)
//!     → comparator.rs (lower each token onto semver::VersionReq syntax)
//!     → VersionRange (validated, immutable)
//!
//! Per request:
//!     semver::Version → VersionRange::satisfies → bool
//! ```
//!
//! # Design Decisions
//! - Ranges follow the npm grammar; precedence rules come from the `semver` crate
//! - A bare version in a range means an exact match, not a caret requirement
//! - Ranges are validated eagerly, so nothing is parsed on the request path

mod comparator;
pub mod range;

pub use range::{RangeError, VersionRange};
