//! Versioned routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → GuardConfig::range (validate each range)
//!     → Group by path, keep registration order
//!     → Freeze as immutable VersionRouter
//!
//! Incoming Request (path, version header):
//!     → router.rs (path lookup, then guards in order)
//!     → Return: Matched | Rejected(error) | Unmatched
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Several routes may share a path; a `Skip` moves on to the next one
//! - First route whose guard proceeds wins

pub mod router;

pub use router::{RouteMatch, VersionRouter};
