//! Per-request version decision.
//!
//! ```text
//! Start
//!   → extract   ── absent / empty ──→ Fail(MISSING_VERSION)
//!   → parse     ── not semver     ──→ Fail(MALFORMED_VERSION)
//!   → satisfies ── yes            ──→ Proceed
//!               ── no             ──→ Skip
//! ```

use std::fmt;
use std::sync::Arc;

use semver::Version;

use crate::guard::error::{ErrorFactory, MALFORMED_VERSION, MISSING_VERSION};
use crate::guard::source::{RequestHeaders, VersionSource};
use crate::versioning::VersionRange;

/// Outcome of checking one request against a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<E> {
    /// The version is in range; run the guarded handler.
    Proceed(Version),
    /// The version is well formed but out of range; this route does not apply.
    Skip(Version),
    /// The request carries no usable version.
    Fail(E),
}

impl<E> Decision<E> {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Decision::Proceed(_))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Decision::Skip(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Decision::Fail(_))
    }

    /// Short label used in logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            Decision::Proceed(_) => "proceed",
            Decision::Skip(_) => "skip",
            Decision::Fail(_) => "fail",
        }
    }
}

/// Decides, per request, whether a versioned route applies.
///
/// Immutable after construction; share it freely across requests.
pub struct Guard<R, E> {
    source: VersionSource<R>,
    range: Arc<VersionRange>,
    error_factory: ErrorFactory<E>,
}

impl<R, E> Guard<R, E> {
    pub(crate) fn new(source: VersionSource<R>, range: VersionRange, error_factory: ErrorFactory<E>) -> Self {
        Self {
            source,
            range: Arc::new(range),
            error_factory,
        }
    }

    /// The range this guard was registered with.
    pub fn range(&self) -> &VersionRange {
        &self.range
    }

    pub fn source(&self) -> &VersionSource<R> {
        &self.source
    }

    /// Check a request. Never panics; every outcome is a `Decision`.
    pub fn decide(&self, req: &R) -> Decision<E>
    where
        R: RequestHeaders,
    {
        let raw = match self.source.extract(req) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                tracing::debug!(range = %self.range, "Request has no API version");
                return Decision::Fail((self.error_factory)(MISSING_VERSION));
            }
        };

        let version = match Version::parse(&raw) {
            Ok(version) => version,
            Err(err) => {
                tracing::debug!(version = %raw, error = %err, "Malformed API version");
                return Decision::Fail((self.error_factory)(MALFORMED_VERSION));
            }
        };

        let decision = if self.range.satisfies(&version) {
            Decision::Proceed(version)
        } else {
            Decision::Skip(version)
        };

        tracing::debug!(
            version = %raw,
            range = %self.range,
            outcome = decision.outcome(),
            "Version guard decision"
        );
        decision
    }
}

impl<R, E> Clone for Guard<R, E> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            range: Arc::clone(&self.range),
            error_factory: Arc::clone(&self.error_factory),
        }
    }
}

impl<R, E> fmt::Debug for Guard<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("source", &self.source)
            .field("range", &self.range.as_str())
            .finish_non_exhaustive()
    }
}
