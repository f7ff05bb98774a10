//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store guarded routes per path
//! - Look up the route that accepts a request's version
//! - Return the matched route, the guard's error, or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) path lookup via HashMap
//! - O(n) guard scan per path, in registration order
//! - Explicit `Unmatched` rather than silent default

use std::collections::HashMap;

use semver::Version;

use crate::guard::{ApiVersionError, Decision, Guard, RequestHeaders};

/// Outcome of a lookup.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteMatch<'a, T, E> {
    /// A guard proceeded; its route handles the request.
    Matched { target: &'a T, version: Version },
    /// A guard failed the request (missing or malformed version).
    Rejected(E),
    /// No route accepted the request. `version` is `None` for unknown paths.
    Unmatched { version: Option<Version> },
}

struct VersionedRoute<R, T, E> {
    guard: Guard<R, E>,
    target: T,
}

/// Routes keyed by path, each path holding guards in registration order.
pub struct VersionRouter<R, T, E = ApiVersionError> {
    paths: HashMap<String, Vec<VersionedRoute<R, T, E>>>,
}

impl<R, T, E> VersionRouter<R, T, E> {
    pub fn new() -> Self {
        Self { paths: HashMap::new() }
    }

    /// Register a route. Later routes on the same path are tried after earlier ones.
    pub fn insert(&mut self, path: impl Into<String>, guard: Guard<R, E>, target: T) {
        self.paths
            .entry(path.into())
            .or_default()
            .push(VersionedRoute { guard, target });
    }

    /// Find the route for `req` on `path`.
    ///
    /// Guards run in registration order: the first `Proceed` matches, a
    /// `Fail` rejects the request, and a `Skip` tries the next route.
    pub fn lookup(&self, path: &str, req: &R) -> RouteMatch<'_, T, E>
    where
        R: RequestHeaders,
    {
        let Some(routes) = self.paths.get(path) else {
            return RouteMatch::Unmatched { version: None };
        };

        let mut skipped = None;
        for route in routes {
            match route.guard.decide(req) {
                Decision::Proceed(version) => {
                    return RouteMatch::Matched {
                        target: &route.target,
                        version,
                    }
                }
                Decision::Fail(err) => return RouteMatch::Rejected(err),
                Decision::Skip(version) => skipped = Some(version),
            }
        }

        RouteMatch::Unmatched { version: skipped }
    }

    /// Number of registered routes across all paths.
    pub fn len(&self) -> usize {
        self.paths.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<R, T, E> Default for VersionRouter<R, T, E> {
    fn default() -> Self {
        Self::new()
    }
}
