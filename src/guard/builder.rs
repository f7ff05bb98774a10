//! Guard configuration.
//!
//! # Responsibilities
//! - Collect options (error factory, version extractor, header name)
//! - Reject ambiguous or malformed options before any request is served
//! - Register version ranges, producing a `Guard` per range
//!
//! # Design Decisions
//! - Two stages: options are validated once, then reused for every range
//! - Extractor and header name are mutually exclusive; the validated form
//!   is a `VersionSource` tagged union so the conflict cannot be represented

use std::fmt;
use std::sync::Arc;

use axum::http::header::HeaderName;

use crate::guard::decision::Guard;
use crate::guard::error::{default_error_factory, ApiVersionError, ConfigError, ErrorFactory};
use crate::guard::source::{Extractor, VersionSource};
use crate::versioning::VersionRange;

/// Raw guard options, validated by [`GuardOptions::build`].
pub struct GuardOptions<R, E = ApiVersionError> {
    error_factory: ErrorFactory<E>,
    get_version: Option<Extractor<R>>,
    header: Option<String>,
}

impl<R> GuardOptions<R> {
    /// Options with the default error type and the `accept-version` header.
    pub fn new() -> Self {
        Self {
            error_factory: default_error_factory(),
            get_version: None,
            header: None,
        }
    }
}

impl<R> Default for GuardOptions<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, E> GuardOptions<R, E> {
    /// Read the version from this header instead of `accept-version`.
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.header = Some(name.into());
        self
    }

    /// Read the version with a custom function.
    pub fn get_version<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        self.get_version = Some(Arc::new(f));
        self
    }

    /// Build request errors with a custom constructor.
    pub fn error_factory<E2, F>(self, f: F) -> GuardOptions<R, E2>
    where
        F: Fn(&str) -> E2 + Send + Sync + 'static,
    {
        GuardOptions {
            error_factory: Arc::new(f),
            get_version: self.get_version,
            header: self.header,
        }
    }

    /// Validate the options.
    pub fn build(self) -> Result<GuardConfig<R, E>, ConfigError> {
        let source = match (self.get_version, self.header) {
            (Some(_), Some(_)) => return Err(ConfigError::AmbiguousVersionSource),
            (Some(f), None) => VersionSource::Extractor(f),
            (None, Some(name)) => VersionSource::Header(parse_header_name(&name)?),
            (None, None) => VersionSource::default(),
        };

        Ok(GuardConfig {
            source,
            error_factory: self.error_factory,
        })
    }
}

/// Validate options, returning a config that registers ranges.
///
/// ```
/// use axum::{body::Body, http::Request};
/// use semver_router::guard::{version, GuardOptions};
///
/// let config = version(GuardOptions::<Request<Body>>::new().header("x-api-version")).unwrap();
/// let v1 = config.range("1.x.x").unwrap();
/// assert_eq!(v1.range().as_str(), "1.x.x");
/// assert!(config.range("invalid").is_err());
/// ```
pub fn version<R, E>(options: GuardOptions<R, E>) -> Result<GuardConfig<R, E>, ConfigError> {
    options.build()
}

pub(crate) fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    HeaderName::try_from(name).map_err(|source| ConfigError::InvalidHeaderName {
        name: name.to_string(),
        source,
    })
}

/// Validated guard configuration, reusable for any number of ranges.
pub struct GuardConfig<R, E = ApiVersionError> {
    source: VersionSource<R>,
    error_factory: ErrorFactory<E>,
}

impl<R> GuardConfig<R> {
    /// Read the version from a header.
    pub fn by_header(name: HeaderName) -> Self {
        Self {
            source: VersionSource::Header(name),
            error_factory: default_error_factory(),
        }
    }

    /// Read the version with a custom function.
    pub fn by_extractor<F>(f: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            source: VersionSource::extractor(f),
            error_factory: default_error_factory(),
        }
    }
}

impl<R> Default for GuardConfig<R> {
    fn default() -> Self {
        Self {
            source: VersionSource::default(),
            error_factory: default_error_factory(),
        }
    }
}

impl<R, E> GuardConfig<R, E> {
    /// Replace the error constructor.
    pub fn with_error_factory<E2, F>(self, f: F) -> GuardConfig<R, E2>
    where
        F: Fn(&str) -> E2 + Send + Sync + 'static,
    {
        GuardConfig {
            source: self.source,
            error_factory: Arc::new(f),
        }
    }

    pub fn source(&self) -> &VersionSource<R> {
        &self.source
    }

    /// Register a version range, producing the guard for one route.
    ///
    /// Fails immediately if the range is not valid semver range syntax.
    pub fn range(&self, range: &str) -> Result<Guard<R, E>, ConfigError> {
        let parsed = VersionRange::parse(range).map_err(|source| ConfigError::InvalidRange {
            range: range.to_string(),
            source,
        })?;

        tracing::debug!(
            range = %parsed,
            source = ?self.source,
            "Version guard registered"
        );

        Ok(Guard::new(
            self.source.clone(),
            parsed,
            Arc::clone(&self.error_factory),
        ))
    }
}

impl<R, E> Clone for GuardConfig<R, E> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            error_factory: Arc::clone(&self.error_factory),
        }
    }
}

impl<R, E> fmt::Debug for GuardConfig<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardConfig")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
