//! Where a guard reads the requested version from.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use axum::http::{header::HeaderName, request::Parts, HeaderMap, Request};

/// Header read when no other source is configured.
pub const DEFAULT_VERSION_HEADER: &str = "accept-version";

/// Maps a request to the raw version string it carries, if any.
pub type Extractor<R> = Arc<dyn Fn(&R) -> Option<String> + Send + Sync>;

/// Request types that expose header lookup.
pub trait RequestHeaders {
    /// Returns the header value, lossily decoded if it is not valid UTF-8.
    fn header(&self, name: &HeaderName) -> Option<Cow<'_, str>>;
}

impl RequestHeaders for HeaderMap {
    fn header(&self, name: &HeaderName) -> Option<Cow<'_, str>> {
        self.get(name)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
    }
}

impl<B> RequestHeaders for Request<B> {
    fn header(&self, name: &HeaderName) -> Option<Cow<'_, str>> {
        self.headers().header(name)
    }
}

impl RequestHeaders for Parts {
    fn header(&self, name: &HeaderName) -> Option<Cow<'_, str>> {
        self.headers.header(name)
    }
}

/// The single place a guard reads the version from.
pub enum VersionSource<R> {
    /// Read a request header.
    Header(HeaderName),
    /// Call a caller-supplied function.
    Extractor(Extractor<R>),
}

impl<R> VersionSource<R> {
    /// Source reading the given header.
    pub fn header(name: HeaderName) -> Self {
        VersionSource::Header(name)
    }

    /// Source calling the given function.
    pub fn extractor<F>(f: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        VersionSource::Extractor(Arc::new(f))
    }

    /// Read the raw version from the request.
    pub fn extract<'r>(&self, req: &'r R) -> Option<Cow<'r, str>>
    where
        R: RequestHeaders,
    {
        match self {
            VersionSource::Header(name) => req.header(name),
            VersionSource::Extractor(f) => f(req).map(Cow::Owned),
        }
    }
}

impl<R> Default for VersionSource<R> {
    fn default() -> Self {
        VersionSource::Header(HeaderName::from_static(DEFAULT_VERSION_HEADER))
    }
}

impl<R> Clone for VersionSource<R> {
    fn clone(&self) -> Self {
        match self {
            VersionSource::Header(name) => VersionSource::Header(name.clone()),
            VersionSource::Extractor(f) => VersionSource::Extractor(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for VersionSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::Header(name) => f.debug_tuple("Header").field(name).finish(),
            VersionSource::Extractor(_) => f.write_str("Extractor(..)"),
        }
    }
}
