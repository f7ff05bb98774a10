//! Guard error types.
//!
//! Setup problems are programmer mistakes and surface as `ConfigError`
//! from the builder. Request problems are built through the configured
//! error factory and reported as `Decision::Fail`.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::versioning::RangeError;

/// Message reported when the request carries no version.
pub const MISSING_VERSION: &str = "No API version specified on request";

/// Message reported when the request version is not `MAJOR.MINOR.PATCH`.
pub const MALFORMED_VERSION: &str = "Invalid API Version specified. Semver format expected (ex: 1.0.0)";

/// Builds request-time errors from a message.
pub type ErrorFactory<E> = Arc<dyn Fn(&str) -> E + Send + Sync>;

/// Errors raised while setting up a guard.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ambiguous version source: cannot set both a version extractor and a header name")]
    AmbiguousVersionSource,

    #[error("invalid header name `{name}`")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: axum::http::header::InvalidHeaderName,
    },

    #[error("invalid semver range `{range}`")]
    InvalidRange {
        range: String,
        #[source]
        source: RangeError,
    },
}

/// Default request-time error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiVersionError {
    message: String,
}

impl ApiVersionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiVersionError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub(crate) fn default_error_factory() -> ErrorFactory<ApiVersionError> {
    Arc::new(|message: &str| ApiVersionError::new(message))
}
