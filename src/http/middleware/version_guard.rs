//! Version Guard Middleware.
//! Runs a [`Guard`] in front of a route and maps its decision onto the response.

use std::fmt;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use semver::Version;

use crate::guard::{Decision, Guard};

/// The accepted API version, attached to requests that pass the guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiVersion(pub Version);

/// Guard middleware for `axum::middleware::from_fn_with_state`.
///
/// - Proceed: the handler runs with [`ApiVersion`] in the request extensions
/// - Fail: the error is rendered as the response
/// - Skip: `404 Not Found`; falling through to another handler is up to the router
pub async fn version_guard<E>(
    State(guard): State<Guard<Request<Body>, E>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    E: IntoResponse + fmt::Display + Send + 'static,
{
    match guard.decide(&req) {
        Decision::Proceed(version) => {
            req.extensions_mut().insert(ApiVersion(version));
            next.run(req).await
        }
        Decision::Skip(version) => {
            tracing::debug!(
                path = %req.uri().path(),
                version = %version,
                range = %guard.range(),
                "No route matches requested API version"
            );
            let body = Json(serde_json::json!({
                "error": format!("No route matches API version {version}"),
            }));
            (StatusCode::NOT_FOUND, body).into_response()
        }
        Decision::Fail(err) => {
            tracing::warn!(path = %req.uri().path(), error = %err, "Rejected API version");
            err.into_response()
        }
    }
}
