//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Validate the configuration before any route is built
//! - Dispatch each request through the versioned router
//! - Wire up middleware (tracing, timeout)
//! - Bind server to listener
//! - Stop gracefully on a shutdown signal

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::loader::join_errors;
use crate::config::{validate_config, RouterConfig, ValidationError};
use crate::guard::{version, ConfigError, GuardConfig, GuardOptions};
use crate::routing::{RouteMatch, VersionRouter};

/// Reasons a server cannot be built from a configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What a matched route answers with.
#[derive(Debug, Clone)]
struct RouteTarget {
    name: String,
    body: String,
}

type Routes = Arc<VersionRouter<Request<Body>, RouteTarget>>;

/// HTTP server exposing versioned routes.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configuration does not validate, e.g. a path without a
    /// leading `/`, a duplicate route name or an invalid range.
    pub fn new(config: RouterConfig) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ServerError::Validation)?;

        let guards = match &config.versioning.header {
            Some(header) => version(GuardOptions::new().header(header.as_str()))?,
            None => GuardConfig::default(),
        };

        let router = Self::build_router(&config, &guards)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &RouterConfig,
        guards: &GuardConfig<Request<Body>>,
    ) -> Result<Router, ConfigError> {
        let mut routes = VersionRouter::new();

        for route in &config.routes {
            let guard = guards.range(&route.range)?;
            tracing::info!(
                route = %route.name,
                path = %route.path,
                range = %guard.range(),
                "Versioned route registered"
            );

            let target = RouteTarget {
                name: route.name.clone(),
                body: route.body.clone(),
            };
            routes.insert(route.path.as_str(), guard, target);
        }

        Ok(Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(routes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http()))
    }

    /// Run the server until `signal` resolves.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The assembled router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Answer with the first route on the path whose guard accepts the version.
async fn dispatch(State(routes): State<Routes>, req: Request<Body>) -> Response {
    let path = req.uri().path();

    match routes.lookup(path, &req) {
        RouteMatch::Matched { target, version } => Json(serde_json::json!({
            "route": target.name,
            "version": version.to_string(),
            "body": target.body,
        }))
        .into_response(),
        RouteMatch::Rejected(err) => {
            tracing::warn!(path = %path, error = %err, "Rejected API version");
            err.into_response()
        }
        RouteMatch::Unmatched { version: Some(version) } => {
            tracing::debug!(path = %path, version = %version, "No route matches requested API version");
            let body = Json(serde_json::json!({
                "error": format!("No route matches API version {version}"),
            }));
            (StatusCode::NOT_FOUND, body).into_response()
        }
        RouteMatch::Unmatched { version: None } => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Resolves on Ctrl+C; used as the default shutdown signal.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
