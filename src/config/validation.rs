//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every range and the header name the guards will be built from
//! - Detect conflicting route names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::guard::builder::parse_header_name;
use crate::versioning::VersionRange;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("invalid version header name `{0}`")]
    HeaderName(String),

    #[error("route `{route}`: invalid semver range `{range}`")]
    Range { route: String, range: String },

    #[error("route `{route}`: path `{path}` must start with '/'")]
    Path { route: String, path: String },

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Some(header) = &config.versioning.header {
        if parse_header_name(header).is_err() {
            errors.push(ValidationError::HeaderName(header.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut names = HashSet::new();
    for route in &config.routes {
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }

        if !route.path.starts_with('/') {
            errors.push(ValidationError::Path {
                route: route.name.clone(),
                path: route.path.clone(),
            });
        }

        if !VersionRange::is_valid(&route.range) {
            errors.push(ValidationError::Range {
                route: route.name.clone(),
                range: route.range.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
