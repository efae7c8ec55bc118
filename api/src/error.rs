//! Unified error types for the registry API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business rule errors (validation, eligibility, conflicts, lookups)
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Per-field validation failures, keyed by the transfer-shape field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first reason reported for a field wins.
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| reason.into());
    }

    /// Fold a rule outcome into the map
    pub fn check(&mut self, field: &str, outcome: Result<(), String>) {
        if let Err(reason) = outcome {
            self.add(field, reason);
        }
    }

    /// Merge failures from a nested shape under a field prefix
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for (field, reason) in other.0 {
            self.add(format!("{}.{}", prefix, field), reason);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing failed, otherwise a `Validation` error carrying every failure
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reason) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, reason)?;
            first = false;
        }
        Ok(())
    }
}

/// Domain layer errors - pure business rule errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Eligibility(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    NotFound {
        entity: &'static str,
        id: String,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Lookup by id failed
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        DomainError::NotFound {
            entity,
            message: format!("{} with ID {} not found", entity, id),
            id,
        }
    }

    /// Detach requested for an address that is not linked to the person
    pub fn address_not_linked(person_id: impl fmt::Display, address_id: impl fmt::Display) -> Self {
        let id = address_id.to_string();
        DomainError::NotFound {
            entity: "Address",
            message: format!("Address with ID {} is not linked to person {}", id, person_id),
            id,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, fields) = match self {
            AppError::Domain(DomainError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                None,
                Some(errors),
            ),
            AppError::Domain(DomainError::Eligibility(msg)) => {
                (StatusCode::BAD_REQUEST, "Not eligible", Some(msg), None)
            }
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg), None)
            }
            AppError::Domain(DomainError::NotFound { message, .. }) => {
                (StatusCode::NOT_FOUND, "Not found", Some(message), None)
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", Some(msg), None),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            fields,
        });

        (status, body).into_response()
    }
}
