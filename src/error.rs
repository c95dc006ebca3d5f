//! Typed errors and HTTP mapping.
//!
//! `AppError::into_response` is the one place a failure becomes an HTTP response;
//! every handler, extractor rejection, router fallback and caught panic goes through it.

use crate::response::failed;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Which store constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
    Other,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign_key",
            ConstraintKind::NotNull => "not_null",
            ConstraintKind::Check => "check",
            ConstraintKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Classified failure reported by a [`crate::store::Store`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("{kind} constraint violated: {message}")]
    ConstraintViolation { kind: ConstraintKind, message: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NotFound => "not_found",
            StoreError::ConstraintViolation { .. } => "constraint_violation",
            StoreError::Unavailable(_) => "unavailable",
            StoreError::Query(_) => "query",
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StoreError::ConstraintViolation {
                kind: ConstraintKind::ForeignKey,
                ..
            }
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) => {
                let kind = match db.kind() {
                    sqlx::error::ErrorKind::UniqueViolation => ConstraintKind::Unique,
                    sqlx::error::ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
                    sqlx::error::ErrorKind::NotNullViolation => ConstraintKind::NotNull,
                    sqlx::error::ErrorKind::CheckViolation => ConstraintKind::Check,
                    _ => return StoreError::Query(db.message().to_string()),
                };
                StoreError::ConstraintViolation {
                    kind,
                    message: db.message().to_string(),
                }
            }
            unavailable @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)) => StoreError::Unavailable(unavailable.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Carries the id exactly as the client sent it.
    #[error("Usuario con id: {0} no encontrado")]
    UsuarioNotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("ruta no encontrada: {0}")]
    RouteNotFound(String),
    #[error("método no permitido")]
    MethodNotAllowed,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UsuarioNotFound(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value placed under `data.error`: the message for client errors, the classified failure otherwise.
    fn error_value(&self) -> Value {
        match self {
            AppError::Store(e) => serde_json::json!({
                "kind": e.kind(),
                "message": e.to_string(),
            }),
            AppError::Internal(msg) => serde_json::json!({
                "kind": "internal",
                "message": msg,
            }),
            other => Value::String(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, failed(self.error_value())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_embeds_raw_id() {
        let e = AppError::UsuarioNotFound("abc".into());
        assert_eq!(e.to_string(), "Usuario con id: abc no encontrado");
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_are_server_errors_with_kind() {
        let e = AppError::from(StoreError::Unavailable("pool closed".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let v = e.error_value();
        assert_eq!(v["kind"], "unavailable");
        assert_eq!(v["message"], "store unavailable: pool closed");
    }

    #[test]
    fn sqlx_errors_are_classified() {
        assert!(matches!(StoreError::from(sqlx::Error::RowNotFound), StoreError::NotFound));
        assert!(matches!(StoreError::from(sqlx::Error::PoolTimedOut), StoreError::Unavailable(_)));
        assert!(matches!(StoreError::from(sqlx::Error::PoolClosed), StoreError::Unavailable(_)));
        assert!(matches!(
            StoreError::from(sqlx::Error::ColumnNotFound("x".into())),
            StoreError::Query(_)
        ));
    }

    #[test]
    fn foreign_key_violation_is_detected() {
        let e = StoreError::ConstraintViolation {
            kind: ConstraintKind::ForeignKey,
            message: "ticket_author_id_fkey".into(),
        };
        assert!(e.is_foreign_key_violation());
        assert!(!StoreError::NotFound.is_foreign_key_violation());
    }
}
