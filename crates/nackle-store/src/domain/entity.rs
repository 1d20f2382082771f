//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! Identifiers are client-generated strings so the UI can render a row
//! before the backend has acknowledged it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;

    /// Soft-delete timestamp (epoch millis), `None` while active
    fn archived_at(&self) -> Option<i64>;

    fn is_archived(&self) -> bool {
        self.archived_at().is_some()
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Foreign key / uniqueness violations reported by SQLite
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Database not initialized")]
    NotInitialized,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Constraint(msg.unwrap_or_else(|| code.to_string()))
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an identifier for rows created without a client-supplied id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_errors_are_classified() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id TEXT PRIMARY KEY)").unwrap();
        conn.execute("INSERT INTO t (id) VALUES ('a')", []).unwrap();
        let err = conn.execute("INSERT INTO t (id) VALUES ('a')", []).unwrap_err();

        assert!(matches!(DomainError::from(err), DomainError::Constraint(_)));
    }

    #[test]
    fn test_other_errors_are_internal() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing", []).unwrap_err();

        assert!(matches!(DomainError::from(err), DomainError::Internal(_)));
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
