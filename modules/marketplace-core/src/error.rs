//! Typed errors for read-model queries and account creation.

use thiserror::Error;

/// Errors surfaced by every domain query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Singular lookup on a key that does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Malformed or inconsistent argument (inverted range, negative limit, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reaching the store. Never retried.
    #[error("data access error: {0}")]
    DataAccess(#[from] sqlx::Error),

    /// Request rejected by a policy check, e.g. a wrong elevation phrase
    #[error("policy violation: {0}")]
    PolicyViolation(String),

    /// Failure inside the service itself (hashing, task join)
    #[error("internal error: {0}")]
    Internal(String),
}

impl QueryError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type alias for domain queries.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = QueryError::not_found("product", 7);
        assert_eq!(err.to_string(), "product 7 not found");
    }

    #[test]
    fn sqlx_errors_convert_to_data_access() {
        let err: QueryError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, QueryError::DataAccess(_)));
    }
}
