//! Maps domain errors onto GraphQL errors carrying an `extensions.code`.

use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use marketplace_core::QueryError;

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const DATA_ACCESS: &str = "DATA_ACCESS";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const INTERNAL: &str = "INTERNAL";

pub fn query_error(err: QueryError) -> Error {
    to_graphql(&err)
}

/// Same mapping for errors shared between dataloader waiters.
pub fn loader_error(err: Arc<QueryError>) -> Error {
    to_graphql(&err)
}

pub fn bad_request(message: impl Into<String>) -> Error {
    with_code(message.into(), BAD_REQUEST)
}

fn to_graphql(err: &QueryError) -> Error {
    match err {
        QueryError::NotFound { .. } => with_code(err.to_string(), NOT_FOUND),
        QueryError::InvalidArgument(msg) => with_code(msg.clone(), BAD_REQUEST),
        QueryError::PolicyViolation(msg) => with_code(msg.clone(), FORBIDDEN),
        // Store details stay in the logs.
        QueryError::DataAccess(e) => {
            tracing::error!(error = %e, "data access failed");
            with_code("data access error".to_string(), DATA_ACCESS)
        }
        QueryError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error");
            with_code("internal error".to_string(), INTERNAL)
        }
    }
}

fn with_code(message: String, code: &'static str) -> Error {
    Error::new(message).extend_with(|_, ext| ext.set("code", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn code_of(err: &Error) -> Option<Value> {
        err.extensions.as_ref().and_then(|ext| ext.get("code").cloned())
    }

    #[test]
    fn not_found_keeps_message() {
        let err = query_error(QueryError::not_found("raffle", 42));
        assert_eq!(err.message, "raffle 42 not found");
        assert_eq!(code_of(&err), Some(Value::from(NOT_FOUND)));
    }

    #[test]
    fn data_access_hides_store_details() {
        let err = query_error(QueryError::DataAccess(sqlx::Error::PoolTimedOut));
        assert_eq!(err.message, "data access error");
        assert_eq!(code_of(&err), Some(Value::from(DATA_ACCESS)));
    }

    #[test]
    fn policy_violation_is_forbidden() {
        let err = loader_error(Arc::new(QueryError::PolicyViolation("nope".into())));
        assert_eq!(code_of(&err), Some(Value::from(FORBIDDEN)));
    }
}
