use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use thiserror::Error;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("evaluation incomplete: missing {}", missing.join(", "))]
    IncompleteEvaluation { missing: Vec<String> },
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::IncompleteEvaluation { .. } => "INCOMPLETE_EVALUATION",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        match self {
            ApiError::InvalidInput(_) => {
                err = err.extend_with(|_err, e| {
                    e.set("type", "BAD_REQUEST");
                });
            }
            ApiError::IncompleteEvaluation { missing } => {
                err = err.extend_with(|_err, e| {
                    e.set("missing", missing.clone());
                });
            }
            _ => {}
        }
        err
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    ApiError::internal(err.into()).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn extension(err: &Error, key: &str) -> Option<Value> {
        err.extensions.as_ref().and_then(|map| map.get(key)).cloned()
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = internal_error(anyhow::anyhow!("boom"));
        assert_eq!(err.message, "internal server error");
        assert_eq!(extension(&err, "code"), Some(Value::from("INTERNAL")));
    }

    #[test]
    fn incomplete_evaluation_lists_missing_criteria() {
        let err = ApiError::IncompleteEvaluation {
            missing: vec!["Teamwork".into(), "Punctuality".into()],
        }
        .extend();
        assert_eq!(err.message, "evaluation incomplete: missing Teamwork, Punctuality");
        assert_eq!(
            extension(&err, "code"),
            Some(Value::from("INCOMPLETE_EVALUATION"))
        );
        assert_eq!(
            extension(&err, "missing"),
            Some(Value::List(vec![
                Value::from("Teamwork"),
                Value::from("Punctuality"),
            ]))
        );
    }

    #[test]
    fn invalid_input_is_tagged_bad_request() {
        let err = ApiError::InvalidInput("rating 9 outside 1..=5".into()).extend();
        assert_eq!(extension(&err, "type"), Some(Value::from("BAD_REQUEST")));
        assert_eq!(extension(&err, "code"), Some(Value::from("INVALID_INPUT")));
    }
}
