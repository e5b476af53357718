use thiserror::Error;

/// Errors from repository operations (used by trait definitions in ochat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Errors talking to the inference backend.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("could not connect to inference backend: {0}")]
    Connection(String),

    #[error("inference backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed inference backend response: {0}")]
    Deserialization(String),
}

/// Errors surfaced by the chat orchestrator and conversation service.
///
/// Each variant maps to one HTTP status at the request boundary:
/// `InvalidRequest` 400, `NotFound` 404, everything else 500.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("conversation not found")]
    NotFound,

    #[error("inference backend unavailable: {0}")]
    BackendUnavailable(#[from] InferenceError),

    #[error("persistence error: {0}")]
    Persistence(RepositoryError),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ChatError::NotFound,
            other => ChatError::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_inference_status_display() {
        let err = InferenceError::Status {
            status: 500,
            body: "model not loaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "inference backend returned HTTP 500: model not loaded"
        );
    }

    #[test]
    fn test_repository_not_found_becomes_chat_not_found() {
        let err: ChatError = RepositoryError::NotFound.into();
        assert!(matches!(err, ChatError::NotFound));
    }

    #[test]
    fn test_other_repository_errors_become_persistence() {
        let err: ChatError = RepositoryError::ConstraintViolation("FOREIGN KEY".into()).into();
        assert!(matches!(
            err,
            ChatError::Persistence(RepositoryError::ConstraintViolation(_))
        ));
    }
}
