use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Unknown template: {template_id}")]
    TemplateNotFound { template_id: String },

    #[error("Unknown question '{question_id}' in template {template_id}")]
    QuestionNotFound {
        template_id: String,
        question_id: String,
    },

    #[error("Session incomplete: {answered}/{total} questions answered")]
    SessionIncomplete { answered: usize, total: usize },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection failed: {message}")]
    Connection { message: String },

    #[error("Query failed: {message}")]
    Query { message: String },

    #[error("Migration failed: {message}")]
    Migration { message: String },

    #[error("Failed to deserialize {key}: {message}")]
    Deserialization { key: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Failures of the remote generation provider.
///
/// Every variant is recoverable: the orchestrator converts it into a
/// fallback document plus an advisory, so the type is `Clone` and carries
/// only owned strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("No API key configured; run `askdiary key set <KEY>` to enable AI polishing")]
    MissingCredential,

    #[error("API key was rejected by the provider; check the key in settings")]
    InvalidCredential,

    #[error("Too many requests; wait a moment and try again")]
    RateLimited,

    #[error("Generation provider is temporarily unavailable")]
    ProviderUnavailable,

    #[error("Request timed out; check the network connection")]
    Timeout,

    #[error("Network unreachable; check the network settings")]
    NetworkUnreachable,

    #[error("Generation failed: {message}")]
    Unknown { message: String },
}

impl GenerationError {
    /// Short, stable name of the taxonomy kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => "missing_credential",
            GenerationError::InvalidCredential => "invalid_credential",
            GenerationError::RateLimited => "rate_limited",
            GenerationError::ProviderUnavailable => "provider_unavailable",
            GenerationError::Timeout => "timeout",
            GenerationError::NetworkUnreachable => "network_unreachable",
            GenerationError::Unknown { .. } => "unknown",
        }
    }

    /// Map a non-success HTTP status to the taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 => GenerationError::InvalidCredential,
            429 => GenerationError::RateLimited,
            500..=599 => GenerationError::ProviderUnavailable,
            _ => GenerationError::Unknown {
                message: format!("HTTP {}: {}", status, message.into()),
            },
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else if err.is_connect() {
            GenerationError::NetworkUnreachable
        } else if let Some(status) = err.status() {
            GenerationError::from_status(status.as_u16(), err.to_string())
        } else if err.is_request() {
            // Connection accepted but closed or reset before a response arrived
            GenerationError::NetworkUnreachable
        } else {
            GenerationError::Unknown {
                message: err.to_string(),
            }
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for generation calls
pub type GenerationResult<T> = Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "bad temperature".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: bad temperature");

        let err = AppError::TemplateNotFound {
            template_id: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown template: nope");

        let err = AppError::SessionIncomplete {
            answered: 1,
            total: 3,
        };
        assert_eq!(err.to_string(), "Session incomplete: 1/3 questions answered");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Connection {
            message: "failed to connect".to_string(),
        };
        assert_eq!(err.to_string(), "Database connection failed: failed to connect");

        let err = StorageError::Deserialization {
            key: "askdiary_session_x".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to deserialize askdiary_session_x: expected value"
        );
    }

    #[test]
    fn test_generation_error_from_status() {
        assert_eq!(
            GenerationError::from_status(401, "unauthorized"),
            GenerationError::InvalidCredential
        );
        assert_eq!(
            GenerationError::from_status(429, "slow down"),
            GenerationError::RateLimited
        );
        assert_eq!(
            GenerationError::from_status(500, "boom"),
            GenerationError::ProviderUnavailable
        );
        assert_eq!(
            GenerationError::from_status(503, "maintenance"),
            GenerationError::ProviderUnavailable
        );

        match GenerationError::from_status(400, "bad request body") {
            GenerationError::Unknown { message } => {
                assert!(message.contains("400"));
                assert!(message.contains("bad request body"));
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_generation_error_kind() {
        assert_eq!(GenerationError::MissingCredential.kind(), "missing_credential");
        assert_eq!(GenerationError::Timeout.kind(), "timeout");
        assert_eq!(
            GenerationError::Unknown {
                message: "x".to_string()
            }
            .kind(),
            "unknown"
        );
    }

    #[test]
    fn test_error_conversion_to_app_error() {
        let app_err: AppError = GenerationError::RateLimited.into();
        assert!(matches!(app_err, AppError::Generation(_)));

        let storage_err = StorageError::Query {
            message: "locked".to_string(),
        };
        let app_err: AppError = storage_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }
}
