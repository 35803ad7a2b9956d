//! Error types for Examcore

use thiserror::Error;
use crate::quiz::QuizError;

/// Main error type for classroom operations
#[derive(Error, Debug)]
pub enum ExamError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Question evaluation or list handling failed
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Lookup column is not one of the allowed keys
    #[error("Invalid query key: {0}")]
    InvalidQueryKey(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Exam not found
    #[error("Exam not found: {0}")]
    ExamNotFound(String),

    /// Question not found
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    /// Score not found
    #[error("Score not found: {0}")]
    ScoreNotFound(String),

    /// Username already registered
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Input rejected by validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Exam no longer accepts answers
    #[error("Exam closed: {0}")]
    ExamClosed(String),

    /// Role lacks the permission for this operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<rusqlite::Error> for ExamError {
    fn from(err: rusqlite::Error) -> Self {
        ExamError::DatabaseError(err.to_string())
    }
}

/// Result type alias for classroom operations
pub type Result<T> = std::result::Result<T, ExamError>;
