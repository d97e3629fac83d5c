//! Error types and Result alias for the Campus Finders client

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the Campus Finders client
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("At most {max} locations can be selected")]
    CapacityExceeded { max: usize },

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Session token expired")]
    TokenExpired,

    #[error("Server returned HTTP {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Attachment error: {0}")]
    AttachmentError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service context has been disposed")]
    ServiceDisposed,
}

/// Input problems that are recovered locally and surfaced as a blocking notice
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("specify a location")]
    MissingLocation,

    #[error("answer all quiz questions")]
    UnansweredQuiz,

    #[error("select exactly {required} photos (currently {actual})")]
    AttachmentCount { required: usize, actual: usize },

    #[error("date {date} is in the future")]
    FutureDate { date: NaiveDate },

    #[error("the description cannot change once the quiz has been generated")]
    QuizFrozen,

    #[error("tap the map to mark where the item was found")]
    MissingItemLocation,
}

/// Coarse classification used to decide how a failure is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or bad user input; no state transition
    Validation,
    /// Location capacity reached; input silently rejected
    Capacity,
    /// Transport failure before a status was received
    Network,
    /// Non-success status or malformed body
    Server,
    /// Misuse of the client itself (bad config, illegal transition)
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::CapacityExceeded { .. } => ErrorKind::Capacity,
            Error::NetworkError(_) => ErrorKind::Network,
            Error::AuthenticationError(_)
            | Error::TokenExpired
            | Error::ServerError { .. }
            | Error::InvalidData(_) => ErrorKind::Server,
            Error::InvalidTransition { .. }
            | Error::AttachmentError(_)
            | Error::Config(_)
            | Error::ServiceDisposed => ErrorKind::Internal,
        }
    }

    /// Text shown to the user in a notice
    pub fn notice(&self) -> String {
        match self {
            Error::Validation(v) => v.to_string(),
            Error::CapacityExceeded { max } => {
                format!("you can mark at most {} locations", max)
            }
            Error::NetworkError(_) => "could not reach the server, try again".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_notices() {
        let err: Error = ValidationError::MissingLocation.into();
        assert_eq!(err.notice(), "specify a location");
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err: Error = ValidationError::UnansweredQuiz.into();
        assert_eq!(err.notice(), "answer all quiz questions");
    }

    #[test]
    fn test_remote_failures_are_classified() {
        let err = Error::ServerError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(Error::TokenExpired.kind(), ErrorKind::Server);
        assert_eq!(Error::NetworkError("reset".into()).kind(), ErrorKind::Network);
        assert_eq!(Error::CapacityExceeded { max: 3 }.kind(), ErrorKind::Capacity);
    }
}
