//! Error types shared by `safe_run` and the retry helpers

use std::any::Any;
use std::fmt::Display;

/// Uniform representation of a failure raised by a wrapped operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct OperationError {
    message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Normalize any displayable failure, keeping its message
    pub fn from_display<E: Display + ?Sized>(error: &E) -> Self {
        Self::new(error.to_string())
    }

    /// Normalize a panic payload caught while running an operation
    ///
    /// `&str` and `String` payloads keep their text; anything else is stringified
    /// to a fixed message since the payload type is unknown.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "operation panicked".to_string(),
            },
        };
        Self::new(message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    /// Rejected before the first attempt
    #[error("Invalid retry configuration: {0}")]
    InvalidConfig(String),
    /// Every attempt failed; carries the error from the final attempt
    #[error("Retry exhausted after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: E },
}

impl<E> RetryError<E> {
    /// Number of attempts made, `None` when no attempt ran
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryError::InvalidConfig(_) => None,
            RetryError::Exhausted { attempts, .. } => Some(*attempts),
        }
    }

    pub fn into_last_error(self) -> Option<E> {
        match self {
            RetryError::InvalidConfig(_) => None,
            RetryError::Exhausted { last_error, .. } => Some(last_error),
        }
    }
}
