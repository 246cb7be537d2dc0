/// Safe execution: run a fallible future once and capture its failure as data
use crate::error::OperationError;
use crate::metrics::SafeRunMetrics;
use futures_util::FutureExt;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Result of [`safe_run`]
///
/// A success value and an error are never both present. The fallback supplied
/// by the caller only travels inside the failure variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure {
        fallback: Option<T>,
        error: OperationError,
    },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Success value, or the fallback on failure
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure { fallback, .. } => fallback.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&OperationError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { error, .. } => Some(error),
        }
    }

    /// Split into a `(data, error)` pair
    pub fn into_parts(self) -> (Option<T>, Option<OperationError>) {
        match self {
            Outcome::Success(value) => (Some(value), None),
            Outcome::Failure { fallback, error } => (fallback, Some(error)),
        }
    }

    /// Drops the fallback
    pub fn into_result(self) -> Result<T, OperationError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { error, .. } => Err(error),
        }
    }
}

/// Execute an operation exactly once without ever surfacing its failure
///
/// Errors and panics raised by the operation are normalized into an
/// [`OperationError`], logged, and returned inside [`Outcome::Failure`]
/// together with `fallback`.
pub async fn safe_run<F, Fut, T, E>(operation: F, fallback: Option<T>) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    // The closure call is inside the async block so a panic while building
    // the future is caught as well.
    let result = AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await;

    let error = match result {
        Ok(Ok(value)) => {
            SafeRunMetrics::record("success");
            return Outcome::Success(value);
        }
        Ok(Err(e)) => OperationError::from_display(&e),
        Err(payload) => OperationError::from_panic(payload),
    };

    error!(error = %error, has_fallback = fallback.is_some(), "safe_run: operation failed");
    SafeRunMetrics::record("failure");

    Outcome::Failure { fallback, error }
}
