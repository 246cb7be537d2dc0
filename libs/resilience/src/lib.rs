//! Resilient execution helpers
//!
//! This library provides two ways of running a fallible async operation:
//! - **Safe run**: execute once, capture any error or panic as data instead of propagating it
//! - **Retry**: pure exponential backoff (`base_delay * 2^(attempt - 1)`), surfacing the
//!   final error
//! - **Tower Layer**: the retry policy as composable middleware for Tower services
//! - **Config**: retry settings loaded from environment variables
//!
//! # Example: capture a failure with a fallback
//!
//! ```rust,no_run
//! use resilience::safe_run;
//!
//! #[tokio::main]
//! async fn main() {
//!     let outcome = safe_run(|| async {
//!         // Your fallible call here
//!         Err::<u32, _>("upstream unavailable")
//!     }, Some(0)).await;
//!
//!     let (data, error) = outcome.into_parts();
//!     assert_eq!(data, Some(0));
//!     assert!(error.is_some());
//! }
//! ```
//!
//! # Example: retry with backoff
//!
//! ```rust,no_run
//! use resilience::{retry_with_backoff, RetryError};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let result = retry_with_backoff(
//!         || async { Ok::<_, String>("payload") },
//!         3,
//!         Duration::from_millis(1000),
//!     ).await;
//!
//!     match result {
//!         Ok(payload) => println!("got {}", payload),
//!         Err(RetryError::Exhausted { attempts, last_error }) => {
//!             eprintln!("gave up after {} attempts: {}", attempts, last_error)
//!         }
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod layer;
pub mod metrics;
pub mod outcome;
pub mod retry;

// Re-export main types for convenience
pub use config::ConfigError;
pub use error::{OperationError, RetryError};
pub use layer::{RetryLayer, RetryService};
pub use outcome::{safe_run, Outcome};
pub use retry::{backoff_delay, retry_with_backoff, with_retry, RetryConfig};
