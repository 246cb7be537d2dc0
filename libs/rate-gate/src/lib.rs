//! Time-gated invocation of synchronous callbacks
//!
//! - [`debounce`]: trailing edge, a burst of calls runs the callback once with the last arguments
//! - [`throttle`]: leading edge, the first call runs and later calls inside the window are dropped
//!
//! Each wrapper owns its own timer or timestamp; clones of a wrapper share it.
//!
//! ```rust,no_run
//! use rate_gate::{debounce, throttle};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let save = debounce(
//!         |draft: String| println!("saving {}", draft),
//!         Duration::from_millis(300),
//!     );
//!     save.call("h".to_string());
//!     save.call("hello".to_string()); // only this one is saved
//!
//!     let report = throttle(
//!         |pos: (i32, i32)| println!("at {:?}", pos),
//!         Duration::from_millis(100),
//!     );
//!     report.call((0, 0));
//!     report.call((1, 1)); // dropped
//! }
//! ```

pub mod debounce;
pub mod throttle;

pub use debounce::{debounce, Debounced};
pub use throttle::{throttle, Throttled};
