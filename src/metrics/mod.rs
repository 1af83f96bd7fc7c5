//! Built-in metrics for handler cells.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Dispatched requests
//! - Handler replacements
//! - Validation rejections
//! - Age of the current handler
//! - Active replace subscribers
//!
//! # Examples
//!
//! ```rust,no_run
//! use hotswap_handler::prelude::*;
//! use opentelemetry::global;
//!
//! let meter = global::meter("my-app");
//!
//! let cell = HandlerCell::builder(handler_fn(|_: ()| async { 200u16 }))
//!     .with_name("api")
//!     .with_metrics(meter)
//!     .build();
//! ```

mod handler_metrics;

pub use handler_metrics::HandlerMetrics;
