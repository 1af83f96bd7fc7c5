//! # hotswap-handler
//!
//! Replace a live request handler atomically while the server keeps serving.
//!
//! ## Overview
//!
//! A long-running server often needs a new routing table or middleware stack
//! without a restart. `hotswap-handler` provides [`HandlerCell`], a slot that:
//! - Holds exactly one current handler, from construction onwards
//! - Is itself a [`Handler`], so it goes wherever the real handler would
//! - Dispatches each request to a lock-free snapshot taken with `arc-swap`
//! - Lets in-flight requests finish on the handler they started with
//! - Swaps in a new handler atomically, never exposing a partial update
//!
//! ## Quick Start
//!
//! ```rust
//! use hotswap_handler::prelude::*;
//!
//! # async fn example() {
//! let router: BoxHandler<String, u16> = Box::new(handler_fn(|_path: String| async { 200u16 }));
//! let cell = HandlerCell::new(router);
//!
//! // Hand `cell.clone()` to the listener loop...
//! assert_eq!(cell.dispatch("/".to_string()).await, 200);
//!
//! // ...and swap the router from anywhere else.
//! cell.replace(Box::new(handler_fn(|_path: String| async { 404u16 })));
//! assert_eq!(cell.dispatch("/".to_string()).await, 404);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `validation` (default): [`Validate`](core::Validate) and `HandlerCell::try_replace`
//! - `tower`: `tower_service::Service` for cells holding a cloneable service
//! - `metrics`: OpenTelemetry dispatch/replace metrics
//! - `tracing`: debug events for every replacement
//!
//! [`HandlerCell`]: core::HandlerCell
//! [`Handler`]: core::Handler

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod notify;

#[cfg(feature = "tower")]
pub mod features;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use async_trait::async_trait;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use async_trait::async_trait;

    pub use crate::core::{
        BoxHandler, Handler, HandlerCell, HandlerCellBuilder, HandlerFn, handler_fn,
    };
    pub use crate::error::{Result, SwapError, ValidationError};
    pub use crate::notify::SubscriptionHandle;

    #[cfg(feature = "validation")]
    pub use crate::core::Validate;
}
