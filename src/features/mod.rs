//! Optional integrations.

#[cfg(feature = "tower")]
pub mod service;

#[cfg(feature = "tower")]
pub use service::ServiceFuture;
