//! Handler replacement notifications.
//!
//! Lets code outside the request path react when a cell's handler changes,
//! for example to warm caches or report the new routing table.

pub mod subscriber;

pub use subscriber::{SubscriberRegistry, SubscriptionHandle};
