//! Handler validation support.

use crate::error::ValidationError;

/// Trait for checking a handler before it goes live.
///
/// Implement this on handler types that can be built in a broken state, such
/// as a routing table assembled from a config file. [`HandlerCell::try_replace`]
/// calls it and keeps the current handler when it fails.
///
/// [`HandlerCell::try_replace`]: crate::core::HandlerCell::try_replace
///
/// # Examples
///
/// ```rust
/// use hotswap_handler::core::Validate;
/// use hotswap_handler::error::ValidationError;
///
/// struct RouteTable {
///     routes: Vec<(String, u16)>,
/// }
///
/// impl Validate for RouteTable {
///     fn validate(&self) -> Result<(), ValidationError> {
///         if self.routes.is_empty() {
///             return Err(ValidationError::invalid_field(
///                 "routes",
///                 "a routing table needs at least one route",
///             ));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validate {
    /// Validate the handler.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}
