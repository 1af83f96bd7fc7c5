//! Core handler cell types.

mod builder;
mod handler;
mod handler_cell;

#[cfg(feature = "validation")]
mod validation;

pub use builder::HandlerCellBuilder;
pub use handler::{BoxHandler, Handler, HandlerFn, handler_fn};
pub use handler_cell::HandlerCell;

#[cfg(feature = "validation")]
pub use validation::Validate;
