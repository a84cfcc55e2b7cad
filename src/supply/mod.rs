//! Inventory batches, including stock withdrawal.

mod actions;
mod entity;
mod form;

pub use actions::*;
pub use form::*;
