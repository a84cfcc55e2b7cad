//! List screens: a fetched list plus a local filter.

mod filter;
mod view_model;

pub use filter::*;
pub use view_model::*;
