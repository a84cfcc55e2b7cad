mod entity;
mod form;

pub use form::*;
