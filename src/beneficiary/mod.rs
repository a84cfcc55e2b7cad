//! Beneficiary records and their editor form.

mod entity;
mod form;

pub use form::*;

#[cfg(test)]
pub(crate) use form::tests::juan as sample_form;
