//! Form state and validation shared by every entity editor.
//!
//! A form is a plain value holding the raw strings a user typed. Structured
//! values (dates, numbers) are only parsed when the form is turned into a
//! backend payload, after [`EntityForm::validate`] came back clean.

pub mod dates;
mod rules;

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{Debug, Display};

use thiserror::Error;

use crate::actor_framework::Entity;

pub use rules::*;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Blank,
    #[error("Enter a date as dd/mm/yyyy")]
    InvalidDate,
    #[error("Enter a time as hh:mm")]
    InvalidTime,
    #[error("Phone numbers must have exactly 10 digits")]
    InvalidPhone,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Select at least one option")]
    EmptySelection,
    #[error("Enter a whole number")]
    InvalidNumber,
    #[error("Must be greater than zero")]
    NotPositive,
    #[error("Must have at least {min} characters")]
    TooShort { min: usize },
    #[error("Values do not match")]
    Mismatch,
    #[error("Must be later than the start")]
    EndBeforeStart,
}

/// Per-field validation result. An empty map means the form is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<K: Ord> {
    errors: BTreeMap<K, FieldError>,
}

impl<K: Ord> Default for FieldErrors<K> {
    fn default() -> Self {
        Self { errors: BTreeMap::new() }
    }
}

impl<K: Ord + Copy> FieldErrors<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for `field` unless the field already has one.
    pub fn insert(&mut self, field: K, error: FieldError) {
        self.errors.entry(field).or_insert(error);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: K) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn get(&self, field: K) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = K> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, FieldError> {
        self.errors.iter()
    }

    pub fn merge(&mut self, other: FieldErrors<K>) {
        for (field, error) in other.errors {
            self.insert(field, error);
        }
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl<K: Ord + Copy> FromIterator<(K, FieldError)> for FieldErrors<K> {
    fn from_iter<I: IntoIterator<Item = (K, FieldError)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, error) in iter {
            errors.insert(field, error);
        }
        errors
    }
}

/// Payload type produced by a form for its entity.
pub type PayloadOf<F> = <<F as EntityForm>::Entity as Entity>::Payload;

/// Editable snapshot of one entity.
///
/// `apply` is the reducer behind every field edit; it never touches
/// validation state. Whether edits clear previous errors is decided by the
/// editor, not by the form.
pub trait EntityForm: Clone + Default + PartialEq + Debug + Send + Sync + 'static {
    type Entity: Entity;
    type Field: Copy + Ord + Debug + Display + Send + Sync + 'static;
    type Edit: Debug + Send + 'static;

    const NAME: &'static str;

    fn apply(self, edit: Self::Edit) -> Self;

    fn validate(&self) -> FieldErrors<Self::Field>;

    /// Validation used when the form creates a new record. Forms whose
    /// backend needs more on creation (e.g. an initial password) add it here.
    fn validate_new(&self) -> FieldErrors<Self::Field> {
        self.validate()
    }

    /// Populates a form from a fetched record, dates in display format.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Parses the raw values into the backend payload.
    fn to_payload(&self) -> Result<PayloadOf<Self>, FieldErrors<Self::Field>>;
}
