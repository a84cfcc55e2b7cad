use chrono::{NaiveDate, NaiveTime};

use super::dates::{parse_form_date, parse_form_time};
use super::{FieldError, FieldErrors};

pub const PHONE_DIGITS: usize = 10;

/// Chained field checks collecting into a [`FieldErrors`].
///
/// Checks on the same field short-circuit: once a field has an error, later
/// rules for it are skipped, so `required` then `date` reports `Blank` for an
/// empty input rather than `InvalidDate`.
pub struct Validation<K: Ord + Copy> {
    errors: FieldErrors<K>,
}

impl<K: Ord + Copy> Default for Validation<K> {
    fn default() -> Self {
        Self { errors: FieldErrors::new() }
    }
}

impl<K: Ord + Copy> Validation<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, field: K, ok: bool, error: FieldError) -> Self {
        if !ok && !self.errors.contains(field) {
            self.errors.insert(field, error);
        }
        self
    }

    pub fn required(self, field: K, value: &str) -> Self {
        self.check(field, !value.trim().is_empty(), FieldError::Blank)
    }

    pub fn date(self, field: K, value: &str) -> Self {
        self.required(field, value).check(field, parse_form_date(value).is_some(), FieldError::InvalidDate)
    }

    /// Accepts an empty value; anything else must be a date.
    pub fn optional_date(self, field: K, value: &str) -> Self {
        let ok = value.trim().is_empty() || parse_form_date(value).is_some();
        self.check(field, ok, FieldError::InvalidDate)
    }

    pub fn time(self, field: K, value: &str) -> Self {
        self.required(field, value).check(field, parse_form_time(value).is_some(), FieldError::InvalidTime)
    }

    pub fn phone(self, field: K, value: &str) -> Self {
        self.check(field, is_phone(value), FieldError::InvalidPhone)
    }

    pub fn email(self, field: K, value: &str) -> Self {
        self.required(field, value).check(field, is_email(value), FieldError::InvalidEmail)
    }

    pub fn selection<T>(self, field: K, values: &[T]) -> Self {
        self.check(field, !values.is_empty(), FieldError::EmptySelection)
    }

    pub fn positive_integer(self, field: K, value: &str) -> Self {
        let this = self.required(field, value);
        match value.trim().parse::<u32>() {
            Ok(0) => this.check(field, false, FieldError::NotPositive),
            Ok(_) => this,
            Err(_) => this.check(field, false, FieldError::InvalidNumber),
        }
    }

    pub fn min_len(self, field: K, value: &str, min: usize) -> Self {
        self.check(field, value.chars().count() >= min, FieldError::TooShort { min })
    }

    pub fn matches(self, field: K, value: &str, other: &str) -> Self {
        self.check(field, value == other, FieldError::Mismatch)
    }

    /// Flags `end` when both times parse and `end` is not after `start`.
    pub fn time_order(self, end_field: K, start: &str, end: &str) -> Self {
        let ok = match (parse_form_time(start), parse_form_time(end)) {
            (Some(start), Some(end)) => end > start,
            _ => true,
        };
        self.check(end_field, ok, FieldError::EndBeforeStart)
    }

    pub fn finish(self) -> FieldErrors<K> {
        self.errors
    }
}

/// Exactly ten ASCII digits, no separators.
pub fn is_phone(value: &str) -> bool {
    value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !value.contains(char::is_whitespace)
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

/// Parses a field that already passed [`Validation::date`].
pub fn parsed_date<K: Ord + Copy>(field: K, value: &str) -> Result<NaiveDate, FieldErrors<K>> {
    parse_form_date(value).ok_or_else(|| [(field, FieldError::InvalidDate)].into_iter().collect())
}

pub fn parsed_optional_date<K: Ord + Copy>(field: K, value: &str) -> Result<Option<NaiveDate>, FieldErrors<K>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parsed_date(field, value).map(Some)
    }
}

pub fn parsed_time<K: Ord + Copy>(field: K, value: &str) -> Result<NaiveTime, FieldErrors<K>> {
    parse_form_time(value).ok_or_else(|| [(field, FieldError::InvalidTime)].into_iter().collect())
}

pub fn parsed_quantity<K: Ord + Copy>(field: K, value: &str) -> Result<u32, FieldErrors<K>> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| [(field, FieldError::InvalidNumber)].into_iter().collect())
}
