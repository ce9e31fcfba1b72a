//! Validated scalar fields of a contact.
//!
//! # Responsibility
//! - Own the format rules for contact names, phone numbers and birthdays.
//! - Guarantee that a constructed field always holds a valid value.
//!
//! # Invariants
//! - `Phone` holds exactly 10 ASCII digits.
//! - `Birthday` holds a `YYYY-MM-DD` string that names a real calendar date.
//! - `set` never leaves a field holding a rejected value.
//! - Deserialization runs the same validators as construction.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PHONE_DIGITS: usize = 10;
const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

static BIRTHDAY_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid birthday regex"));

/// Concrete field kind, used to name the failing field in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Phone,
    Birthday,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Birthday => "Birthday",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for field construction and reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    InvalidFormat { kind: FieldKind, value: String },
}

impl FieldError {
    /// Returns the field kind that rejected the value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::InvalidFormat { kind, .. } => *kind,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat { kind, value } => {
                write!(f, "Invalid {kind} format: `{value}`")
            }
        }
    }
}

impl Error for FieldError {}

/// Shared contract of every validated field.
///
/// Implementors store a single string value that has passed
/// [`Field::is_valid`]. Construction and reassignment both go through
/// [`Field::check`].
pub trait Field: Sized {
    const KIND: FieldKind;

    /// Returns whether `value` is acceptable for this field kind.
    fn is_valid(value: &str) -> bool;

    /// Returns the stored value.
    fn value(&self) -> &str;

    /// Validates `value`, returning it unchanged on success.
    fn check(value: String) -> Result<String, FieldError> {
        if Self::is_valid(&value) {
            Ok(value)
        } else {
            Err(FieldError::InvalidFormat {
                kind: Self::KIND,
                value,
            })
        }
    }
}

/// Contact name. Any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Field for Name {
    const KIND: FieldKind = FieldKind::Name;

    fn is_valid(_value: &str) -> bool {
        true
    }

    fn value(&self) -> &str {
        &self.0
    }
}

/// Phone number made of exactly 10 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Creates a phone after validating the 10-digit format.
    ///
    /// # Errors
    /// - `FieldError::InvalidFormat` with `FieldKind::Phone` otherwise.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        Self::check(value.into()).map(Self)
    }

    /// Replaces the number, keeping the old one when `value` is invalid.
    pub fn set(&mut self, value: impl Into<String>) -> Result<(), FieldError> {
        self.0 = Self::check(value.into())?;
        Ok(())
    }
}

impl Field for Phone {
    const KIND: FieldKind = FieldKind::Phone;

    fn is_valid(value: &str) -> bool {
        value.len() == PHONE_DIGITS && value.bytes().all(|byte| byte.is_ascii_digit())
    }

    fn value(&self) -> &str {
        &self.0
    }
}

/// Birthday stored as `YYYY-MM-DD`.
///
/// Month and day must be zero-padded: `1990-05-15` is accepted, `1990-5-15`
/// is rejected, unlike lenient `strptime`-style parsers that take both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday {
    raw: String,
    date: NaiveDate,
}

impl Birthday {
    /// Creates a birthday from an ISO calendar date string.
    ///
    /// # Errors
    /// - `FieldError::InvalidFormat` with `FieldKind::Birthday` when the
    ///   shape is wrong, month or day is not zero-padded, or the date does
    ///   not exist (e.g. `2023-02-29`).
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let raw = value.into();
        let Some(date) = parse_birthday(&raw) else {
            return Err(FieldError::InvalidFormat {
                kind: Self::KIND,
                value: raw,
            });
        };
        Ok(Self { raw, date })
    }

    /// Replaces the date, keeping the old one when `value` is invalid.
    pub fn set(&mut self, value: impl Into<String>) -> Result<(), FieldError> {
        *self = Self::new(value)?;
        Ok(())
    }

    /// Parsed calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Field for Birthday {
    const KIND: FieldKind = FieldKind::Birthday;

    fn is_valid(value: &str) -> bool {
        parse_birthday(value).is_some()
    }

    fn value(&self) -> &str {
        &self.raw
    }
}

fn parse_birthday(value: &str) -> Option<NaiveDate> {
    if !BIRTHDAY_SHAPE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT).ok()
}

macro_rules! impl_string_conversions {
    ($($ty:ty),+) => {$(
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.value())
            }
        }

        impl From<$ty> for String {
            fn from(field: $ty) -> Self {
                field.value().to_string()
            }
        }
    )+};
}

impl_string_conversions!(Name, Phone, Birthday);

impl TryFrom<String> for Phone {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Birthday {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Birthday, Field, FieldError, FieldKind, Name, Phone};

    #[test]
    fn name_accepts_any_string() {
        assert!(Name::is_valid(""));
        assert_eq!(Name::new("Jane Doe").to_string(), "Jane Doe");
    }

    #[test]
    fn phone_accepts_ten_ascii_digits() {
        let phone = Phone::new("0123456789").expect("ten digits should be valid");
        assert_eq!(phone.value(), "0123456789");
        assert_eq!(phone.to_string(), "0123456789");
    }

    #[test]
    fn phone_rejects_wrong_length_and_non_digits() {
        for value in ["", "123456789", "12345678901", "12345abcde", "123-456-78", "١٢٣٤٥٦٧٨٩٠"] {
            let err = Phone::new(value).expect_err("value should be rejected");
            assert_eq!(err.kind(), FieldKind::Phone, "value `{value}`");
        }
    }

    #[test]
    fn phone_set_keeps_previous_value_on_error() {
        let mut phone = Phone::new("1234567890").unwrap();
        let err = phone.set("12").unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidFormat {
                kind: FieldKind::Phone,
                value: "12".to_string(),
            }
        );
        assert_eq!(phone.value(), "1234567890");

        phone.set("0987654321").unwrap();
        assert_eq!(phone.value(), "0987654321");
    }

    #[test]
    fn birthday_accepts_iso_dates() {
        let birthday = Birthday::new("2000-02-29").expect("leap day should be valid");
        assert_eq!(birthday.value(), "2000-02-29");
        assert_eq!(
            birthday.date(),
            chrono::NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
        );
    }

    #[test]
    fn birthday_rejects_malformed_and_impossible_dates() {
        for value in [
            "1990/05/15",
            "15-05-1990",
            "1990-5-15",
            "abcd-ef-gh",
            "1990-13-01",
            "2023-02-29",
            "1990-05-15 ",
            "",
        ] {
            let err = Birthday::new(value).expect_err("value should be rejected");
            assert_eq!(err.kind(), FieldKind::Birthday, "value `{value}`");
        }
    }

    #[test]
    fn birthday_requires_zero_padded_month_and_day() {
        for value in ["1990-5-15", "1990-05-5", "1990-5-5"] {
            assert_eq!(
                Birthday::new(value).unwrap_err(),
                FieldError::InvalidFormat {
                    kind: FieldKind::Birthday,
                    value: value.to_string(),
                }
            );
        }
        assert!(Birthday::is_valid("1990-05-05"));
    }

    #[test]
    fn error_message_names_field_kind() {
        let err = Birthday::new("nope").unwrap_err();
        assert!(err.to_string().contains("Invalid Birthday format"));
    }
}
