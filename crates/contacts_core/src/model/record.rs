//! Contact record model.
//!
//! # Responsibility
//! - Hold one contact: name, ordered phones and optional birthday.
//! - Provide phone list editing and birthday countdown helpers.
//!
//! # Invariants
//! - `name` is set once at construction and never edited.
//! - Every entry in `phones` passed `Phone` validation.
//! - Phone order is insertion order; duplicates are allowed.

use crate::model::field::{Birthday, Field, FieldError, Name, Phone};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for record-level phone and birthday operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Field(FieldError),
    PhoneNotFound(String),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::PhoneNotFound(phone) => write!(f, "Phone number '{phone}' not found"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::PhoneNotFound(_) => None,
        }
    }
}

impl From<FieldError> for RecordError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// One contact entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

impl Record {
    /// Creates a record with no phones and no birthday.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Name::new(name),
            phones: Vec::new(),
            birthday: None,
        }
    }

    /// Creates a record with a validated birthday.
    ///
    /// # Errors
    /// - `FieldError::InvalidFormat` when `birthday` is not `YYYY-MM-DD`.
    pub fn with_birthday(
        name: impl Into<String>,
        birthday: impl Into<String>,
    ) -> Result<Self, FieldError> {
        let mut record = Self::new(name);
        record.birthday = Some(Birthday::new(birthday)?);
        Ok(record)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validates and appends a phone. Duplicates are kept.
    pub fn add_phone(&mut self, value: impl Into<String>) -> Result<(), FieldError> {
        self.phones.push(Phone::new(value)?);
        Ok(())
    }

    /// Removes the first phone equal to `value`; does nothing when absent.
    pub fn remove_phone(&mut self, value: &str) {
        if let Some(index) = self.position_of(value) {
            self.phones.remove(index);
        }
    }

    /// Replaces the first phone equal to `old` with `new`, in place.
    ///
    /// # Errors
    /// - `RecordError::PhoneNotFound` when no phone equals `old`.
    /// - `RecordError::Field` when `new` is not a valid phone.
    ///
    /// The phone list is unchanged on either error.
    pub fn edit_phone(&mut self, old: &str, new: impl Into<String>) -> Result<(), RecordError> {
        let index = self
            .position_of(old)
            .ok_or_else(|| RecordError::PhoneNotFound(old.to_string()))?;
        self.phones[index].set(new)?;
        Ok(())
    }

    /// Returns the first phone equal to `value`.
    pub fn find_phone(&self, value: &str) -> Option<&Phone> {
        self.phones.iter().find(|phone| phone.value() == value)
    }

    /// Sets or replaces the birthday.
    pub fn set_birthday(&mut self, value: impl Into<String>) -> Result<(), FieldError> {
        self.birthday = Some(Birthday::new(value)?);
        Ok(())
    }

    pub fn clear_birthday(&mut self) {
        self.birthday = None;
    }

    /// Days from the local current date to the next birthday.
    ///
    /// Returns `None` when no birthday is set.
    pub fn days_to_birthday(&self) -> Option<i64> {
        self.days_to_birthday_from(Local::now().date_naive())
    }

    /// Days from `today` to the next occurrence of the birthday.
    ///
    /// # Contract
    /// - Returns `Some(0)` when the birthday falls on `today`.
    /// - An occurrence strictly before `today` rolls over to next year.
    /// - Feb 29 birthdays are observed on Feb 28 in non-leap years.
    pub fn days_to_birthday_from(&self, today: NaiveDate) -> Option<i64> {
        let birthday = self.birthday.as_ref()?.date();
        let mut next = occurrence_in_year(birthday, today.year());
        if next < today {
            next = occurrence_in_year(birthday, today.year() + 1);
        }
        Some((next - today).num_days())
    }

    fn position_of(&self, value: &str) -> Option<usize> {
        self.phones.iter().position(|phone| phone.value() == value)
    }
}

fn occurrence_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    birthday
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(birthday)
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(Phone::value)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Contact name: {}, phones: {phones}, ", self.name)?;
        match &self.birthday {
            Some(birthday) => write!(f, "Birthday: {birthday}"),
            None => f.write_str("No birthday"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordError};
    use crate::model::field::{Field, FieldKind};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn john() -> Record {
        let mut record = Record::with_birthday("John", "1990-05-15").unwrap();
        record.add_phone("1234567890").unwrap();
        record.add_phone("5555555555").unwrap();
        record
    }

    #[test]
    fn renders_phones_and_birthday() {
        assert_eq!(
            john().to_string(),
            "Contact name: John, phones: 1234567890; 5555555555, Birthday: 1990-05-15"
        );
    }

    #[test]
    fn renders_missing_birthday_and_empty_phones() {
        assert_eq!(
            Record::new("Solo").to_string(),
            "Contact name: Solo, phones: , No birthday"
        );
    }

    #[test]
    fn add_phone_keeps_duplicates_in_order() {
        let mut record = Record::new("Dup");
        record.add_phone("1111111111").unwrap();
        record.add_phone("2222222222").unwrap();
        record.add_phone("1111111111").unwrap();
        let values: Vec<_> = record.phones().iter().map(|p| p.value()).collect();
        assert_eq!(values, ["1111111111", "2222222222", "1111111111"]);
    }

    #[test]
    fn add_phone_rejects_invalid_value() {
        let mut record = Record::new("Bad");
        let err = record.add_phone("12345").unwrap_err();
        assert_eq!(err.kind(), FieldKind::Phone);
        assert!(record.phones().is_empty());
    }

    #[test]
    fn remove_phone_drops_first_match_only() {
        let mut record = Record::new("Dup");
        record.add_phone("1111111111").unwrap();
        record.add_phone("2222222222").unwrap();
        record.add_phone("1111111111").unwrap();

        record.remove_phone("1111111111");
        let values: Vec<_> = record.phones().iter().map(|p| p.value()).collect();
        assert_eq!(values, ["2222222222", "1111111111"]);

        record.remove_phone("9999999999");
        assert_eq!(record.phones().len(), 2);
    }

    #[test]
    fn edit_phone_replaces_in_place() {
        let mut record = john();
        record.edit_phone("1234567890", "1112223333").unwrap();

        assert!(record.find_phone("1234567890").is_none());
        assert_eq!(
            record.find_phone("1112223333").map(|p| p.to_string()),
            Some("1112223333".to_string())
        );
        assert_eq!(record.phones()[0].value(), "1112223333");
    }

    #[test]
    fn edit_phone_reports_missing_and_invalid() {
        let mut record = john();
        let before = record.clone();

        let err = record.edit_phone("0000000000", "1112223333").unwrap_err();
        assert_eq!(err, RecordError::PhoneNotFound("0000000000".to_string()));
        assert_eq!(record, before);

        let err = record.edit_phone("1234567890", "bad").unwrap_err();
        assert!(matches!(err, RecordError::Field(_)));
        assert_eq!(record, before);
    }

    #[test]
    fn days_to_birthday_is_none_without_birthday() {
        assert_eq!(Record::new("Nobody").days_to_birthday_from(date(2024, 1, 1)), None);
        assert_eq!(Record::new("Nobody").days_to_birthday(), None);
    }

    #[test]
    fn days_to_birthday_counts_forward_and_rolls_over() {
        let record = john();
        assert_eq!(record.days_to_birthday_from(date(2024, 5, 15)), Some(0));
        assert_eq!(record.days_to_birthday_from(date(2024, 5, 10)), Some(5));
        assert_eq!(record.days_to_birthday_from(date(2024, 5, 16)), Some(364));
        assert_eq!(record.days_to_birthday_from(date(2023, 5, 16)), Some(365));
    }

    #[test]
    fn leap_day_birthday_is_observed_on_feb_28() {
        let record = Record::with_birthday("Leap", "2000-02-29").unwrap();
        assert_eq!(record.days_to_birthday_from(date(2023, 2, 28)), Some(0));
        assert_eq!(record.days_to_birthday_from(date(2024, 2, 28)), Some(1));
        assert_eq!(record.days_to_birthday_from(date(2023, 3, 1)), Some(365));
    }

    #[test]
    fn set_and_clear_birthday() {
        let mut record = Record::new("Later");
        record.set_birthday("1985-08-21").unwrap();
        assert_eq!(record.birthday().map(|b| b.value()), Some("1985-08-21"));
        assert!(record.set_birthday("1985-8-21").is_err());
        assert_eq!(record.birthday().map(|b| b.value()), Some("1985-08-21"));
        record.clear_birthday();
        assert!(record.birthday().is_none());
    }
}
