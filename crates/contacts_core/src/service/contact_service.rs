//! Contact use-case service.
//!
//! # Responsibility
//! - Provide persisted entry points for contact create/edit/delete.
//! - Translate "record missing" into a semantic error for callers.
//!
//! # Invariants
//! - Every successful mutating call leaves the store equal to memory.
//! - A rejected edit is not persisted and leaves the record unchanged.
//! - Contacts are validated in full before they replace an existing entry.

use crate::book::{AddressBook, UpcomingBirthday};
use crate::model::field::FieldError;
use crate::model::record::{Record, RecordError};
use crate::store::{BookStore, StoreError};
use chrono::NaiveDate;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No contact with the requested name.
    ContactNotFound(String),
    /// Record-level validation or phone lookup failure.
    Record(RecordError),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactNotFound(name) => write!(f, "contact not found: {name}"),
            Self::Record(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ContactNotFound(_) => None,
            Self::Record(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RecordError> for ServiceError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

impl From<FieldError> for ServiceError {
    fn from(value: FieldError) -> Self {
        Self::Record(RecordError::Field(value))
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request model for creating or replacing one contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub birthday: Option<String>,
    pub phones: Vec<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn into_record(self) -> Result<Record, FieldError> {
        let mut record = match self.birthday {
            Some(birthday) => Record::with_birthday(self.name, birthday)?,
            None => Record::new(self.name),
        };
        for phone in self.phones {
            record.add_phone(phone)?;
        }
        Ok(record)
    }
}

/// Contact service facade over an address book.
pub struct ContactService<S: BookStore> {
    book: AddressBook<S>,
}

impl<S: BookStore> ContactService<S> {
    pub fn new(book: AddressBook<S>) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &AddressBook<S> {
        &self.book
    }

    pub fn into_book(self) -> AddressBook<S> {
        self.book
    }

    /// Creates a contact, replacing any contact with the same name.
    ///
    /// Returns the replaced contact, if any.
    pub fn add_contact(&mut self, contact: NewContact) -> ServiceResult<Option<Record>> {
        let record = contact.into_record()?;
        Ok(self.book.add_record(record)?)
    }

    pub fn get_contact(&self, name: &str) -> Option<&Record> {
        self.book.find(name)
    }

    pub fn list_contacts(&self) -> Vec<&Record> {
        self.book.iter().collect()
    }

    /// Removes a contact.
    ///
    /// # Errors
    /// - `ServiceError::ContactNotFound` when no contact has this name.
    pub fn delete_contact(&mut self, name: &str) -> ServiceResult<Record> {
        self.book
            .delete(name)?
            .ok_or_else(|| ServiceError::ContactNotFound(name.to_string()))
    }

    pub fn add_phone(&mut self, name: &str, phone: &str) -> ServiceResult<&Record> {
        self.update(name, |record| Ok(record.add_phone(phone)?))
    }

    pub fn edit_phone(&mut self, name: &str, old: &str, new: &str) -> ServiceResult<&Record> {
        self.update(name, |record| record.edit_phone(old, new))
    }

    /// Removes the first matching phone.
    ///
    /// # Errors
    /// - `RecordError::PhoneNotFound` when the contact has no such phone.
    ///   The record-level operation itself treats this as a no-op; the
    ///   service reports it so callers can tell the user.
    pub fn remove_phone(&mut self, name: &str, phone: &str) -> ServiceResult<&Record> {
        self.update(name, |record| {
            if record.find_phone(phone).is_none() {
                return Err(RecordError::PhoneNotFound(phone.to_string()));
            }
            record.remove_phone(phone);
            Ok(())
        })
    }

    pub fn set_birthday(&mut self, name: &str, birthday: &str) -> ServiceResult<&Record> {
        self.update(name, |record| Ok(record.set_birthday(birthday)?))
    }

    pub fn clear_birthday(&mut self, name: &str) -> ServiceResult<&Record> {
        self.update(name, |record| {
            record.clear_birthday();
            Ok(())
        })
    }

    pub fn search(&self, query: &str) -> Vec<&Record> {
        self.book.search(query)
    }

    pub fn upcoming_birthdays(
        &self,
        today: NaiveDate,
        within_days: i64,
    ) -> Vec<UpcomingBirthday<'_>> {
        self.book.upcoming_birthdays(today, within_days)
    }

    fn update<F>(&mut self, name: &str, edit: F) -> ServiceResult<&Record>
    where
        F: FnOnce(&mut Record) -> Result<(), RecordError>,
    {
        let record = self
            .book
            .find_mut(name)
            .ok_or_else(|| ServiceError::ContactNotFound(name.to_string()))?;
        if let Err(err) = edit(record) {
            warn!(
                "event=contact_update module=service status=rejected {}",
                rejection_fields(&err)
            );
            return Err(err.into());
        }

        self.book.save()?;
        self.book
            .find(name)
            .ok_or_else(|| ServiceError::ContactNotFound(name.to_string()))
    }
}

/// Log fields for a rejected edit. Carries codes only, never the values.
fn rejection_fields(err: &RecordError) -> String {
    match err {
        RecordError::PhoneNotFound(_) => "error_code=phone_not_found".to_string(),
        RecordError::Field(field_err) => {
            format!("error_code=invalid_format kind={}", field_err.kind())
        }
    }
}
