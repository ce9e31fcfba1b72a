//! Core domain logic for the contacts manager.
//! This crate is the single source of truth for contact invariants.

pub mod book;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use book::{AddressBook, AddressBookIter, UpcomingBirthday};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::field::{Birthday, Field, FieldError, FieldKind, Name, Phone};
pub use model::record::{Record, RecordError};
pub use search::substring::{search_all, MatchedField, SearchHit, SearchQuery};
pub use service::contact_service::{ContactService, NewContact, ServiceError, ServiceResult};
pub use store::{
    BookStore, JsonFileStore, MemoryStore, RecordMap, StoreError, StoreResult,
    LATEST_FORMAT_VERSION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
