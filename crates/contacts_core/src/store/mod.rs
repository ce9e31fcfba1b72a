//! Address book persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by `AddressBook`.
//! - Keep file format details inside the persistence boundary.
//!
//! # Invariants
//! - `save` writes the complete collection; there are no partial updates.
//! - `load` returns `Ok(None)` when nothing was ever saved.
//! - Loaded records passed the same validation as freshly built ones.

use crate::model::record::Record;
use indexmap::IndexMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file_store;
mod memory_store;

pub use file_store::{JsonFileStore, LATEST_FORMAT_VERSION};
pub use memory_store::MemoryStore;

/// Name-keyed collection snapshot exchanged with stores.
///
/// Insertion ordered; replacing a record keeps its original position.
pub type RecordMap = IndexMap<String, Record>;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    UnsupportedFormatVersion {
        found: u32,
        latest_supported: u32,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "address book file `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode address book: {err}"),
            Self::Decode { path, source } => write!(
                f,
                "failed to decode address book file `{}`: {source}",
                path.display()
            ),
            Self::UnsupportedFormatVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "address book format version {found} is newer than supported {latest_supported}"
            ),
            Self::InvalidData(message) => write!(f, "invalid address book data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::UnsupportedFormatVersion { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

/// Whole-collection persistence for an address book.
pub trait BookStore {
    /// Reads the last saved collection, or `None` when nothing is stored yet.
    fn load(&self) -> StoreResult<Option<RecordMap>>;
    /// Replaces the stored collection with `records`.
    fn save(&self, records: &RecordMap) -> StoreResult<()>;
}

impl<S: BookStore + ?Sized> BookStore for &S {
    fn load(&self) -> StoreResult<Option<RecordMap>> {
        (**self).load()
    }

    fn save(&self, records: &RecordMap) -> StoreResult<()> {
        (**self).save(records)
    }
}

/// Rejects snapshots whose map key differs from the record name.
pub(crate) fn check_keys(records: &RecordMap) -> StoreResult<()> {
    use crate::model::field::Field;

    for (key, record) in records {
        if key != record.name().value() {
            return Err(StoreError::InvalidData(format!(
                "record key `{key}` does not match record name `{}`",
                record.name()
            )));
        }
    }
    Ok(())
}
