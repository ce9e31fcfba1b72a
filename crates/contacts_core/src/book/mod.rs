//! Address book: the name-keyed contact collection.
//!
//! # Responsibility
//! - Own all records of one book and route every mutation through its store.
//! - Provide lookup, substring search, birthday queries and iteration.
//!
//! # Invariants
//! - Keys are record names; inserting an existing name replaces the record.
//! - After `add_record` or `delete` returns `Ok`, the store holds exactly the
//!   in-memory collection.
//! - Edits made through `find_mut` are persisted only by an explicit `save`.
//! - A failed save does not roll back the in-memory change.
//! - Iteration order is insertion order. Replacing a record keeps its slot;
//!   deleting one shifts the later records up.

use crate::model::field::Field;
use crate::model::record::Record;
use crate::search::substring::{search_all, SearchHit, SearchQuery};
use crate::store::{BookStore, JsonFileStore, RecordMap, StoreResult};
use chrono::NaiveDate;
use log::{debug, info};
use std::path::PathBuf;

mod iter;

pub use iter::AddressBookIter;

/// Record paired with its birthday countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingBirthday<'a> {
    pub record: &'a Record,
    pub days: i64,
}

/// Contact collection bound to one persistence store.
#[derive(Debug)]
pub struct AddressBook<S: BookStore = JsonFileStore> {
    store: S,
    records: RecordMap,
}

impl AddressBook<JsonFileStore> {
    /// Opens the book stored at `path`, starting empty when the file is absent.
    ///
    /// # Errors
    /// - Returns a store error when the file exists but cannot be read or
    ///   decoded.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::with_store(JsonFileStore::new(path))
    }
}

impl<S: BookStore> AddressBook<S> {
    /// Creates a book over `store` and loads its current contents.
    pub fn with_store(store: S) -> StoreResult<Self> {
        let records = store.load()?.unwrap_or_default();
        info!(
            "event=book_open module=book status=ok records={}",
            records.len()
        );
        Ok(Self { store, records })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Inserts `record` under its name and persists the whole book.
    ///
    /// Returns the record previously stored under the same name.
    pub fn add_record(&mut self, record: Record) -> StoreResult<Option<Record>> {
        let key = record.name().value().to_string();
        let replaced = self.records.insert(key, record);
        debug!(
            "event=record_add module=book replaced={} records={}",
            replaced.is_some(),
            self.records.len()
        );
        self.save()?;
        Ok(replaced)
    }

    /// Exact-name lookup.
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Exact-name lookup for in-place edits. Call [`Self::save`] afterwards.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Removes the record named `name` and persists the book.
    ///
    /// Nothing is written when no such record exists.
    pub fn delete(&mut self, name: &str) -> StoreResult<Option<Record>> {
        let Some(removed) = self.records.shift_remove(name) else {
            debug!("event=record_delete module=book status=absent");
            return Ok(None);
        };
        debug!(
            "event=record_delete module=book status=ok records={}",
            self.records.len()
        );
        self.save()?;
        Ok(Some(removed))
    }

    /// Case-insensitive substring search over names and phones.
    ///
    /// A record is returned once per matching field, so a contact whose name
    /// and two phones match appears three times.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        self.search_hits(query)
            .into_iter()
            .map(|hit| hit.record)
            .collect()
    }

    /// Same matching as [`Self::search`], reporting which field matched.
    pub fn search_hits(&self, query: &str) -> Vec<SearchHit<'_>> {
        let hits = search_all(self.records.values(), &SearchQuery::new(query));
        debug!(
            "event=book_search module=book hits={} query_len={}",
            hits.len(),
            query.chars().count()
        );
        hits
    }

    /// Records whose next birthday is at most `within_days` after `today`.
    ///
    /// Sorted by days remaining, then by name.
    pub fn upcoming_birthdays(
        &self,
        today: NaiveDate,
        within_days: i64,
    ) -> Vec<UpcomingBirthday<'_>> {
        let mut upcoming = self
            .records
            .values()
            .filter_map(|record| {
                let days = record.days_to_birthday_from(today)?;
                (days <= within_days).then_some(UpcomingBirthday { record, days })
            })
            .collect::<Vec<_>>();
        upcoming.sort_by(|left, right| {
            left.days
                .cmp(&right.days)
                .then_with(|| left.record.name().cmp(right.record.name()))
        });
        upcoming
    }

    /// Iterates over a snapshot of the current records.
    pub fn iter(&self) -> AddressBookIter<'_> {
        AddressBookIter::new(self.records.values())
    }

    /// Record names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the whole collection to the store.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save(&self.records)
    }

    /// Replaces the in-memory collection with the stored one.
    ///
    /// Unsaved `find_mut` edits are discarded.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.records = self.store.load()?.unwrap_or_default();
        Ok(())
    }
}

impl<'a, S: BookStore> IntoIterator for &'a AddressBook<S> {
    type Item = &'a Record;
    type IntoIter = AddressBookIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
