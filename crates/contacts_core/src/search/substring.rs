//! Case-insensitive substring search over contact records.
//!
//! # Responsibility
//! - Match a query against each record's name and each rendered phone.
//! - Report one hit per matching field.
//!
//! # Invariants
//! - A record yields one hit for its name and one per matching phone, so it
//!   can appear several times in a result list.
//! - Hits follow record iteration order, then name before phones, then phone
//!   order.
//! - An empty query matches every name and every phone.

use crate::model::field::Field;
use crate::model::record::Record;

/// Which part of a record matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedField {
    Name,
    Phone(String),
}

/// Normalized search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    /// Lowercased query text.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns every field of `record` containing the query.
    pub fn match_record(&self, record: &Record) -> Vec<MatchedField> {
        let mut matched = Vec::new();
        if self.contains(record.name().value()) {
            matched.push(MatchedField::Name);
        }
        matched.extend(
            record
                .phones()
                .iter()
                .filter(|phone| self.contains(phone.value()))
                .map(|phone| MatchedField::Phone(phone.to_string())),
        );
        matched
    }

    fn contains(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(self.needle.as_str())
    }
}

/// Single match returned by [`search_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub record: &'a Record,
    pub field: MatchedField,
}

/// Searches `records` and returns one hit per matching field.
pub fn search_all<'a, I>(records: I, query: &SearchQuery) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .flat_map(|record| {
            query
                .match_record(record)
                .into_iter()
                .map(move |field| SearchHit { record, field })
        })
        .collect()
}
