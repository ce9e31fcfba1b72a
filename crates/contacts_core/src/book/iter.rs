//! Snapshot cursor over an address book.

use crate::model::record::Record;

/// Iterator over the records present when iteration began.
///
/// Created by [`AddressBook::iter`](super::AddressBook::iter). The book stays
/// borrowed while the iterator is alive, so it cannot be mutated mid-walk.
/// Calling `iter` again starts a fresh pass from the first record.
#[derive(Debug, Clone)]
pub struct AddressBookIter<'a> {
    records: Vec<&'a Record>,
    index: usize,
}

impl<'a> AddressBookIter<'a> {
    pub(crate) fn new(records: impl IntoIterator<Item = &'a Record>) -> Self {
        Self {
            records: records.into_iter().collect(),
            index: 0,
        }
    }
}

impl<'a> Iterator for AddressBookIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.get(self.index).copied()?;
        self.index += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AddressBookIter<'_> {}

impl std::iter::FusedIterator for AddressBookIter<'_> {}
