//! Binary search over a sorted identifier list.

use std::{cmp::Ordering, ops::Deref};

use crate::domain::sort;

/// A list of identifiers that is guaranteed to be sorted.
///
/// The only way to build one is to sort the input, so [`SortedIds::find`]
/// can rely on the ordering without re-checking it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedIds(Vec<String>);

impl SortedIds {
    /// Sorts the given identifiers and wraps them.
    #[must_use]
    pub fn from_unsorted(mut ids: Vec<String>) -> Self {
        sort::sort(&mut ids);
        Self(ids)
    }

    /// Searches for `key`, returning the index of a matching entry.
    ///
    /// Comparison is byte-wise lexicographic, the same order the list was
    /// sorted with. When the list holds duplicates of `key`, any one of their
    /// indices may be returned.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<usize> {
        let mut low = 0;
        let mut high = self.0.len();

        while low < high {
            let mid = low + (high - low) / 2;
            match self.0[mid].as_str().cmp(key) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return Some(mid),
            }
        }

        None
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unwraps the sorted list.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for SortedIds {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<String> for SortedIds {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}
