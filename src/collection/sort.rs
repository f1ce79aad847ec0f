//! Ordering operations.
//!
//! Every sort rearranges the backing storage in place and then announces
//! `Indexer` followed by one `Reset`. Individual element moves are not
//! reported. All sorts are stable.

use std::cmp::Ordering;
use std::ops::Range;

use super::list::{Mutation, ObservableList};
use crate::error::Result;
use crate::notify::change::{CollectionChange, PropertyChange};
use crate::policy::Nullable;

impl<T: Clone + Nullable + 'static> ObservableList<T> {
    /// Rearrange `range` (or everything) with `arrange`, then announce it.
    fn reorder(
        &self,
        range: Option<Range<usize>>,
        arrange: impl FnOnce(&mut [T]),
    ) -> Result<()> {
        self.precondition(Mutation::Reorder {
            range: range.as_ref(),
        })?;
        {
            let mut items = self.items.borrow_mut();
            let count = items.len();
            arrange(&mut items[range.unwrap_or(0..count)]);
        }
        tracing::trace!(count = self.len(), "sorted");
        self.notify_property(PropertyChange::Indexer)?;
        self.notify(&CollectionChange::Reset)
    }

    /// Sort ascending by the natural order.
    pub fn sort(&self) -> Result<()>
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Sort with `compare`.
    ///
    /// # Panics
    ///
    /// Panics if `compare` touches this list; the contents are borrowed
    /// mutably while it runs.
    pub fn sort_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Result<()> {
        self.reorder(None, |items| items.sort_by(compare))
    }

    /// Sort by a key extracted from each item.
    ///
    /// # Panics
    ///
    /// Panics if `key` touches this list; the contents are borrowed
    /// mutably while it runs.
    pub fn sort_by_key<K: Ord>(&self, key: impl FnMut(&T) -> K) -> Result<()> {
        self.reorder(None, |items| items.sort_by_key(key))
    }

    /// Sort the items in `range` with `compare`, leaving the rest in place.
    ///
    /// # Panics
    ///
    /// Panics if `compare` touches this list; the contents are borrowed
    /// mutably while it runs.
    pub fn sort_range_by(
        &self,
        range: Range<usize>,
        compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<()> {
        self.reorder(Some(range), |items| items.sort_by(compare))
    }

    /// Sort descending by the natural order.
    pub fn sort_descending(&self) -> Result<()>
    where
        T: Ord,
    {
        self.sort_descending_by(T::cmp)
    }

    /// Sort with the reverse of `compare`.
    ///
    /// This negates the comparator rather than reversing a sorted list, so
    /// equal items keep their relative order exactly as in an ascending sort.
    ///
    /// # Panics
    ///
    /// Panics if `compare` touches this list; the contents are borrowed
    /// mutably while it runs.
    pub fn sort_descending_by(
        &self,
        mut compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<()> {
        self.sort_by(move |a, b| compare(a, b).reverse())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
