//! Relocation: moving one item to a new index in place.

use super::list::{Mutation, ObservableList};
use crate::error::{CollectionError, Result};
use crate::notify::change::{CollectionChange, PropertyChange};
use crate::policy::Nullable;

/// Move `items[from]` to `to`, shifting the items in between by one slot.
///
/// Moving forward shifts `(from, to]` left; moving backward shifts
/// `[to, from)` right. Each case is a single rotation of the affected block:
/// the moved item is lifted out, the `|to - from|` items between are copied
/// over as one block, and the moved item is written into its final slot.
/// Items outside the block are not touched.
pub(crate) fn relocate<T>(items: &mut [T], from: usize, to: usize) {
    if to > from {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
}

impl<T: Clone + Nullable + 'static> ObservableList<T> {
    /// Move the item at `old_index` to `new_index`.
    ///
    /// Emits exactly one `Move` notification followed by `Indexer`.
    pub fn move_item(&self, old_index: usize, new_index: usize) -> Result<()> {
        self.precondition(Mutation::Move {
            old_index,
            new_index,
        })?;
        let item = {
            let mut items = self.items.borrow_mut();
            relocate(&mut items, old_index, new_index);
            items[new_index].clone()
        };
        tracing::trace!(old_index, new_index, "moved item");
        self.notify(&CollectionChange::Move {
            old_index,
            new_index,
            item,
        })?;
        self.notify_property(PropertyChange::Indexer)
    }

    /// Move `item` to `new_index`.
    ///
    /// `None`, or an index past the end, moves the item to the last slot.
    /// Nothing happens if the item is already there.
    pub fn set_item_index(&self, item: &T, new_index: Option<usize>) -> Result<()>
    where
        T: PartialEq,
    {
        let current = self.index_of(item).ok_or(CollectionError::NotFound)?;
        let last = self.len() - 1;
        let target = match new_index {
            Some(index) if index <= last => index,
            _ => last,
        };
        if target == current {
            return Ok(());
        }
        self.move_item(current, target)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
