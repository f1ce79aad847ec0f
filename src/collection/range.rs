//! Range operations: batched insertion and resizing.

use std::cell::Cell;

use super::list::ObservableList;
use crate::error::Result;
use crate::notify::change::PropertyChange;
use crate::policy::Nullable;

/// Marks a range operation as running; restores the previous state on drop.
struct RangeScope<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> RangeScope<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for RangeScope<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

impl<T: Clone + Nullable + 'static> ObservableList<T> {
    /// Append every item of `items`, in order.
    ///
    /// Each item lands through an ordinary insert, so listeners see one `Add`
    /// per item. Afterwards a single
    /// [`RangeAdditionFinished`](PropertyChange::RangeAdditionFinished) goes to
    /// property listeners with the starting index and the full input. The
    /// finished signal is sent even when an insert fails partway; that
    /// failure is then returned.
    pub fn add_range(&self, items: impl IntoIterator<Item = T>) -> Result<()> {
        let items: Vec<T> = items.into_iter().collect();
        let start = self.len();
        let inserted = {
            let _scope = RangeScope::enter(&self.range_op);
            items.iter().try_for_each(|item| self.push(item.clone()))
        };
        tracing::trace!(start, added = self.len().saturating_sub(start), "range added");
        let finished = self.notify_property(PropertyChange::RangeAdditionFinished { start, items });
        inserted.and(finished)
    }

    /// Grow or shrink to `new_count` items.
    ///
    /// Growing appends `factory()` once per new slot; shrinking removes from
    /// the tail. Each step is announced like an ordinary insert or removal.
    pub fn set_count(&self, new_count: usize, mut factory: impl FnMut() -> T) -> Result<()> {
        while self.len() > new_count {
            self.remove_last()?;
        }
        while self.len() < new_count {
            self.push(factory())?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
