//! Read-only queries.

use super::list::ObservableList;
use crate::error::{CollectionError, Result};
use crate::policy::Nullable;

impl<T: Clone + Nullable + 'static> ObservableList<T> {
    /// A clone of the item at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        let items = self.items.borrow();
        items
            .get(index)
            .cloned()
            .ok_or(CollectionError::IndexOutOfRange {
                index,
                count: items.len(),
            })
    }

    /// The first item, or `None` when empty.
    pub fn first(&self) -> Option<T> {
        self.items.borrow().first().cloned()
    }

    /// The last item, or `None` when empty.
    pub fn last(&self) -> Option<T> {
        self.items.borrow().last().cloned()
    }

    /// Index of the first occurrence of `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.borrow().iter().position(|x| x == item)
    }

    /// Index of the first occurrence of `item`, or [`CollectionError::NotFound`].
    pub fn item_index(&self, item: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        self.index_of(item).ok_or(CollectionError::NotFound)
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Copy of the current contents.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Read the contents by reference.
    ///
    /// # Panics
    ///
    /// Panics if `f` mutates this list, since the contents stay borrowed
    /// while it runs.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }
}
