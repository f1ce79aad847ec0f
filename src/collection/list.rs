//! `ObservableList<T>`: the notifying sequence store.
//!
//! All operations take `&self`. Listeners receive `&ObservableList<T>` and
//! may call back into it while a notification is being delivered; the
//! reentrancy monitor decides whether such a nested mutation is allowed.
//! No borrow of the backing storage is held while listeners run, which is
//! why notifications carry owned clones of the affected items.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Range;

use crate::config::ListConfig;
use crate::error::{CollectionError, Result};
use crate::notify::change::{CollectionChange, PropertyChange};
use crate::notify::guard::{BusyGuard, ReentrancyMonitor};
use crate::notify::registry::{Registry, Subscription};
use crate::policy::{Nullable, PolicyFlags};

/// Handler for structural change notifications.
pub type ChangeHandler<T> = Box<dyn Fn(&ObservableList<T>, &CollectionChange<T>) -> Result<()>>;

/// Handler for property change notifications.
pub type PropertyHandler<T> = Box<dyn Fn(&ObservableList<T>, &PropertyChange<T>) -> Result<()>>;

// ---------------------------------------------------------------------------
// Mutation preconditions
// ---------------------------------------------------------------------------

/// A pending mutation, described for the precondition check.
pub(crate) enum Mutation<'a, T> {
    Insert { index: usize, item: &'a T },
    Replace { index: usize, item: &'a T },
    Remove { index: usize },
    Move { old_index: usize, new_index: usize },
    Reorder { range: Option<&'a Range<usize>> },
    Clear,
}

fn in_bounds(index: usize, count: usize) -> Result<()> {
    if index < count {
        Ok(())
    } else {
        Err(CollectionError::IndexOutOfRange { index, count })
    }
}

// ---------------------------------------------------------------------------
// ObservableList
// ---------------------------------------------------------------------------

/// An ordered collection that notifies listeners of every change.
///
/// Structural changes ([`CollectionChange`]) go to listeners registered with
/// [`subscribe`](Self::subscribe); aggregate property changes
/// ([`PropertyChange`]) go to listeners registered with
/// [`subscribe_properties`](Self::subscribe_properties). Both channels deliver
/// in registration order, fully, before the mutating call returns.
pub struct ObservableList<T> {
    pub(crate) items: RefCell<Vec<T>>,
    flags: PolicyFlags,
    monitor: ReentrancyMonitor,
    structural: RefCell<Registry<ChangeHandler<T>>>,
    properties: RefCell<Registry<PropertyHandler<T>>>,
    pub(crate) range_op: Cell<bool>,
}

impl<T: Clone + Nullable + 'static> ObservableList<T> {
    /// Create an empty list with no policy restrictions.
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    /// Create an empty list with the given policy.
    pub fn with_flags(flags: PolicyFlags) -> Self {
        Self::with_config(ListConfig::new().with_flags(flags))
    }

    /// Create an empty list from a config.
    pub fn with_config(config: ListConfig) -> Self {
        Self::from_vec(Vec::with_capacity(config.capacity), config.flags)
    }

    /// Wrap existing storage. The list takes ownership of `items`; existing
    /// elements are not re-validated against `flags`.
    pub fn from_vec(items: Vec<T>, flags: PolicyFlags) -> Self {
        Self {
            items: RefCell::new(items),
            flags,
            monitor: ReentrancyMonitor::new(),
            structural: RefCell::new(Registry::new()),
            properties: RefCell::new(Registry::new()),
            range_op: Cell::new(false),
        }
    }

    /// Release the backing storage.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_inner()
    }

    // ── Policy ───────────────────────────────────────────────────────

    /// The policy flags.
    pub fn flags(&self) -> PolicyFlags {
        self.flags
    }

    /// Whether inserting a null item fails.
    pub fn throws_on_null(&self) -> bool {
        self.flags.forbids_null()
    }

    /// Turn a policy flag on or off.
    ///
    /// Flags are fixed once a list is handed out; only collections composed
    /// inside this crate adjust them, and never from inside a listener.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn set_policy_flag(&mut self, flag: PolicyFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    /// Single entry point for every mutator's preconditions.
    pub(crate) fn precondition(&self, mutation: Mutation<'_, T>) -> Result<()> {
        self.check_reentrancy()?;
        let count = self.len();
        match mutation {
            Mutation::Insert { index, item } => {
                in_bounds(index, count + 1)?;
                self.flags.check_item(item)
            }
            Mutation::Replace { index, item } => {
                self.flags.check_replace()?;
                in_bounds(index, count)?;
                self.flags.check_item(item)
            }
            Mutation::Remove { index } => in_bounds(index, count),
            Mutation::Move {
                old_index,
                new_index,
            } => {
                in_bounds(old_index, count)?;
                in_bounds(new_index, count)
            }
            Mutation::Reorder { range: Some(range) } => {
                if range.end > count {
                    return Err(CollectionError::IndexOutOfRange {
                        index: range.end,
                        count,
                    });
                }
                if range.start > range.end {
                    return Err(CollectionError::IndexOutOfRange {
                        index: range.start,
                        count: range.end,
                    });
                }
                Ok(())
            }
            Mutation::Reorder { range: None } | Mutation::Clear => Ok(()),
        }
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Register a structural change listener.
    ///
    /// The listener runs until the returned [`Subscription`] is dropped or
    /// passed to [`unsubscribe`](Self::unsubscribe). An error returned by the
    /// listener stops the dispatch and is returned by the mutating call.
    pub fn subscribe(
        &self,
        handler: impl Fn(&Self, &CollectionChange<T>) -> Result<()> + 'static,
    ) -> Subscription {
        self.structural.borrow_mut().register(Box::new(handler))
    }

    /// Register a property change listener.
    pub fn subscribe_properties(
        &self,
        handler: impl Fn(&Self, &PropertyChange<T>) -> Result<()> + 'static,
    ) -> Subscription {
        self.properties.borrow_mut().register(Box::new(handler))
    }

    /// Remove a listener from either channel.
    ///
    /// Returns `false` if the subscription was not issued by this list, in
    /// which case it stays registered wherever it came from.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.structural.borrow_mut().unregister(subscription)
            || self.properties.borrow_mut().unregister(subscription)
    }

    /// Number of live structural listeners.
    pub fn listener_count(&self) -> usize {
        self.structural.borrow().len()
    }

    /// Number of live property listeners.
    pub fn property_listener_count(&self) -> usize {
        self.properties.borrow().len()
    }

    // ── Reentrancy ───────────────────────────────────────────────────

    /// Fail with [`CollectionError::ReentrancyViolation`] if a structural
    /// notification is being delivered and more than one listener could
    /// observe a nested change.
    pub fn check_reentrancy(&self) -> Result<()> {
        self.monitor.check(self.listener_count())
    }

    /// Hold the list busy, as if a notification were in flight, until the
    /// guard is dropped.
    pub fn block_reentrancy(&self) -> BusyGuard<'_> {
        self.monitor.enter()
    }

    /// Whether a structural notification is being delivered.
    pub fn is_dispatching(&self) -> bool {
        self.monitor.is_busy()
    }

    /// Whether [`add_range`](Self::add_range) is running.
    pub fn range_op_in_progress(&self) -> bool {
        self.range_op.get()
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    pub(crate) fn notify(&self, change: &CollectionChange<T>) -> Result<()> {
        let handlers = self.structural.borrow_mut().snapshot();
        let _busy = self.monitor.enter();
        for handler in &handlers {
            handler(self, change)?;
        }
        Ok(())
    }

    pub(crate) fn notify_property(&self, change: PropertyChange<T>) -> Result<()> {
        let handlers = self.properties.borrow_mut().snapshot();
        for handler in &handlers {
            handler(self, &change)?;
        }
        Ok(())
    }

    /// Structural notification followed by `Count` and `Indexer`.
    fn notify_resized(&self, change: CollectionChange<T>) -> Result<()> {
        self.notify(&change)?;
        self.notify_property(PropertyChange::Count)?;
        self.notify_property(PropertyChange::Indexer)
    }

    // ── Size ─────────────────────────────────────────────────────────

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Alias of [`len`](Self::len).
    pub fn count(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Insert `item` at `index`, shifting later items right.
    ///
    /// `index` may equal [`len`](Self::len) to append.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        self.precondition(Mutation::Insert {
            index,
            item: &item,
        })?;
        self.items.borrow_mut().insert(index, item.clone());
        tracing::trace!(index, count = self.len(), "inserted item");
        self.notify_resized(CollectionChange::Add { index, item })
    }

    /// Append `item`.
    pub fn push(&self, item: T) -> Result<()> {
        self.insert(self.len(), item)
    }

    /// Insert `item` at the front.
    pub fn prepend(&self, item: T) -> Result<()> {
        self.insert(0, item)
    }

    /// Remove and return the item at `index`.
    pub fn remove_at(&self, index: usize) -> Result<T> {
        self.precondition(Mutation::Remove { index })?;
        let item = self.items.borrow_mut().remove(index);
        tracing::trace!(index, count = self.len(), "removed item");
        self.notify_resized(CollectionChange::Remove {
            index,
            item: item.clone(),
        })?;
        Ok(item)
    }

    /// Remove the first item, if any.
    pub fn remove_first(&self) -> Result<Option<T>> {
        if self.is_empty() {
            return Ok(None);
        }
        self.remove_at(0).map(Some)
    }

    /// Remove the last item, if any.
    pub fn remove_last(&self) -> Result<Option<T>> {
        match self.len().checked_sub(1) {
            Some(last) => self.remove_at(last).map(Some),
            None => Ok(None),
        }
    }

    /// Remove the first occurrence of `item`. Returns whether one was found.
    pub fn remove(&self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn set(&self, index: usize, item: T) -> Result<T> {
        self.precondition(Mutation::Replace {
            index,
            item: &item,
        })?;
        let old_item = std::mem::replace(&mut self.items.borrow_mut()[index], item.clone());
        tracing::trace!(index, "replaced item");
        self.notify(&CollectionChange::Replace {
            index,
            old_item: old_item.clone(),
            new_item: item,
        })?;
        self.notify_property(PropertyChange::Indexer)?;
        Ok(old_item)
    }

    /// Remove every item, last to first, then announce a reset.
    ///
    /// Each removal is announced on its own so indices stay valid for
    /// listeners during the walk. An empty list does nothing.
    pub fn clear(&self) -> Result<()> {
        self.precondition(Mutation::Clear)?;
        if self.is_empty() {
            return Ok(());
        }
        while let Some(last) = self.len().checked_sub(1) {
            self.remove_at(last)?;
        }
        tracing::trace!("cleared");
        self.notify(&CollectionChange::Reset)
    }
}

impl<T: Clone + Nullable + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Nullable + 'static> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items, PolicyFlags::NONE)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ObservableList");
        match self.items.try_borrow() {
            Ok(items) => s.field("items", &*items),
            Err(_) => s.field("items", &"<borrowed>"),
        };
        s.field("flags", &self.flags)
            .field("structural", &*self.structural.borrow())
            .field("properties", &*self.properties.borrow())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
