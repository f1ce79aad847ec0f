//! Listener registry: ordered, non-owning handler slots.
//!
//! Handlers are owned by the [`Subscription`] returned at registration. The
//! registry keeps only a `Weak` reference plus a shared alive flag, so a
//! subscriber that drops its subscription stops counting as registered at
//! once, even while a dispatch snapshot still holds its handler.
//! Ids come from a slotmap arena; delivery order is kept in a separate vec.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a listener registration inside a collection.
    pub struct ListenerId;
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Owning handle for a registered listener.
///
/// The listener stays registered while this value is alive. Drop it (or pass
/// it to `unsubscribe`) to stop receiving notifications.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: ListenerId,
    handler: Rc<dyn Any>,
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    /// The registration id.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    fn handler_ptr(&self) -> *const () {
        Rc::as_ptr(&self.handler) as *const ()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A registered handler and the liveness flag shared with its subscription.
struct Slot<H> {
    handler: Weak<H>,
    alive: Rc<Cell<bool>>,
}

impl<H> Slot<H> {
    fn is_live(&self) -> bool {
        self.alive.get() && self.handler.strong_count() > 0
    }
}

/// Ordered set of weakly held handlers of type `H`.
pub(crate) struct Registry<H> {
    slots: SlotMap<ListenerId, Slot<H>>,
    order: Vec<ListenerId>,
}

impl<H: 'static> Registry<H> {
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register a handler at the end of the delivery order.
    pub(crate) fn register(&mut self, handler: H) -> Subscription {
        self.prune();
        let handler = Rc::new(handler);
        let alive = Rc::new(Cell::new(true));
        let id = self.slots.insert(Slot {
            handler: Rc::downgrade(&handler),
            alive: alive.clone(),
        });
        self.order.push(id);
        Subscription { id, handler, alive }
    }

    /// Remove the registration owned by `subscription`.
    ///
    /// Returns `false` if the subscription does not belong to this registry.
    pub(crate) fn unregister(&mut self, subscription: &Subscription) -> bool {
        let owned = self
            .slots
            .get(subscription.id)
            .is_some_and(|slot| {
                Weak::as_ptr(&slot.handler) as *const () == subscription.handler_ptr()
            });
        if !owned {
            return false;
        }
        self.slots.remove(subscription.id);
        self.order.retain(|&id| id != subscription.id);
        true
    }

    /// Strong references to every live handler, in registration order.
    ///
    /// Dispatch iterates this snapshot, so handlers registered or dropped
    /// while it runs do not disturb the current pass.
    pub(crate) fn snapshot(&mut self) -> Vec<Rc<H>> {
        self.prune();
        self.order
            .iter()
            .filter_map(|&id| self.slots.get(id).and_then(|slot| slot.handler.upgrade()))
            .collect()
    }

    /// Number of live handlers.
    pub(crate) fn len(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_live()).count()
    }

    /// Drop slots whose subscription has been released.
    fn prune(&mut self) {
        let slots = &mut self.slots;
        self.order.retain(|&id| {
            let live = slots.get(id).is_some_and(Slot::is_live);
            if !live {
                slots.remove(id);
            }
            live
        });
    }
}

impl<H> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("registered", &self.order.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
