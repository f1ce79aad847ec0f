//! Change notification: payloads, listener registry, reentrancy guard.

pub mod change;
pub mod guard;
pub mod registry;

pub use change::{ChangeKind, CollectionChange, PropertyChange};
pub use guard::BusyGuard;
pub use registry::{ListenerId, Subscription};
