//! Error taxonomy for collection operations.
//!
//! Every failure is a programmer error raised synchronously at the point of
//! violation. The container never retries or recovers on its own.

/// Errors returned by [`ObservableList`](crate::collection::ObservableList) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// An index argument fell outside the valid range for the operation.
    #[error("index {index} is out of range for a collection of {count} items")]
    IndexOutOfRange { index: usize, count: usize },
    /// A null item was offered to a collection with [`PolicyFlags::NO_NULL`](crate::policy::PolicyFlags::NO_NULL).
    #[error("null items are not allowed in this collection")]
    NullNotAllowed,
    /// The operation is forbidden by the collection's policy flags.
    #[error("policy violation: {0}")]
    PolicyViolation(&'static str),
    /// A mutation was attempted while a change notification was being
    /// delivered to more than one listener.
    #[error("cannot change the collection while a change notification is in progress")]
    ReentrancyViolation,
    /// An item-based lookup found nothing.
    #[error("item is not in the collection")]
    NotFound,
}

/// Result alias used throughout the crate.
pub type Result<T, E = CollectionError> = std::result::Result<T, E>;
