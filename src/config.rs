//! Construction-time configuration for collections.

use crate::policy::PolicyFlags;

/// Configuration for a new [`ObservableList`](crate::collection::ObservableList).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConfig {
    /// Policy flags, fixed for the lifetime of the collection.
    pub flags: PolicyFlags,
    /// Initial capacity reserved for the backing storage.
    pub capacity: usize,
}

impl ListConfig {
    /// Create a new default config (no policy, no reserved capacity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy flags (builder).
    pub fn with_flags(mut self, flags: PolicyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the initial capacity (builder).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
