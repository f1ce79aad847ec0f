//! Per-collection invariant policies.
//!
//! [`PolicyFlags`] is fixed when a collection is built. The [`Nullable`] trait
//! tells the policy layer which element values count as "null" for types that
//! have a natural empty sentinel (`Option::None`, a dangling `Weak`).

use std::rc;
use std::sync;

use bitflags::bitflags;

use crate::error::{CollectionError, Result};

// ---------------------------------------------------------------------------
// PolicyFlags
// ---------------------------------------------------------------------------

bitflags! {
    /// Invariant toggles attached to a collection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PolicyFlags: u8 {
        /// No restrictions.
        const NONE = 0;
        /// Null items cannot be inserted or assigned.
        const NO_NULL = 1 << 0;
        /// Existing items cannot be replaced by index assignment.
        const NO_REPLACE = 1 << 1;
        /// Both [`NO_NULL`](Self::NO_NULL) and [`NO_REPLACE`](Self::NO_REPLACE).
        const NO_NULL_OR_REPLACE = Self::NO_NULL.bits() | Self::NO_REPLACE.bits();
    }
}

impl PolicyFlags {
    /// Whether null items are rejected.
    pub fn forbids_null(self) -> bool {
        self.contains(Self::NO_NULL)
    }

    /// Whether index assignment is rejected.
    pub fn forbids_replace(self) -> bool {
        self.contains(Self::NO_REPLACE)
    }

    /// Fail with [`CollectionError::NullNotAllowed`] if `item` is null and
    /// this policy forbids it.
    pub fn check_item<T: Nullable + ?Sized>(self, item: &T) -> Result<()> {
        if self.forbids_null() && item.is_null() {
            tracing::debug!(flags = ?self, "rejected null item");
            return Err(CollectionError::NullNotAllowed);
        }
        Ok(())
    }

    /// Fail with [`CollectionError::PolicyViolation`] if replacement is forbidden.
    pub fn check_replace(self) -> Result<()> {
        if self.forbids_replace() {
            tracing::debug!(flags = ?self, "rejected item replacement");
            return Err(CollectionError::PolicyViolation(
                "replacing items is not allowed",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Nullable
// ---------------------------------------------------------------------------

/// Element types that may hold an empty sentinel value.
///
/// The default implementation reports "never null", so domain types opt in
/// with an empty `impl Nullable for MyItem {}`. Types with a real sentinel
/// override [`is_null`](Nullable::is_null).
pub trait Nullable {
    /// Whether this value is the null sentinel.
    fn is_null(&self) -> bool {
        false
    }
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: ?Sized> Nullable for rc::Weak<T> {
    fn is_null(&self) -> bool {
        self.strong_count() == 0
    }
}

impl<T: ?Sized> Nullable for sync::Weak<T> {
    fn is_null(&self) -> bool {
        self.strong_count() == 0
    }
}

impl<T: ?Sized> Nullable for rc::Rc<T> {}
impl<T: ?Sized> Nullable for sync::Arc<T> {}
impl<T: ?Sized> Nullable for Box<T> {}
impl<T> Nullable for Vec<T> {}
impl<T: ?Sized> Nullable for &T {}

macro_rules! never_null {
    ($($ty:ty),* $(,)?) => {
        $(impl Nullable for $ty {})*
    };
}

macro_rules! never_null_tuple {
    ($(($($name:ident),+)),* $(,)?) => {
        $(impl<$($name),+> Nullable for ($($name,)+) {})*
    };
}

never_null_tuple!((A, B), (A, B, C), (A, B, C, D));

never_null!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, str, (),
);

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Flags ────────────────────────────────────────────────────────

    #[test]
    fn default_is_none() {
        assert_eq!(PolicyFlags::default(), PolicyFlags::NONE);
        assert!(!PolicyFlags::NONE.forbids_null());
        assert!(!PolicyFlags::NONE.forbids_replace());
    }

    #[test]
    fn combined_flag_covers_both() {
        let flags = PolicyFlags::NO_NULL_OR_REPLACE;
        assert!(flags.forbids_null());
        assert!(flags.forbids_replace());
        assert_eq!(flags, PolicyFlags::NO_NULL | PolicyFlags::NO_REPLACE);
    }

    #[test]
    fn check_item_only_rejects_null_under_no_null() {
        let none: Option<u32> = None;
        assert!(PolicyFlags::NONE.check_item(&none).is_ok());
        assert_eq!(
            PolicyFlags::NO_NULL.check_item(&none),
            Err(CollectionError::NullNotAllowed)
        );
        assert!(PolicyFlags::NO_NULL.check_item(&Some(3)).is_ok());
    }

    #[test]
    fn check_replace() {
        assert!(PolicyFlags::NO_NULL.check_replace().is_ok());
        assert!(matches!(
            PolicyFlags::NO_REPLACE.check_replace(),
            Err(CollectionError::PolicyViolation(_))
        ));
    }

    // ── Nullable ─────────────────────────────────────────────────────

    #[test]
    fn plain_values_are_never_null() {
        assert!(!0_i32.is_null());
        assert!(!String::new().is_null());
        assert!(!"".is_null());
        assert!(!rc::Rc::new(5).is_null());
    }

    #[test]
    fn dangling_weak_is_null() {
        let strong = rc::Rc::new(1);
        let weak = rc::Rc::downgrade(&strong);
        assert!(!weak.is_null());
        drop(strong);
        assert!(weak.is_null());
    }
}
