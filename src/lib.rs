//! # gilt-observable
//!
//! The notifying item collection behind gilt's data-bound widgets (lists,
//! trees, combo boxes, toolbars).
//!
//! [`ObservableList`] is an ordered, index-addressable sequence that reports
//! every change to registered listeners, enforces per-instance policies, and
//! supports in-place reordering and batched insertion. It is single-threaded:
//! listeners run synchronously, in registration order, before the mutating
//! call returns, and may call back into the list.
//!
//! ## Core Systems
//!
//! - **[`collection`]** — `ObservableList`: insert/remove/set/clear, move, range add, sort
//! - **[`notify`]** — Change payloads, listener registry, reentrancy guard
//! - **[`policy`]** — `PolicyFlags` (`NO_NULL`, `NO_REPLACE`) and the `Nullable` sentinel trait
//! - **[`config`]** — `ListConfig` construction options
//! - **[`error`]** — `CollectionError` taxonomy
//! - **[`testing`]** — `Recorder` for notification transcripts
//!
//! ```
//! use gilt_observable::{ObservableList, PolicyFlags};
//!
//! let list = ObservableList::with_flags(PolicyFlags::NO_REPLACE);
//! let _sub = list.subscribe(|_, change| {
//!     println!("{change}");
//!     Ok(())
//! });
//! list.add_range(["b", "a", "c"]).unwrap();
//! list.move_item(2, 0).unwrap();
//! assert_eq!(list.to_vec(), vec!["c", "b", "a"]);
//! assert!(list.set(0, "z").is_err());
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod policy;

// Notification
pub mod notify;

// Collection
pub mod collection;

// Test support
pub mod testing;

pub use collection::ObservableList;
pub use config::ListConfig;
pub use error::{CollectionError, Result};
pub use notify::{ChangeKind, CollectionChange, PropertyChange, Subscription};
pub use policy::{Nullable, PolicyFlags};
