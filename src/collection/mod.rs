//! The observable collection: storage, relocation, range and ordering operations.
//!
//! - [`list`] — [`ObservableList`] core: storage, policy checks, dispatch, insert/remove/set/clear.
//! - [`relocate`] — in-place move and `set_item_index`.
//! - [`range`] — `add_range` batching and `set_count`.
//! - [`sort`] — the sort family.
//! - [`query`] — read-only lookups.

pub mod list;
pub mod query;
pub mod range;
pub mod relocate;
pub mod sort;

pub use list::{ChangeHandler, ObservableList, PropertyHandler};
