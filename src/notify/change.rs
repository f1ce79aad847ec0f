//! Change notification payloads.
//!
//! [`CollectionChange`] describes structural changes (shape or position).
//! [`PropertyChange`] describes aggregate property changes and the terminal
//! signal of a range addition.

use std::fmt;

// ---------------------------------------------------------------------------
// ChangeKind
// ---------------------------------------------------------------------------

/// Discriminant of a [`CollectionChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "Add",
            Self::Remove => "Remove",
            Self::Replace => "Replace",
            Self::Move => "Move",
            Self::Reset => "Reset",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// CollectionChange
// ---------------------------------------------------------------------------

/// A structural change to a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange<T> {
    /// `item` was inserted at `index`.
    Add { index: usize, item: T },
    /// `item` was removed from `index`.
    Remove { index: usize, item: T },
    /// The item at `index` was replaced.
    Replace { index: usize, old_item: T, new_item: T },
    /// `item` moved from `old_index` to `new_index`.
    Move {
        old_index: usize,
        new_index: usize,
        item: T,
    },
    /// The contents changed too much to describe item by item.
    Reset,
}

impl<T> CollectionChange<T> {
    /// The kind of this change.
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Add { .. } => ChangeKind::Add,
            Self::Remove { .. } => ChangeKind::Remove,
            Self::Replace { .. } => ChangeKind::Replace,
            Self::Move { .. } => ChangeKind::Move,
            Self::Reset => ChangeKind::Reset,
        }
    }

    /// The index the change lands on, if any. For a move this is the new index.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Add { index, .. } | Self::Remove { index, .. } | Self::Replace { index, .. } => {
                Some(*index)
            }
            Self::Move { new_index, .. } => Some(*new_index),
            Self::Reset => None,
        }
    }

    /// The previous index of a moved item.
    pub fn old_index(&self) -> Option<usize> {
        match self {
            Self::Move { old_index, .. } => Some(*old_index),
            _ => None,
        }
    }

    /// The item that is now in the collection because of this change.
    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Add { item, .. } | Self::Move { item, .. } => Some(item),
            Self::Replace { new_item, .. } => Some(new_item),
            Self::Remove { .. } | Self::Reset => None,
        }
    }

    /// The item that left its slot because of this change.
    pub fn old_item(&self) -> Option<&T> {
        match self {
            Self::Remove { item, .. } => Some(item),
            Self::Replace { old_item, .. } => Some(old_item),
            _ => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for CollectionChange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { index, item } => write!(f, "Add {index} {item:?}"),
            Self::Remove { index, item } => write!(f, "Remove {index} {item:?}"),
            Self::Replace {
                index,
                old_item,
                new_item,
            } => write!(f, "Replace {index} {old_item:?} -> {new_item:?}"),
            Self::Move {
                old_index,
                new_index,
                item,
            } => write!(f, "Move {old_index} -> {new_index} {item:?}"),
            Self::Reset => f.write_str("Reset"),
        }
    }
}

// ---------------------------------------------------------------------------
// PropertyChange
// ---------------------------------------------------------------------------

/// Property token for the item count.
pub const COUNT_PROPERTY: &str = "Count";
/// Property token for the indexer (any slot's contents).
pub const INDEXER_PROPERTY: &str = "Item[]";
/// Token for the end of a range addition.
pub const RANGE_ADDITION_FINISHED: &str = "RangeAdditionFinished";

/// A named property change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyChange<T> {
    /// The number of items changed.
    Count,
    /// The contents of one or more slots changed.
    Indexer,
    /// A range addition that started at `start` has finished. `items` is the
    /// full input sequence, including any items that failed to land.
    RangeAdditionFinished { start: usize, items: Vec<T> },
}

impl<T> PropertyChange<T> {
    /// The property name token.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => COUNT_PROPERTY,
            Self::Indexer => INDEXER_PROPERTY,
            Self::RangeAdditionFinished { .. } => RANGE_ADDITION_FINISHED,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for PropertyChange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RangeAdditionFinished { start, items } => {
                write!(f, "{} {start} {items:?}", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
