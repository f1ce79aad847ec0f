//! Test helpers: record every notification a list emits.
//!
//! [`Recorder`] subscribes to both channels of an
//! [`ObservableList`](crate::collection::ObservableList) and keeps a
//! transcript, one line per notification, in delivery order. Structural
//! changes render as `Add 0 'a'`, `Move 1 -> 3 'b'`, `Reset`; property
//! changes render as their name (`Count`, `Item[]`) or
//! `RangeAdditionFinished <start> <items>`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collection::ObservableList;
use crate::notify::registry::Subscription;
use crate::policy::Nullable;

/// Records the notification transcript of one list.
pub struct Recorder {
    lines: Rc<RefCell<Vec<String>>>,
    _structural: Subscription,
    _properties: Subscription,
}

impl Recorder {
    /// Start recording `list`. Recording stops when the recorder is dropped.
    pub fn attach<T>(list: &ObservableList<T>) -> Self
    where
        T: Clone + Nullable + fmt::Debug + 'static,
    {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = lines.clone();
        let structural = list.subscribe(move |_, change| {
            sink.borrow_mut().push(change.to_string());
            Ok(())
        });
        let sink = lines.clone();
        let properties = list.subscribe_properties(move |_, change| {
            sink.borrow_mut().push(change.to_string());
            Ok(())
        });
        Self {
            lines,
            _structural: structural,
            _properties: properties,
        }
    }

    /// The transcript so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// The transcript joined with newlines.
    pub fn transcript(&self) -> String {
        self.lines.borrow().join("\n")
    }

    /// Number of lines whose first word is `kind`.
    pub fn count_of(&self, kind: &str) -> usize {
        self.lines
            .borrow()
            .iter()
            .filter(|line| line.split_whitespace().next() == Some(kind))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("lines", &self.lines.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_both_channels_in_order() {
        let list = ObservableList::new();
        let rec = Recorder::attach(&list);
        list.push("a").unwrap();
        assert_eq!(rec.transcript(), "Add 0 \"a\"\nCount\nItem[]");
        assert_eq!(rec.count_of("Add"), 1);
    }

    #[test]
    fn dropping_recorder_detaches() {
        let list = ObservableList::new();
        let rec = Recorder::attach(&list);
        assert_eq!(list.listener_count(), 1);
        drop(rec);
        assert_eq!(list.listener_count(), 0);
        list.push(1).unwrap();
    }

    #[test]
    fn clear_forgets_lines() {
        let list = ObservableList::new();
        let rec = Recorder::attach(&list);
        list.push(1).unwrap();
        rec.clear();
        assert!(rec.lines().is_empty());
    }
}
