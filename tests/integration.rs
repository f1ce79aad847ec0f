//! Integration tests for gilt-observable.
//!
//! These tests exercise the public API from outside the crate: notification
//! shape for each operation, policy enforcement, and nested listener calls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gilt_observable::testing::Recorder;
use gilt_observable::{
    ChangeKind, CollectionChange, CollectionError, ListConfig, Nullable, ObservableList,
    PolicyFlags, PropertyChange,
};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[test]
fn test_insert_then_get_at_every_index() {
    for index in 0..=3 {
        let list = ObservableList::from(vec![10, 20, 30]);
        let before = list.count();
        list.insert(index, 99).unwrap();
        assert_eq!(list.get(index), Ok(99));
        assert_eq!(list.count(), before + 1);
    }
}

#[test]
fn test_remove_only_item_leaves_empty_list() {
    let list = ObservableList::from(vec!["only"]);
    list.remove_at(0).unwrap();
    assert_eq!(list.count(), 0);
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

#[test]
fn test_move_matches_remove_then_insert() {
    let source: Vec<u32> = (0..6).collect();
    for a in 0..source.len() {
        for b in 0..source.len() {
            if a == b {
                continue;
            }
            let list = ObservableList::from(source.clone());
            list.move_item(a, b).unwrap();

            let mut expected = source.clone();
            let moved = expected.remove(a);
            expected.insert(b, moved);
            assert_eq!(list.to_vec(), expected, "move {a} -> {b}");
        }
    }
}

#[test]
fn test_move_notification_shape() {
    let list = ObservableList::from(vec!['a', 'b', 'c', 'd']);
    let rec = Recorder::attach(&list);
    list.move_item(3, 1).unwrap();
    assert_eq!(rec.count_of("Move"), 1);
    assert_eq!(rec.count_of("Item[]"), 1);
    assert_eq!(rec.count_of("Count"), 0);
    assert_eq!(rec.count_of("Add"), 0);
    assert_eq!(rec.count_of("Remove"), 0);
    assert_eq!(rec.count_of("Reset"), 0);
}

#[test]
fn test_move_payload_carries_indices() {
    let list = ObservableList::from(vec![1, 2, 3]);
    let seen = Rc::new(RefCell::new(None));
    let seen_c = seen.clone();
    let _sub = list.subscribe(move |_, change| {
        *seen_c.borrow_mut() = Some((change.kind(), change.old_index(), change.index()));
        Ok(())
    });
    list.move_item(0, 2).unwrap();
    assert_eq!(*seen.borrow(), Some((ChangeKind::Move, Some(0), Some(2))));
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct Row {
    caption: Option<String>,
}

impl Nullable for Row {
    fn is_null(&self) -> bool {
        self.caption.is_none()
    }
}

#[test]
fn test_no_null_rejects_insert_without_changing_count() {
    let list = ObservableList::with_flags(PolicyFlags::NO_NULL);
    list.push(Row {
        caption: Some("first".into()),
    })
    .unwrap();
    for index in 0..=1 {
        assert_eq!(
            list.insert(index, Row { caption: None }),
            Err(CollectionError::NullNotAllowed)
        );
        assert_eq!(list.count(), 1);
    }
}

#[test]
fn test_no_replace_rejects_set_without_changing_item() {
    let list = ObservableList::with_config(
        ListConfig::new().with_flags(PolicyFlags::NO_NULL_OR_REPLACE),
    );
    list.add_range([1, 2, 3]).unwrap();
    for index in 0..3 {
        assert!(matches!(
            list.set(index, 0),
            Err(CollectionError::PolicyViolation(_))
        ));
    }
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Range and sort
// ---------------------------------------------------------------------------

#[test]
fn test_add_range_transcript() {
    let list = ObservableList::new();
    let rec = Recorder::attach(&list);
    list.add_range(['a', 'b', 'c']).unwrap();
    assert_eq!(list.to_vec(), vec!['a', 'b', 'c']);
    insta::assert_snapshot!(rec.transcript(), @r"
Add 0 'a'
Count
Item[]
Add 1 'b'
Count
Item[]
Add 2 'c'
Count
Item[]
RangeAdditionFinished 0 ['a', 'b', 'c']
");
}

#[test]
fn test_range_finished_goes_to_property_channel_only() {
    let list = ObservableList::new();
    let structural = Rc::new(Cell::new(0));
    let finished = Rc::new(RefCell::new(Vec::new()));
    let structural_c = structural.clone();
    let finished_c = finished.clone();
    let _s = list.subscribe(move |_, _| {
        structural_c.set(structural_c.get() + 1);
        Ok(())
    });
    let _p = list.subscribe_properties(move |_, change| {
        if let PropertyChange::RangeAdditionFinished { start, items } = change {
            finished_c.borrow_mut().push((*start, items.clone()));
        }
        Ok(())
    });
    list.add_range(vec![5, 6]).unwrap();
    assert_eq!(structural.get(), 2);
    assert_eq!(*finished.borrow(), vec![(0, vec![5, 6])]);
}

#[test]
fn test_sort_transcript() {
    let list = ObservableList::from(vec![3, 1, 2]);
    let rec = Recorder::attach(&list);
    list.sort().unwrap();
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    insta::assert_snapshot!(rec.transcript(), @r"
Item[]
Reset
");
}

// ---------------------------------------------------------------------------
// Reentrancy
// ---------------------------------------------------------------------------

/// A listener that tries one nested push per notification and stores the result.
fn nested_pusher(
    list: &ObservableList<i32>,
    outcome: Rc<RefCell<Option<Result<(), CollectionError>>>>,
) -> gilt_observable::Subscription {
    list.subscribe(move |list, change| {
        if let CollectionChange::Add { item, .. } = change {
            if *item == 1 {
                *outcome.borrow_mut() = Some(list.push(2));
            }
        }
        Ok(())
    })
}

#[test]
fn test_nested_mutation_with_one_listener_succeeds() {
    let list = ObservableList::new();
    let outcome = Rc::new(RefCell::new(None));
    let _sub = nested_pusher(&list, outcome.clone());
    list.push(1).unwrap();
    assert_eq!(*outcome.borrow(), Some(Ok(())));
    assert_eq!(list.to_vec(), vec![1, 2]);
}

#[test]
fn test_nested_mutation_with_two_listeners_fails() {
    let list = ObservableList::new();
    let outcome = Rc::new(RefCell::new(None));
    let _sub = nested_pusher(&list, outcome.clone());
    let _other = list.subscribe(|_, _| Ok(()));
    list.push(1).unwrap();
    assert_eq!(
        *outcome.borrow(),
        Some(Err(CollectionError::ReentrancyViolation))
    );
    assert_eq!(list.to_vec(), vec![1]);
}

#[test]
fn test_every_mutator_checks_reentrancy() {
    let list = ObservableList::from(vec![3, 1, 2]);
    let _a = list.subscribe(|_, _| Ok(()));
    let _b = list.subscribe(|_, _| Ok(()));
    let _busy = list.block_reentrancy();
    let violation = Err(CollectionError::ReentrancyViolation);
    assert_eq!(list.insert(0, 1), violation);
    assert_eq!(list.remove_at(0).map(|_| ()), violation);
    assert_eq!(list.set(0, 1).map(|_| ()), violation);
    assert_eq!(list.move_item(0, 1), violation);
    assert_eq!(list.clear(), violation);
    assert_eq!(list.sort(), violation);
    assert_eq!(list.add_range([4]), violation);
    assert_eq!(list.to_vec(), vec![3, 1, 2]);
}

#[test]
fn test_listener_dropping_subscription_mid_dispatch() {
    let list = ObservableList::new();
    let held: Rc<RefCell<Option<gilt_observable::Subscription>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));
    let held_c = held.clone();
    let _dropper = list.subscribe(move |_, _| {
        held_c.borrow_mut().take();
        Ok(())
    });
    let hits_c = hits.clone();
    *held.borrow_mut() = Some(list.subscribe(move |_, _| {
        hits_c.set(hits_c.get() + 1);
        Ok(())
    }));
    // The second listener is already in the snapshot for this dispatch.
    list.push(1).unwrap();
    assert_eq!(hits.get(), 1);
    list.push(2).unwrap();
    assert_eq!(hits.get(), 1);
}
