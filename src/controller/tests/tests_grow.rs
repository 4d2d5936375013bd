use std::collections::hash_map::RandomState;

use crate::alloc::DefaultAllocator;
use crate::controller::Controller;
use crate::probe::{find_or_insert_slot, find_slot, ProbeResult};
use crate::slots::{Slot, SlotBuffer};

fn put(
    ctrl: &mut Controller,
    buf: &mut SlotBuffer<u32, u32>,
    hasher: &RandomState,
    key: u32,
    value: u32,
) {
    ctrl.gate_before_insert(buf, hasher, &DefaultAllocator)
        .expect("gate should not fail in this test");
    match find_or_insert_slot(buf, &key, hasher) {
        ProbeResult::Found(idx) => {
            buf.set(idx, Slot::Live(key, value));
        }
        ProbeResult::Insert(idx) => {
            let reclaimed_tombstone = buf.get(idx).is_tombstone();
            buf.set(idx, Slot::Live(key, value));
            ctrl.note_insert(reclaimed_tombstone);
        }
        ProbeResult::Full => panic!("table reported full immediately after a successful gate"),
    }
}

/// 8 inserts fill an 8-slot table without growing.
#[test]
fn eight_inserts_fill_without_growing() {
    let hasher = RandomState::new();
    let mut ctrl = Controller::new();
    let mut buf: SlotBuffer<u32, u32> = SlotBuffer::new_empty(8);

    for k in 0..8u32 {
        put(&mut ctrl, &mut buf, &hasher, k, k);
    }

    assert_eq!(ctrl.capacity_class(), 0);
    assert_eq!(ctrl.capacity(), 8);
    assert_eq!(ctrl.live(), 8);
}

/// The 9th insert grows to class 1 (length 16).
#[test]
fn ninth_insert_grows_to_class_one() {
    crate::test_support::init_tracing();
    let hasher = RandomState::new();
    let mut ctrl = Controller::new();
    let mut buf: SlotBuffer<u32, u32> = SlotBuffer::new_empty(8);

    for k in 0..8u32 {
        put(&mut ctrl, &mut buf, &hasher, k, k);
    }
    put(&mut ctrl, &mut buf, &hasher, 8, 8);

    assert_eq!(ctrl.capacity_class(), 1);
    assert_eq!(ctrl.capacity(), 16);
    assert_eq!(ctrl.live(), 9);

    for k in 0..9u32 {
        assert!(find_slot(&buf, &k, &hasher).is_some(), "key {k} should survive the rebuild");
    }
}

/// Replacing an existing key never triggers a grow, regardless of load.
#[test]
fn replace_does_not_grow() {
    let hasher = RandomState::new();
    let mut ctrl = Controller::new();
    let mut buf: SlotBuffer<u32, u32> = SlotBuffer::new_empty(8);

    for k in 0..8u32 {
        put(&mut ctrl, &mut buf, &hasher, k, k);
    }
    for k in 0..8u32 {
        put(&mut ctrl, &mut buf, &hasher, k, k * 10);
    }

    assert_eq!(ctrl.capacity_class(), 0);
    assert_eq!(ctrl.live(), 8);
    assert_eq!(find_slot(&buf, &3u32, &hasher).map(|idx| buf.get(idx).as_live().unwrap().1), Some(&30));
}
