// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn worker_ids_are_monotonic_starting_at_one() {
    let alloc = WorkerIdAllocator::new();
    assert_eq!(alloc.next(), WorkerId(1));
    assert_eq!(alloc.next(), WorkerId(2));
    assert_eq!(alloc.next(), WorkerId(3));
}

#[test]
fn work_ids_are_unique() {
    let a = WorkId::new();
    let b = WorkId::new();
    assert_ne!(a, b);
}

#[test]
fn work_id_roundtrips_through_json() {
    let id = WorkId::new();
    let json = serde_json::to_string(&id).unwrap();
    let back: WorkId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
