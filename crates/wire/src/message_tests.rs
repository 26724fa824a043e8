// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use dtl_core::{WorkItem, WorkerId};
use serde_json::Value;

#[test]
fn get_work_item_round_trips_and_tags_correctly() {
    let msg = Message::GetWorkItem {
        worker_id: WorkerId(3),
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "GET_WORK_ITEM");
    assert_eq!(json["worker_id"], 3);

    let back: Message = serde_json::from_value(json).unwrap();
    assert_eq!(back.type_tag(), "GET_WORK_ITEM");
}

#[test]
fn work_item_preserves_every_field_through_json() {
    let item = WorkItem::seed(Value::from(42));
    let msg = Message::WorkItem(item.clone());
    let json = serde_json::to_string(&msg).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();
    match back {
        Message::WorkItem(roundtripped) => {
            assert_eq!(roundtripped.work_id, item.work_id);
            assert_eq!(roundtripped.step_index, item.step_index);
            assert_eq!(roundtripped.argument, item.argument);
            assert_eq!(roundtripped.from_work_id, item.from_work_id);
            assert_eq!(roundtripped.sequence, item.sequence);
        }
        other => panic!("expected WorkItem, got {other:?}"),
    }
}

#[test]
fn no_more_work_items_has_no_payload_fields() {
    let json = serde_json::to_value(Message::NoMoreWorkItems).unwrap();
    assert_eq!(json, serde_json::json!({"type": "NO_MORE_WORK_ITEMS"}));
}

#[test]
fn unknown_type_tag_fails_to_parse() {
    let bad = r#"{"type": "NOT_A_REAL_MESSAGE"}"#;
    assert!(serde_json::from_str::<Message>(bad).is_err());
}

#[test]
fn missing_required_field_fails_to_parse() {
    // GET_WORK_ITEM requires worker_id.
    let bad = r#"{"type": "GET_WORK_ITEM"}"#;
    assert!(serde_json::from_str::<Message>(bad).is_err());
}
