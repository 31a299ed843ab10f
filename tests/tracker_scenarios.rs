mod common;

use common::{draft, menu_item, state};
use menu_optimistic::infrastructure::temporary_id::TemporaryIdGenerator;
use menu_optimistic::{
    OperationKind, OptimisticTracker, RemoteError, TEMP_ID_PREFIX, is_temporary_id,
};
use serde_json::json;

#[test]
fn update_rolled_back_by_server_error() {
    let mut tracker = OptimisticTracker::new();
    let applied = tracker
        .apply_optimistic_update_json(&json!({
            "operationId": "op1",
            "kind": "update",
            "entityId": "it1",
            "originalState": {"name": "A"},
            "tentativeState": {"name": "B"}
        }))
        .expect("applied");
    assert_eq!(
        applied.to_json(),
        json!({
            "name": "B",
            "isOptimistic": true,
            "pendingOperationId": "op1",
            "originalState": {"name": "A"}
        })
    );

    let restored = tracker.rollback_operation_json("op1", &json!({"response": {"status": 500}}));
    assert_eq!(restored, Some(state(json!({"name": "A"}))));

    let entity = tracker.tentative_entity("it1").expect("entity");
    assert_eq!(entity.to_json(), json!({"name": "A", "isOptimistic": false}));

    let last = tracker.recent_rollbacks(100).pop().expect("history record");
    assert!(last.error_message.contains("Server error"));
    assert!(last.error_message.contains("try again later"));
    assert_eq!(last.operation.kind, OperationKind::Update);
}

#[test]
fn create_confirmed_stays_keyed_by_temporary_id() {
    let mut tracker = OptimisticTracker::new();
    let temp_id = tracker.generate_temporary_id();
    assert!(temp_id.starts_with(TEMP_ID_PREFIX));

    let entity = tracker
        .apply_optimistic_update(draft(
            "create-1",
            OperationKind::Create,
            &temp_id,
            None,
            menu_item("Gyoza", 6),
        ))
        .expect("applied");
    assert!(entity.is_optimistic);

    let server = state(json!({"id": "real-42", "name": "Gyoza", "price": 6}));
    assert!(tracker.confirm_operation("create-1", Some(server)));

    let entity = tracker.tentative_entity(&temp_id).expect("still keyed by temp id");
    assert_eq!(entity.get("id"), Some(&json!("real-42")));
    assert!(!entity.is_optimistic);
    assert!(!is_temporary_id("real-42"));
}

#[test]
fn failure_messages_follow_status_taxonomy() {
    let cases = [
        (RemoteError::with_status(401), "log in again"),
        (RemoteError::with_status(403), "permission"),
        (RemoteError::with_status(404), "not found"),
        (RemoteError::with_status(409), "conflicts with existing data"),
        (RemoteError::with_status(502), "try again later"),
        (RemoteError::with_message("Network Error"), "check your connection"),
        (RemoteError::with_message("Price is required"), "Price is required"),
        (RemoteError::default(), "Please try again."),
    ];

    let mut tracker = OptimisticTracker::new();
    for (index, (error, expected)) in cases.iter().enumerate() {
        let op = format!("toggle-{index}");
        tracker.apply_optimistic_update(draft(
            &op,
            OperationKind::TogglePopular,
            "it1",
            Some(menu_item("Ramen", 12)),
            menu_item("Ramen", 12),
        ));
        tracker.rollback_operation(&op, Some(error));

        let record = tracker.recent_rollbacks(1).pop().expect("record");
        assert!(
            record.error_message.starts_with("Failed to update popular status"),
            "{}",
            record.error_message
        );
        assert!(
            record.error_message.contains(expected),
            "{} should contain {}",
            record.error_message,
            expected
        );
    }
}

#[test]
fn rollback_tolerates_garbage_errors() {
    let mut tracker = OptimisticTracker::new();
    for (index, error) in [json!(null), json!(17), json!({"response": "oops"}), json!([])]
        .iter()
        .enumerate()
    {
        let op = format!("op{index}");
        tracker.apply_optimistic_update(draft(
            &op,
            OperationKind::Delete,
            "it7",
            Some(menu_item("Tea", 3)),
            menu_item("Tea", 3),
        ));
        assert!(tracker.rollback_operation_json(&op, error).is_some());
    }

    let records = tracker.recent_rollbacks(10);
    assert_eq!(records.len(), 4);
    assert!(records
        .iter()
        .all(|r| r.error_message == "Failed to delete menu item. Please try again."));
}

#[test]
fn fallback_generator_can_back_a_tracker() {
    let tracker = OptimisticTracker::new().with_id_generator(TemporaryIdGenerator::fallback_only());
    let a = tracker.generate_temporary_id();
    let b = tracker.generate_temporary_id();
    assert_ne!(a, b);
    assert!(is_temporary_id(&a) && is_temporary_id(&b));
}

#[test]
fn stats_serialize_for_ui() {
    let mut tracker = OptimisticTracker::new();
    tracker.apply_optimistic_update(draft(
        "op1",
        OperationKind::ToggleAvailability,
        "it1",
        Some(menu_item("Udon", 9)),
        state(json!({"name": "Udon", "price": 9, "isAvailable": false})),
    ));

    let stats = serde_json::to_value(tracker.stats()).expect("stats json");
    assert_eq!(stats["pendingOperations"], json!(1));
    assert_eq!(stats["pending"][0]["operationId"], json!("op1"));
    assert_eq!(stats["pending"][0]["kind"], json!("toggle_availability"));
}
