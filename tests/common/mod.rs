#![allow(dead_code)]

use menu_optimistic::{EntityId, EntityState, OperationDraft, OperationId, OperationKind};
use serde_json::{Value, json};

pub fn state(value: Value) -> EntityState {
    EntityState::new(value).expect("entity state")
}

pub fn menu_item(name: &str, price: u32) -> EntityState {
    state(json!({
        "name": name,
        "price": price,
        "isAvailable": true,
        "isPopular": false
    }))
}

pub fn draft(
    operation_id: &str,
    kind: OperationKind,
    entity_id: &str,
    original: Option<EntityState>,
    tentative: EntityState,
) -> OperationDraft {
    let mut draft = OperationDraft::new(
        OperationId::parse(operation_id).expect("operation id"),
        kind,
        EntityId::parse(entity_id).expect("entity id"),
    )
    .with_tentative_state(tentative);
    draft.original_state = original;
    draft
}
