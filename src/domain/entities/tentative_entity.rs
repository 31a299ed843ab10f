use crate::domain::value_objects::{EntityState, OperationId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// UI に表示する項目の現在値（楽観的な仮の値、または確定値）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TentativeEntity {
    #[serde(flatten)]
    pub state: EntityState,
    pub is_optimistic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_operation_id: Option<OperationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_state: Option<EntityState>,
}

impl TentativeEntity {
    pub fn optimistic(
        state: EntityState,
        operation_id: OperationId,
        original_state: Option<EntityState>,
    ) -> Self {
        Self {
            state,
            is_optimistic: true,
            pending_operation_id: Some(operation_id),
            original_state,
        }
    }

    pub fn settled(state: EntityState) -> Self {
        Self {
            state,
            is_optimistic: false,
            pending_operation_id: None,
            original_state: None,
        }
    }

    /// 仮の値をそのまま確定扱いにする
    pub fn settle(&mut self) {
        self.is_optimistic = false;
        self.pending_operation_id = None;
        self.original_state = None;
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.state.get(field)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
