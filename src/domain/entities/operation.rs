use crate::domain::value_objects::{EntityId, EntityState, OperationId, OperationKind};
use crate::shared::error::{Result, TrackerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 楽観的更新を登録する際に使用するドラフト。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationDraft {
    pub operation_id: OperationId,
    pub kind: OperationKind,
    pub entity_id: EntityId,
    pub original_state: Option<EntityState>,
    pub tentative_state: Option<EntityState>,
    pub retry_count: Option<u32>,
    pub max_retries: Option<u32>,
}

impl OperationDraft {
    pub fn new(operation_id: OperationId, kind: OperationKind, entity_id: EntityId) -> Self {
        Self {
            operation_id,
            kind,
            entity_id,
            original_state: None,
            tentative_state: None,
            retry_count: None,
            max_retries: None,
        }
    }

    pub fn with_original_state(mut self, state: EntityState) -> Self {
        self.original_state = Some(state);
        self
    }

    pub fn with_tentative_state(mut self, state: EntityState) -> Self {
        self.tentative_state = Some(state);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = Some(retry_count);
        self
    }

    /// UI 層から渡される緩い JSON を読み取る。
    ///
    /// `operationId`・`kind`（`type` も可）・`entityId` が必須。状態は JSON オブジェクトか `null`。
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| TrackerError::invalid_operation("operation must be a JSON object"))?;

        let operation_id = required_str(object, &["operationId"])
            .and_then(|raw| OperationId::parse(raw).map_err(TrackerError::InvalidOperation))?;
        let kind = required_str(object, &["kind", "type"])
            .and_then(|raw| raw.parse::<OperationKind>().map_err(TrackerError::InvalidOperation))?;
        let entity_id = required_str(object, &["entityId"])
            .and_then(|raw| EntityId::parse(raw).map_err(TrackerError::InvalidOperation))?;

        Ok(Self {
            operation_id,
            kind,
            entity_id,
            original_state: optional_state(object.get("originalState"))?,
            tentative_state: optional_state(object.get("tentativeState"))?,
            retry_count: optional_u32(object.get("retryCount"))?,
            max_retries: optional_u32(object.get("maxRetries"))?,
        })
    }
}

fn required_str<'a>(
    object: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Result<&'a str> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .ok_or_else(|| TrackerError::InvalidOperation(format!("missing field `{}`", keys[0])))
}

fn optional_state(value: Option<&Value>) -> Result<Option<EntityState>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value::<EntityState>(value.clone())?)),
    }
}

fn optional_u32(value: Option<&Value>) -> Result<Option<u32>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                TrackerError::invalid_operation("retry counters must be non-negative integers")
            }),
    }
}

/// レジストリに載っている未確定の操作。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingOperation {
    pub operation_id: OperationId,
    pub kind: OperationKind,
    pub entity_id: EntityId,
    pub original_state: Option<EntityState>,
    pub tentative_state: Option<EntityState>,
    pub retry_count: u32,
    pub max_retries: u32,
    pub registered_at: DateTime<Utc>,
}

impl PendingOperation {
    pub fn from_draft(
        draft: OperationDraft,
        default_max_retries: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            operation_id: draft.operation_id,
            kind: draft.kind,
            entity_id: draft.entity_id,
            original_state: draft.original_state,
            tentative_state: draft.tentative_state,
            retry_count: draft.retry_count.unwrap_or(0),
            max_retries: draft.max_retries.unwrap_or(default_max_retries),
            registered_at: now,
        }
    }

    pub fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }

    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.registered_at).num_milliseconds().max(0)
    }
}
