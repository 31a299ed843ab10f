use super::operation::PendingOperation;
use crate::domain::value_objects::OperationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ロールバックされた操作の記録。トースト通知の再表示に使う。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollbackRecord {
    pub operation_id: OperationId,
    pub operation: PendingOperation,
    pub error_message: String,
    pub timestamp: DateTime<Utc>,
}

impl RollbackRecord {
    pub fn new(
        operation: PendingOperation,
        error_message: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation_id: operation.operation_id.clone(),
            operation,
            error_message,
            timestamp,
        }
    }
}
