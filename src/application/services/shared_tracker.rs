use super::optimistic_tracker::{OptimisticTracker, TrackerStats};
use crate::domain::entities::{OperationDraft, PendingOperation, RollbackRecord, TentativeEntity};
use crate::domain::value_objects::{EntityState, RemoteError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// スレッド間で共有するためのハンドル。
///
/// 一回の呼び出しにつきロックを一度だけ取るので、レジストリ・ストア・履歴の更新は
/// 他の呼び出しから途中状態が見えない。
#[derive(Debug, Clone, Default)]
pub struct SharedOptimisticTracker {
    inner: Arc<Mutex<OptimisticTracker>>,
}

impl SharedOptimisticTracker {
    pub fn new(tracker: OptimisticTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    // トラッカーは更新途中で panic しないので、poison されても中身は整合している
    fn lock(&self) -> MutexGuard<'_, OptimisticTracker> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 複数の操作を一つのロック内でまとめて行う
    pub fn with_tracker<R>(&self, f: impl FnOnce(&mut OptimisticTracker) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn generate_temporary_id(&self) -> String {
        self.lock().generate_temporary_id()
    }

    pub fn apply_optimistic_update(&self, draft: OperationDraft) -> Option<TentativeEntity> {
        self.lock().apply_optimistic_update(draft)
    }

    pub fn confirm_operation(&self, operation_id: &str, server_data: Option<EntityState>) -> bool {
        self.lock().confirm_operation(operation_id, server_data)
    }

    pub fn rollback_operation(
        &self,
        operation_id: &str,
        error: Option<&RemoteError>,
    ) -> Option<EntityState> {
        self.lock().rollback_operation(operation_id, error)
    }

    pub fn increment_retry_count(&self, operation_id: &str) -> bool {
        self.lock().increment_retry_count(operation_id)
    }

    pub fn can_retry(&self, operation_id: &str) -> bool {
        self.lock().can_retry(operation_id)
    }

    pub fn is_pending(&self, operation_id: &str) -> bool {
        self.lock().is_pending(operation_id)
    }

    pub fn pending_operations(&self) -> Vec<PendingOperation> {
        self.lock().pending_operations()
    }

    pub fn tentative_entity(&self, entity_id: &str) -> Option<TentativeEntity> {
        self.lock().tentative_entity(entity_id)
    }

    pub fn recent_rollbacks(&self, limit: usize) -> Vec<RollbackRecord> {
        self.lock().recent_rollbacks(limit)
    }

    pub fn stats(&self) -> TrackerStats {
        self.lock().stats()
    }

    pub fn clear_all(&self) {
        self.lock().clear_all();
    }
}
