use super::rollback_history::RollbackHistory;
use super::tentative_store::TentativeStore;
use crate::domain::entities::{
    OperationDraft, PendingOperation, RollbackRecord, TentativeEntity,
};
use crate::domain::value_objects::{
    EntityId, EntityState, FailureKind, OperationId, OperationKind, RemoteError,
};
use crate::infrastructure::temporary_id::TemporaryIdGenerator;
use crate::shared::config::TrackerConfig;
use crate::shared::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingOperationAge {
    pub operation_id: OperationId,
    pub kind: OperationKind,
    pub entity_id: EntityId,
    pub retry_count: u32,
    pub age_ms: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStats {
    pub pending_operations: usize,
    pub tentative_entities: usize,
    pub optimistic_entities: usize,
    pub rollback_history: usize,
    pub pending: Vec<PendingOperationAge>,
}

/// 未確定の操作・項目の仮の値・ロールバック履歴をまとめて管理する。
///
/// すべての操作は同期的に完結する。複数スレッドから使う場合は
/// [`SharedOptimisticTracker`](super::SharedOptimisticTracker) を使うこと。
#[derive(Debug, Clone)]
pub struct OptimisticTracker {
    config: TrackerConfig,
    ids: TemporaryIdGenerator,
    operations: HashMap<OperationId, PendingOperation>,
    entities: TentativeStore,
    history: RollbackHistory,
}

impl Default for OptimisticTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimisticTracker {
    pub fn new() -> Self {
        Self::build(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TrackerConfig) -> Self {
        Self {
            history: RollbackHistory::new(config.history_capacity),
            config,
            ids: TemporaryIdGenerator::new(),
            operations: HashMap::new(),
            entities: TentativeStore::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: TemporaryIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn generate_temporary_id(&self) -> String {
        self.ids.generate()
    }

    /// 操作を登録し、仮の値を即座に反映する。
    ///
    /// 同じ項目に対する操作が既にあっても上書きする。`tentative_state` が無い場合は
    /// 登録だけ行い、現在の値（あれば）を返す。
    ///
    /// 登録済みの操作 ID を別の項目に付け替えた場合、元の項目はその時点の値で確定させる。
    pub fn apply_optimistic_update(&mut self, draft: OperationDraft) -> Option<TentativeEntity> {
        let operation =
            PendingOperation::from_draft(draft, self.config.default_max_retries, Utc::now());
        let entity_id = operation.entity_id.clone();

        let moved_from = self
            .operations
            .get(operation.operation_id.as_str())
            .map(|previous| previous.entity_id.clone())
            .filter(|previous| *previous != entity_id);
        if let Some(previous) = moved_from {
            warn!(
                operation_id = %operation.operation_id,
                previous_entity_id = %previous,
                entity_id = %entity_id,
                "operation re-applied to a different entity"
            );
            self.release_entity(&previous, &operation.operation_id);
        }

        if let Some(state) = operation.tentative_state.clone() {
            let entity = TentativeEntity::optimistic(
                state,
                operation.operation_id.clone(),
                operation.original_state.clone(),
            );
            self.entities.insert(entity_id.clone(), entity);
        }

        debug!(
            operation_id = %operation.operation_id,
            entity_id = %entity_id,
            kind = %operation.kind,
            "optimistic update applied"
        );
        self.operations.insert(operation.operation_id.clone(), operation);

        self.entities.get(entity_id.as_str()).cloned()
    }

    /// `operation_id` が所有している項目だけを仮の値のまま確定させる。
    fn release_entity(&mut self, entity_id: &EntityId, operation_id: &OperationId) {
        if let Some(entity) = self.entities.get_mut(entity_id.as_str()) {
            if entity.pending_operation_id.as_ref() == Some(operation_id) {
                entity.settle();
            }
        }
    }

    /// JSON で渡された操作を登録する。不正な入力なら何も変更せず `None`。
    pub fn apply_optimistic_update_json(&mut self, value: &Value) -> Option<TentativeEntity> {
        match OperationDraft::from_json(value) {
            Ok(draft) => self.apply_optimistic_update(draft),
            Err(e) => {
                warn!("Rejected optimistic update: {}", e);
                None
            }
        }
    }

    /// 操作を成功として確定する。未登録（または解決済み）の ID なら `false`。
    pub fn confirm_operation(
        &mut self,
        operation_id: &str,
        server_data: Option<EntityState>,
    ) -> bool {
        let Some(operation) = self.operations.remove(operation_id) else {
            warn!(operation_id, "confirm requested for unknown operation");
            return false;
        };
        let entity_id = operation.entity_id;

        match (operation.kind, server_data) {
            (OperationKind::Delete, _) => {
                self.entities.remove(entity_id.as_str());
            }
            (_, Some(data)) => {
                self.entities.insert(entity_id.clone(), TentativeEntity::settled(data));
            }
            (_, None) => {
                // 後続の操作が所有している場合はそちらの解決を待つ
                let operations = &self.operations;
                if let Some(entity) = self.entities.get_mut(entity_id.as_str()) {
                    let owned_by_other = entity
                        .pending_operation_id
                        .as_ref()
                        .is_some_and(|owner| operations.contains_key(owner.as_str()));
                    if !owned_by_other {
                        entity.settle();
                    }
                }
            }
        }

        debug!(
            operation_id,
            entity_id = %entity_id,
            kind = %operation.kind,
            "optimistic update confirmed"
        );
        true
    }

    /// 操作を失敗として取り消し、元の値に戻す。
    ///
    /// 戻した値を返す。作成の取り消しや未登録の ID の場合は `None`。
    pub fn rollback_operation(
        &mut self,
        operation_id: &str,
        error: Option<&RemoteError>,
    ) -> Option<EntityState> {
        let Some(operation) = self.operations.remove(operation_id) else {
            warn!(operation_id, "rollback requested for unknown operation");
            return None;
        };
        let entity_id = operation.entity_id.clone();

        let restored = match operation.kind {
            OperationKind::Create => {
                self.entities.remove(entity_id.as_str());
                None
            }
            OperationKind::Update
            | OperationKind::Delete
            | OperationKind::ToggleAvailability
            | OperationKind::TogglePopular => match &operation.original_state {
                Some(original) => {
                    let settled = TentativeEntity::settled(original.clone());
                    self.entities.insert(entity_id.clone(), settled);
                    Some(original.clone())
                }
                None => {
                    warn!(
                        operation_id,
                        entity_id = %entity_id,
                        "rollback without original state, entity left untouched"
                    );
                    None
                }
            },
        };

        let failure = FailureKind::classify(error);
        let error_message = failure.user_message(operation.kind);
        info!(
            operation_id,
            entity_id = %entity_id,
            kind = %operation.kind,
            failure = ?failure,
            "optimistic update rolled back"
        );
        self.history.push(RollbackRecord::new(operation, error_message, Utc::now()));

        restored
    }

    /// ネットワーク層のエラーを JSON のまま受け取る版
    pub fn rollback_operation_json(
        &mut self,
        operation_id: &str,
        error: &Value,
    ) -> Option<EntityState> {
        let error = RemoteError::from_json(error);
        self.rollback_operation(operation_id, Some(&error))
    }

    pub fn increment_retry_count(&mut self, operation_id: &str) -> bool {
        match self.operations.get_mut(operation_id) {
            Some(operation) => {
                operation.retry_count = operation.retry_count.saturating_add(1);
                debug!(
                    operation_id,
                    retry_count = operation.retry_count,
                    max_retries = operation.max_retries,
                    "retry count incremented"
                );
                true
            }
            None => false,
        }
    }

    pub fn can_retry(&self, operation_id: &str) -> bool {
        self.operations
            .get(operation_id)
            .is_some_and(PendingOperation::can_retry)
    }

    /// 登録順に並べた未確定の操作
    pub fn pending_operations(&self) -> Vec<PendingOperation> {
        let mut operations: Vec<PendingOperation> = self.operations.values().cloned().collect();
        operations.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.operation_id.as_str().cmp(b.operation_id.as_str()))
        });
        operations
    }

    pub fn pending_operations_for_entity(&self, entity_id: &str) -> Vec<PendingOperation> {
        self.pending_operations()
            .into_iter()
            .filter(|operation| operation.entity_id.as_str() == entity_id)
            .collect()
    }

    pub fn pending_operation(&self, operation_id: &str) -> Option<PendingOperation> {
        self.operations.get(operation_id).cloned()
    }

    pub fn is_pending(&self, operation_id: &str) -> bool {
        self.operations.contains_key(operation_id)
    }

    pub fn tentative_entity(&self, entity_id: &str) -> Option<TentativeEntity> {
        self.entities.get(entity_id).cloned()
    }

    pub fn tentative_entities(&self) -> BTreeMap<EntityId, TentativeEntity> {
        self.entities.snapshot()
    }

    pub fn recent_rollbacks(&self, limit: usize) -> Vec<RollbackRecord> {
        self.history.recent(limit)
    }

    pub fn recent_rollbacks_default(&self) -> Vec<RollbackRecord> {
        self.history.recent(self.config.recent_rollbacks_limit)
    }

    pub fn clear_rollback_history(&mut self) {
        self.history.clear();
    }

    /// すべての状態を初期化する（テストや画面破棄時用）
    pub fn clear_all(&mut self) {
        self.operations.clear();
        self.entities.clear();
        self.history.clear();
        debug!("optimistic tracker cleared");
    }

    pub fn stats(&self) -> TrackerStats {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> TrackerStats {
        let pending = self
            .pending_operations()
            .into_iter()
            .map(|operation| PendingOperationAge {
                age_ms: operation.age_ms(now),
                operation_id: operation.operation_id,
                kind: operation.kind,
                entity_id: operation.entity_id,
                retry_count: operation.retry_count,
            })
            .collect();

        TrackerStats {
            pending_operations: self.operations.len(),
            tentative_entities: self.entities.len(),
            optimistic_entities: self.entities.optimistic_count(),
            rollback_history: self.history.len(),
            pending,
        }
    }
}
