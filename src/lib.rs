//! メニュー編集画面向けの楽観的更新トラッカー。
//!
//! 操作を登録すると即座に仮の状態を返し、サーバー応答に応じて確定またはロールバックする。

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::services::{OptimisticTracker, SharedOptimisticTracker, TrackerStats};
pub use domain::entities::{OperationDraft, PendingOperation, RollbackRecord, TentativeEntity};
pub use domain::value_objects::{
    EntityId, EntityState, FailureKind, OperationId, OperationKind, RemoteError,
};
pub use infrastructure::temporary_id::{TEMP_ID_PREFIX, generate_temporary_id, is_temporary_id};
pub use shared::{Result, TrackerConfig, TrackerError};
