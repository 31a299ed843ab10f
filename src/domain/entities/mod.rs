pub mod operation;
pub mod rollback_record;
pub mod tentative_entity;

pub use operation::{OperationDraft, PendingOperation};
pub use rollback_record::RollbackRecord;
pub use tentative_entity::TentativeEntity;
