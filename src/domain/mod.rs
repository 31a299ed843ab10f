pub mod entities;
pub mod value_objects;

pub use entities::{OperationDraft, PendingOperation, RollbackRecord, TentativeEntity};
pub use value_objects::{EntityId, EntityState, OperationId, OperationKind, RemoteError};
