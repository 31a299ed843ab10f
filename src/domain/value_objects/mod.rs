pub mod entity_id;
pub mod entity_state;
pub mod failure_kind;
pub mod operation_id;
pub mod operation_kind;
pub mod remote_error;

pub use entity_id::EntityId;
pub use entity_state::{EntityState, TRACKER_FIELDS};
pub use failure_kind::FailureKind;
pub use operation_id::OperationId;
pub use operation_kind::OperationKind;
pub use remote_error::{RemoteError, RemoteResponse};
