pub mod temporary_id;

pub use temporary_id::{TemporaryIdGenerator, generate_temporary_id, is_temporary_id};
