pub mod optimistic_tracker;
mod rollback_history;
pub mod shared_tracker;
mod tentative_store;

pub use optimistic_tracker::{OptimisticTracker, PendingOperationAge, TrackerStats};
pub use shared_tracker::SharedOptimisticTracker;
