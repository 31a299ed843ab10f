pub mod services;

pub use services::{OptimisticTracker, SharedOptimisticTracker, TrackerStats};
