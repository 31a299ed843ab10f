pub mod config;
pub mod error;
pub mod logging;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
