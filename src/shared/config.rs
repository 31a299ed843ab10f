use crate::shared::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_RECENT_ROLLBACKS_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// 操作側で指定がない場合のリトライ上限
    pub default_max_retries: u32,
    /// ロールバック履歴の保持件数
    pub history_capacity: usize,
    /// `recent_rollbacks_default` が返す件数
    pub recent_rollbacks_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_max_retries: DEFAULT_MAX_RETRIES,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            recent_rollbacks_limit: DEFAULT_RECENT_ROLLBACKS_LIMIT,
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Some(value) = read_env("MENU_TRACKER_MAX_RETRIES").and_then(|v| parse_u32(&v)) {
            cfg.default_max_retries = value.max(1);
        }
        if let Some(value) =
            read_env("MENU_TRACKER_HISTORY_CAPACITY").and_then(|v| parse_usize(&v))
        {
            cfg.history_capacity = value.max(1);
        }
        if let Some(value) =
            read_env("MENU_TRACKER_RECENT_ROLLBACKS").and_then(|v| parse_usize(&v))
        {
            cfg.recent_rollbacks_limit = value.max(1);
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_max_retries == 0 {
            return Err(TrackerError::Configuration(
                "default_max_retries must be greater than 0".to_string(),
            ));
        }
        if self.history_capacity == 0 {
            return Err(TrackerError::Configuration(
                "history_capacity must be greater than 0".to_string(),
            ));
        }
        if self.recent_rollbacks_limit == 0 {
            return Err(TrackerError::Configuration(
                "recent_rollbacks_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
