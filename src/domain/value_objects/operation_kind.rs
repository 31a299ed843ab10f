use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// 楽観的に適用される操作の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
    ToggleAvailability,
    TogglePopular,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Create,
        OperationKind::Update,
        OperationKind::Delete,
        OperationKind::ToggleAvailability,
        OperationKind::TogglePopular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::ToggleAvailability => "toggle_availability",
            OperationKind::TogglePopular => "toggle_popular",
        }
    }

    /// ロールバック時のメッセージ先頭に付ける文言
    pub fn failure_phrase(&self) -> &'static str {
        match self {
            OperationKind::Create => "Failed to create menu item",
            OperationKind::Update => "Failed to update menu item",
            OperationKind::Delete => "Failed to delete menu item",
            OperationKind::ToggleAvailability => "Failed to update item availability",
            OperationKind::TogglePopular => "Failed to update popular status",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "create" => Ok(OperationKind::Create),
            "update" => Ok(OperationKind::Update),
            "delete" => Ok(OperationKind::Delete),
            "toggle_availability" => Ok(OperationKind::ToggleAvailability),
            "toggle_popular" => Ok(OperationKind::TogglePopular),
            other => Err(format!("Unknown operation kind: {other}")),
        }
    }
}
