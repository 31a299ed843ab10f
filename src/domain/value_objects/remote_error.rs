use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteResponse {
    #[serde(default)]
    pub status: Option<u16>,
}

/// ネットワーク層から渡される失敗情報。
///
/// 参照するのは `response.status` と `message` の二つだけで、どちらも欠けていてよい。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteError {
    #[serde(default)]
    pub response: Option<RemoteResponse>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteError {
    pub fn with_status(status: u16) -> Self {
        Self {
            response: Some(RemoteResponse {
                status: Some(status),
            }),
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            response: None,
            message: Some(message.into()),
        }
    }

    pub fn and_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// 任意の JSON から読み取る。型が合わないフィールドは無視する。
    pub fn from_json(value: &Value) -> Self {
        let status = value
            .get("response")
            .and_then(|response| response.get("status"))
            .and_then(Value::as_u64)
            .and_then(|status| u16::try_from(status).ok());
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            response: status.map(|status| RemoteResponse {
                status: Some(status),
            }),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().and_then(|response| response.status)
    }

    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}
