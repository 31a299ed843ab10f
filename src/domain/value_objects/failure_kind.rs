use super::operation_kind::OperationKind;
use super::remote_error::RemoteError;

const NETWORK_MARKERS: [&str; 3] = ["network error", "failed to fetch", "err_network"];

/// ロールバック理由の分類。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Server(u16),
    Network,
    Message(String),
    Unknown,
}

impl FailureKind {
    /// ステータスコードを優先し、次にメッセージの内容で判定する。
    pub fn classify(error: Option<&RemoteError>) -> Self {
        let Some(error) = error else {
            return FailureKind::Unknown;
        };

        match error.status() {
            Some(401) => return FailureKind::Unauthorized,
            Some(403) => return FailureKind::Forbidden,
            Some(404) => return FailureKind::NotFound,
            Some(409) => return FailureKind::Conflict,
            Some(status) if status >= 500 => return FailureKind::Server(status),
            _ => {}
        }

        match error.message() {
            Some(message) if is_network_failure(message) => FailureKind::Network,
            Some(message) => FailureKind::Message(message.to_string()),
            None => FailureKind::Unknown,
        }
    }

    /// 操作種別の文言を付けたユーザー向けメッセージ
    pub fn user_message(&self, kind: OperationKind) -> String {
        let phrase = kind.failure_phrase();
        match self {
            FailureKind::Unauthorized => {
                format!("{phrase}. Authentication required. Please log in again.")
            }
            FailureKind::Forbidden => {
                format!("{phrase}. You don't have permission to perform this action.")
            }
            FailureKind::NotFound => {
                format!("{phrase}. The menu item was not found. It may have been deleted.")
            }
            FailureKind::Conflict => format!(
                "{phrase}. This change conflicts with existing data. Please refresh and try again."
            ),
            FailureKind::Server(_) => format!("{phrase}. Server error. Please try again later."),
            FailureKind::Network => {
                format!("{phrase}. Network error. Please check your connection.")
            }
            FailureKind::Message(message) => format!("{phrase}: {message}"),
            FailureKind::Unknown => format!("{phrase}. Please try again."),
        }
    }
}

fn is_network_failure(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase();
    NETWORK_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_status() {
        let cases = [
            (401, FailureKind::Unauthorized),
            (403, FailureKind::Forbidden),
            (404, FailureKind::NotFound),
            (409, FailureKind::Conflict),
            (500, FailureKind::Server(500)),
            (503, FailureKind::Server(503)),
        ];
        for (status, expected) in cases {
            assert_eq!(
                FailureKind::classify(Some(&RemoteError::with_status(status))),
                expected
            );
        }
    }

    #[test]
    fn test_status_wins_over_message() {
        let err = RemoteError::with_status(403).and_message("Network Error");
        assert_eq!(FailureKind::classify(Some(&err)), FailureKind::Forbidden);
    }

    #[test]
    fn test_unrecognized_status_falls_back_to_message() {
        let err = RemoteError::with_status(422).and_message("price must be positive");
        assert_eq!(
            FailureKind::classify(Some(&err)),
            FailureKind::Message("price must be positive".to_string())
        );
        assert_eq!(
            FailureKind::classify(Some(&RemoteError::with_status(400))),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_network_marker_detection() {
        let err = RemoteError::with_message("Network Error");
        assert_eq!(FailureKind::classify(Some(&err)), FailureKind::Network);
        let err = RemoteError::with_message("TypeError: Failed to fetch");
        assert_eq!(FailureKind::classify(Some(&err)), FailureKind::Network);
    }

    #[test]
    fn test_missing_error_is_unknown() {
        assert_eq!(FailureKind::classify(None), FailureKind::Unknown);
        assert_eq!(
            FailureKind::classify(Some(&RemoteError::default())),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_user_message_templates() {
        let msg = FailureKind::Server(500).user_message(OperationKind::Update);
        assert!(msg.starts_with("Failed to update menu item"));
        assert!(msg.contains("Server error"));
        assert!(msg.contains("try again later"));

        let msg = FailureKind::Unauthorized.user_message(OperationKind::Create);
        assert!(msg.starts_with("Failed to create menu item"));
        assert!(msg.contains("log in again"));

        let msg =
            FailureKind::Message("name taken".to_string()).user_message(OperationKind::Delete);
        assert_eq!(msg, "Failed to delete menu item: name taken");

        let msg = FailureKind::Unknown.user_message(OperationKind::TogglePopular);
        assert_eq!(msg, "Failed to update popular status. Please try again.");
    }
}
