use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error body returned by the backend, e.g.
/// `{ "statusCode": 400, "message": ["email must be an email"] }`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<ErrorMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorResponse {
    pub fn summary(&self) -> Option<String> {
        match self.message.as_ref()? {
            ErrorMessage::One(message) => Some(message.clone()),
            ErrorMessage::Many(messages) if messages.is_empty() => None,
            ErrorMessage::Many(messages) => Some(messages.join("; ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_summary_variants() {
        let single: ErrorResponse =
            serde_json::from_str(r#"{ "statusCode": 401, "message": "Unauthorized" }"#).unwrap();
        assert_eq!(single.summary().as_deref(), Some("Unauthorized"));

        let many: ErrorResponse =
            serde_json::from_str(r#"{ "message": ["a", "b"] }"#).unwrap();
        assert_eq!(many.summary().as_deref(), Some("a; b"));

        let empty: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.summary(), None);
    }
}
