//! Wire types for the conversation server protocol.
//!
//! The resource shapes are a stable contract:
//! `GET /conversation/{id|"new"}` returns `{ session_id, history }`,
//! `POST /chat/` takes `{ message, session_id, user_id? }` and returns
//! `{ response }`, and error bodies carry `{ detail }`.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat/`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequestBody<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

/// Success body of `POST /chat/`.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseBody {
    pub response: String,
}

/// Error body shape (`{ "detail": "Invalid session ID" }`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_skips_absent_user_id() {
        let body = ChatRequestBody {
            message: "hello",
            session_id: "s1",
            user_id: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"hello","session_id":"s1"}"#);
    }

    #[test]
    fn test_chat_request_includes_user_id_when_set() {
        let body = ChatRequestBody {
            message: "hello",
            session_id: "s1",
            user_id: Some("user-7"),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""user_id":"user-7""#));
    }

    #[test]
    fn test_chat_response_deserialize() {
        let parsed: ChatResponseBody =
            serde_json::from_str(r#"{"response":"Hi!"}"#).unwrap();
        assert_eq!(parsed.response, "Hi!");
    }

    #[test]
    fn test_error_detail_deserialize() {
        let parsed: ErrorDetail =
            serde_json::from_str(r#"{"detail":"Invalid session ID"}"#).unwrap();
        assert_eq!(parsed.detail, "Invalid session ID");
    }
}
