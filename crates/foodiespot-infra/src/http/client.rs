//! HttpConversationClient -- concrete [`ConversationClient`] over reqwest.
//!
//! Talks the conversation server's resource protocol and normalizes
//! failures into the [`ClientError`] taxonomy: reqwest timeouts become
//! `Timeout`, an "Invalid session ID" error body becomes `InvalidSession`,
//! a 404 on the conversation resource becomes `SessionNotFound`, and
//! everything else is `Transport`.
//!
//! The optional bearer credential is wrapped in [`secrecy::SecretString`]
//! and is never logged or included in `Debug` output.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use foodiespot_core::chat::client::ConversationClient;
use foodiespot_types::chat::{ConversationSnapshot, SessionHint, SessionId};
use foodiespot_types::error::ClientError;

use super::types::{ChatRequestBody, ChatResponseBody, ErrorDetail};

/// Default bounded wait for any round trip.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Error detail the server uses to disown a session id.
const INVALID_SESSION_DETAIL: &str = "Invalid session ID";

/// Conversation server transport.
///
/// Stateless: it holds connection configuration only, never conversation
/// state. The per-request timeout bounds the caller's wait; exceeding it
/// does not cancel the request server-side.
pub struct HttpConversationClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    auth_token: Option<SecretString>,
}

// HttpConversationClient intentionally does NOT derive Debug so the
// bearer credential can never leak through formatting.

impl HttpConversationClient {
    /// Create a client for the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            auth_token: None,
        }
    }

    /// Override the bounded wait for each round trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a bearer credential to every outgoing request.
    pub fn with_bearer_token(mut self, token: SecretString) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Whether a bearer credential is configured.
    pub fn has_credential(&self) -> bool {
        self.auth_token.is_some()
    }

    /// The configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Apply the timeout and optional credential to a request.
    fn prepare(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Fetch the conversation resource for a hint or a concrete id.
    async fn get_conversation(&self, segment: &str) -> Result<ConversationSnapshot, ClientError> {
        let url = self.url(&format!("/conversation/{segment}"));
        debug!(%url, "Fetching conversation");

        let response = self
            .prepare(self.client.get(&url))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }

        response
            .json::<ConversationSnapshot>()
            .await
            .map_err(|err| ClientError::Deserialization(format!("conversation payload: {err}")))
    }
}

/// Map a reqwest transport failure into the error taxonomy.
fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(err.to_string())
    }
}

/// Classify a non-2xx response by status and error body.
///
/// The invalid-session detail wins over the status code: the server may
/// report it with any 4xx.
fn classify_error_response(status: StatusCode, body: &str) -> ClientError {
    if let Ok(parsed) = serde_json::from_str::<ErrorDetail>(body) {
        if parsed.detail == INVALID_SESSION_DETAIL {
            return ClientError::InvalidSession;
        }
    }
    if status == StatusCode::NOT_FOUND {
        return ClientError::SessionNotFound;
    }
    ClientError::Transport(format!("HTTP {status}: {body}"))
}

impl ConversationClient for HttpConversationClient {
    async fn bootstrap(&self, hint: &SessionHint) -> Result<ConversationSnapshot, ClientError> {
        self.get_conversation(hint.as_path_segment()).await
    }

    async fn send(
        &self,
        session_id: &SessionId,
        message: &str,
        user_id: Option<&str>,
    ) -> Result<String, ClientError> {
        let url = self.url("/chat/");
        let body = ChatRequestBody {
            message,
            session_id: session_id.as_str(),
            user_id,
        };

        let response = self
            .prepare(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error_response(status, &body));
        }

        let parsed = response
            .json::<ChatResponseBody>()
            .await
            .map_err(|err| ClientError::Deserialization(format!("chat payload: {err}")))?;
        Ok(parsed.response)
    }

    async fn fetch_history(
        &self,
        session_id: &SessionId,
    ) -> Result<ConversationSnapshot, ClientError> {
        self.get_conversation(session_id.as_str()).await
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<(), ClientError> {
        let url = self.url(&format!("/session/{session_id}"));
        debug!(%url, "Deleting session");

        let response = self
            .prepare(self.client.delete(&url))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // Deleting an already-gone session is success.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Transport(format!("HTTP {status}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> HttpConversationClient {
        HttpConversationClient::new("http://localhost:8001")
    }

    #[test]
    fn test_url_construction() {
        let client = make_client();
        assert_eq!(
            client.url("/conversation/new"),
            "http://localhost:8001/conversation/new"
        );
        assert_eq!(client.url("/chat/"), "http://localhost:8001/chat/");
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client = HttpConversationClient::new("http://localhost:8001/");
        assert_eq!(
            client.url("/session/s1"),
            "http://localhost:8001/session/s1"
        );
    }

    #[test]
    fn test_default_timeout_is_twenty_seconds() {
        assert_eq!(make_client().timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_timeout_override() {
        let client = make_client().with_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_bearer_token_configuration() {
        let anonymous = make_client();
        assert!(!anonymous.has_credential());

        let authed = make_client().with_bearer_token(SecretString::from("token-not-real"));
        assert!(authed.has_credential());
    }

    #[test]
    fn test_classify_invalid_session_detail() {
        let err = classify_error_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Invalid session ID"}"#,
        );
        assert!(matches!(err, ClientError::InvalidSession));
    }

    #[test]
    fn test_classify_invalid_session_wins_over_not_found() {
        let err = classify_error_response(
            StatusCode::NOT_FOUND,
            r#"{"detail":"Invalid session ID"}"#,
        );
        assert!(matches!(err, ClientError::InvalidSession));
    }

    #[test]
    fn test_classify_plain_not_found() {
        let err = classify_error_response(StatusCode::NOT_FOUND, r#"{"detail":"Not Found"}"#);
        assert!(matches!(err, ClientError::SessionNotFound));
    }

    #[test]
    fn test_classify_server_fault_is_transport() {
        let err = classify_error_response(StatusCode::BAD_GATEWAY, "upstream down");
        match err {
            ClientError::Transport(msg) => {
                assert!(msg.contains("502"));
                assert!(msg.contains("upstream down"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_non_json_body() {
        let err = classify_error_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
