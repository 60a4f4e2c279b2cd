//! ConversationClient trait definition.
//!
//! This is the transport port the session manager drives. It is a
//! stateless round-trip abstraction: it owns no persistent state and every
//! call carries the session id it operates on. Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).
//!
//! Implementations live in foodiespot-infra (e.g., `HttpConversationClient`).

use foodiespot_types::chat::{ConversationSnapshot, SessionHint, SessionId};
use foodiespot_types::error::ClientError;

/// Transport port for the remote conversation resource.
pub trait ConversationClient: Send + Sync {
    /// Obtain or create a conversation.
    ///
    /// With `SessionHint::New` the server allocates a session and returns
    /// its id plus an initial (possibly empty) history; with an existing
    /// id it returns that session's history. Fails with
    /// [`ClientError::SessionNotFound`] for an unrecognized non-new hint;
    /// callers treat that identically to `InvalidSession` from `send`.
    fn bootstrap(
        &self,
        hint: &SessionHint,
    ) -> impl std::future::Future<Output = Result<ConversationSnapshot, ClientError>> + Send;

    /// Post a user turn and return the assistant's reply text.
    ///
    /// Attaches the bearer credential when the client was configured with
    /// one; anonymous sends are valid. Bounded by a hard timeout -- the
    /// call never blocks indefinitely. Exceeding the timeout does not
    /// cancel the server-side request; the eventual completion is
    /// reconciled via [`ConversationClient::fetch_history`].
    fn send(
        &self,
        session_id: &SessionId,
        message: &str,
        user_id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String, ClientError>> + Send;

    /// Idempotent read of the canonical conversation state.
    ///
    /// Used both for initial load and for recovery polling after a
    /// suspected lost reply.
    fn fetch_history(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<ConversationSnapshot, ClientError>> + Send;

    /// Remove the conversation server-side.
    ///
    /// Idempotent from the caller's perspective: deleting an already-gone
    /// session is success, and local state is cleared regardless.
    fn delete_session(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;
}
