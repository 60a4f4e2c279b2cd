//! Conversation types for the FoodieSpot chat client.
//!
//! These types model the chat exchange between a local device and the
//! server-held conversation: the opaque session id, messages, the
//! canonical conversation snapshot, and the transient in-flight exchange.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Opaque, server-issued conversation identifier.
///
/// The server is the sole authority on what ids exist; the client only
/// stores and echoes them. At most one id is held locally at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// View the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

/// Hint sent to the server when bootstrapping a conversation.
///
/// `New` is the `"new"` sentinel asking the server to allocate a fresh
/// session; `Existing` asks for the history of a known id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionHint {
    New,
    Existing(SessionId),
}

impl SessionHint {
    /// The path segment this hint occupies in the conversation URL.
    pub fn as_path_segment(&self) -> &str {
        match self {
            SessionHint::New => "new",
            SessionHint::Existing(id) => id.as_str(),
        }
    }
}

impl fmt::Display for SessionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path_segment())
    }
}

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single turn in the conversation.
///
/// Assistant content may carry markdown; user content is plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The server's canonical view of a conversation.
///
/// Returned by bootstrap and history fetches; the history is in server
/// order and is the single source of truth for what is displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub session_id: SessionId,
    pub history: Vec<Message>,
}

/// An in-flight user turn awaiting a reply. Transient, never persisted.
///
/// Dropped when the exchange resolves (reply appended), is superseded
/// (session reset), or is abandoned (session cleared or client exits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    /// The outgoing user text.
    pub text: String,
    /// Whether the wait has exceeded the timeout threshold.
    pub timed_out: bool,
}

impl PendingExchange {
    /// Record a freshly dispatched user turn.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timed_out: false,
        }
    }
}

/// Phase of the send/recovery state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatPhase {
    /// No exchange in flight; sends are allowed.
    Idle,
    /// A send is in flight; the send affordance is disabled.
    Sending,
    /// A send timed out; the turn is assumed delivered and an explicit
    /// recovery fetch is available.
    AwaitingConfirmation,
    /// A recovery fetch is in flight; the send affordance is disabled.
    Recovering,
}

impl fmt::Display for ChatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatPhase::Idle => write!(f, "idle"),
            ChatPhase::Sending => write!(f, "sending"),
            ChatPhase::AwaitingConfirmation => write!(f, "awaiting_confirmation"),
            ChatPhase::Recovering => write!(f, "recovering"),
        }
    }
}

/// How a send attempt concluded, as reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply arrived and was appended.
    Delivered,
    /// The bounded wait elapsed; a placeholder was posted and the machine
    /// is awaiting an explicit recovery.
    TimedOut,
    /// The server disowned the session; a fresh one was bootstrapped and
    /// the failed turn was not resent.
    SessionReset,
    /// Transport failure; a failure notice was posted, no retry.
    Failed,
}
