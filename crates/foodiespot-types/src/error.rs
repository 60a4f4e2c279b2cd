use thiserror::Error;

use crate::chat::ChatPhase;

/// Errors from conversation transport operations.
///
/// `Timeout`, `InvalidSession`, and `SessionNotFound` are recoverable
/// classes the session manager handles itself; `Transport` and
/// `Deserialization` are surfaced with no automatic retry.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no response within the bounded wait")]
    Timeout,

    #[error("session id no longer recognized by the server")]
    InvalidSession,

    #[error("session not found")]
    SessionNotFound,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from session id persistence.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session store I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SessionStoreError {
    fn from(err: std::io::Error) -> Self {
        SessionStoreError::Io(err.to_string())
    }
}

/// An event was applied to the recovery machine in a phase that does not
/// accept it.
#[derive(Debug, Error)]
#[error("invalid transition: '{event}' while {phase}")]
pub struct TransitionError {
    pub phase: ChatPhase,
    pub event: &'static str,
}

/// Errors surfaced at the session manager boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("sending is unavailable while {0}")]
    SendUnavailable(ChatPhase),

    #[error("recovery is unavailable while {0}")]
    RecoveryUnavailable(ChatPhase),

    #[error("no active session")]
    NoSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn test_transition_error_display() {
        let err = TransitionError {
            phase: ChatPhase::Idle,
            event: "recovered",
        };
        assert_eq!(err.to_string(), "invalid transition: 'recovered' while idle");
    }

    #[test]
    fn test_session_error_wraps_client_error() {
        let err: SessionError = ClientError::Timeout.into();
        assert!(matches!(err, SessionError::Client(ClientError::Timeout)));
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SessionStoreError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
