//! Session manager orchestrating the conversation lifecycle.
//!
//! Binds the transport port, the session id store, the message log, and
//! the recovery state machine into the component the UI talks to:
//! bootstrap (restore or create a session), send (optimistic append, then
//! reconcile the reply), recover (explicit canonical re-fetch after a
//! timeout), and delete.
//!
//! Failure policy: every transport failure is absorbed here and converted
//! into either a state transition plus a user-visible notice, or a silent
//! corrective action (session reset). The log and the store are never left
//! inconsistent with the last known server truth, and no path strands the
//! machine outside `Idle` or `AwaitingConfirmation`.

use foodiespot_types::chat::{
    ChatPhase, ConversationSnapshot, Message, PendingExchange, SendOutcome, SessionHint, SessionId,
};
use foodiespot_types::error::{ClientError, SessionError};
use tracing::{info, warn};

use crate::chat::client::ConversationClient;
use crate::chat::log::MessageLog;
use crate::chat::recovery::RecoveryController;
use crate::session::store::SessionStore;

/// Notice appended when a send exceeds the bounded wait. The turn is
/// assumed delivered server-side; only an explicit recovery fetches it.
pub const TIMEOUT_NOTICE: &str = "Your message reached FoodieSpot, but the reply is taking \
longer than expected. Trigger a recovery to fetch it.";

/// Notice appended on a hard transport failure. No automatic retry.
pub const FAILURE_NOTICE: &str = "Something went wrong talking to FoodieSpot. Please try \
sending your message again.";

/// Orchestrates a single conversation against the remote server.
///
/// Generic over the transport and store ports so foodiespot-core never
/// depends on foodiespot-infra. All operations take `&mut self` and are
/// awaited on one logical thread of control, so log mutations never
/// interleave.
pub struct SessionManager<C: ConversationClient, S: SessionStore> {
    client: C,
    store: S,
    log: MessageLog,
    recovery: RecoveryController,
    session: Option<SessionId>,
    pending: Option<PendingExchange>,
    user_id: Option<String>,
    /// Guards against stacking a second timeout placeholder before an
    /// intervening recovery.
    timeout_notice_posted: bool,
}

impl<C: ConversationClient, S: SessionStore> SessionManager<C, S> {
    /// Create a manager over the given transport and store. Call
    /// [`SessionManager::bootstrap`] before sending.
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            log: MessageLog::new(),
            recovery: RecoveryController::new(),
            session: None,
            pending: None,
            user_id: None,
            timeout_notice_posted: false,
        }
    }

    /// Attach an identity to outgoing chat requests. Anonymous chat is
    /// the default and remains valid.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    // --- Accessors ---

    /// The displayed turn sequence.
    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    /// Current phase of the send/recovery machine.
    pub fn phase(&self) -> ChatPhase {
        self.recovery.phase()
    }

    /// The active session id, if bootstrapped.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// The in-flight user turn, if any.
    pub fn pending(&self) -> Option<&PendingExchange> {
        self.pending.as_ref()
    }

    /// Whether the send affordance is enabled.
    pub fn send_allowed(&self) -> bool {
        self.recovery.send_allowed() && self.session.is_some()
    }

    /// Whether an explicit recovery fetch is available.
    pub fn recovery_available(&self) -> bool {
        self.recovery.recovery_available()
    }

    // --- Lifecycle ---

    /// Obtain or create a session and load its canonical history.
    ///
    /// Uses the persisted id as the hint when present, falling back to the
    /// `"new"` sentinel. A stored id the server disowns is cleared and
    /// replaced by one fresh bootstrap; the persisted id is written only
    /// after the server acknowledges it.
    pub async fn bootstrap(&mut self) -> Result<(), SessionError> {
        let hint = match self.store.load().await? {
            Some(id) => SessionHint::Existing(id),
            None => SessionHint::New,
        };

        let snapshot = match self.client.bootstrap(&hint).await {
            Ok(snapshot) => snapshot,
            Err(ClientError::SessionNotFound | ClientError::InvalidSession)
                if matches!(hint, SessionHint::Existing(_)) =>
            {
                warn!(stale_id = %hint, "Stored session disowned by server, starting fresh");
                self.store.clear().await?;
                self.client.bootstrap(&SessionHint::New).await?
            }
            Err(err) => return Err(err.into()),
        };

        self.adopt_snapshot(snapshot).await
    }

    /// Post a user turn and reconcile the outcome into the log.
    ///
    /// The user message is appended optimistically before the network
    /// call. Transport failures are absorbed into a [`SendOutcome`]; only
    /// guard violations and store failures surface as errors.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<SendOutcome, SessionError> {
        if !self.recovery.send_allowed() {
            return Err(SessionError::SendUnavailable(self.phase()));
        }
        let session_id = self.session.clone().ok_or(SessionError::NoSession)?;
        let text = text.into();

        self.recovery.begin_send()?;
        self.log.append(Message::user(text.clone()));
        self.pending = Some(PendingExchange::new(text.clone()));

        match self
            .client
            .send(&session_id, &text, self.user_id.as_deref())
            .await
        {
            Ok(reply) => {
                self.log.append(Message::assistant(reply));
                self.pending = None;
                self.timeout_notice_posted = false;
                self.recovery.delivered()?;
                Ok(SendOutcome::Delivered)
            }
            Err(ClientError::Timeout) => {
                warn!(session_id = %session_id, "Send timed out, awaiting confirmation");
                self.recovery.timed_out()?;
                if let Some(pending) = self.pending.as_mut() {
                    pending.timed_out = true;
                }
                if !self.timeout_notice_posted {
                    self.log.append(Message::assistant(TIMEOUT_NOTICE));
                    self.timeout_notice_posted = true;
                }
                Ok(SendOutcome::TimedOut)
            }
            Err(ClientError::InvalidSession | ClientError::SessionNotFound) => {
                warn!(session_id = %session_id, "Server disowned session, bootstrapping a fresh one");
                self.recovery.failed()?;
                self.store.clear().await?;
                // The failed turn is not resent: the user decides whether
                // to repeat it in the fresh conversation.
                let snapshot = self.client.bootstrap(&SessionHint::New).await?;
                self.adopt_snapshot(snapshot).await?;
                Ok(SendOutcome::SessionReset)
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Send failed");
                self.recovery.failed()?;
                self.pending = None;
                self.log.append(Message::assistant(FAILURE_NOTICE));
                Ok(SendOutcome::Failed)
            }
        }
    }

    /// Re-fetch the canonical conversation state after a timed-out send.
    ///
    /// On success the log is replaced wholesale with server truth,
    /// discarding the timeout placeholder. On failure the machine stays in
    /// `AwaitingConfirmation` and the error is surfaced so the user may
    /// retry.
    pub async fn recover(&mut self) -> Result<(), SessionError> {
        if !self.recovery.recovery_available() {
            return Err(SessionError::RecoveryUnavailable(self.phase()));
        }
        let session_id = self.session.clone().ok_or(SessionError::NoSession)?;

        self.recovery.begin_recovery()?;
        match self.client.fetch_history(&session_id).await {
            Ok(snapshot) => {
                info!(session_id = %session_id, turns = snapshot.history.len(), "Recovered canonical history");
                self.log.replace_all(snapshot.history);
                self.pending = None;
                self.timeout_notice_posted = false;
                self.recovery.recovered()?;
                Ok(())
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Recovery fetch failed");
                self.recovery.recovery_failed()?;
                Err(err.into())
            }
        }
    }

    /// Delete the conversation and clear all local state.
    ///
    /// The server-side delete is best-effort (fire-and-forget: a failure
    /// is logged, never surfaced) and local state is cleared regardless.
    /// Any pending exchange is abandoned without cancelling the in-flight
    /// server request; the server remains the authority on whether that
    /// turn completed. Safe to call with no active session.
    pub async fn delete(&mut self) -> Result<(), SessionError> {
        if let Some(session_id) = self.session.take() {
            if let Err(err) = self.client.delete_session(&session_id).await {
                warn!(session_id = %session_id, error = %err, "Server-side delete failed, clearing local state anyway");
            } else {
                info!(session_id = %session_id, "Session deleted");
            }
        }
        self.store.clear().await?;
        self.log.replace_all(Vec::new());
        self.pending = None;
        self.timeout_notice_posted = false;
        self.recovery.reset();
        Ok(())
    }

    /// Persist the acknowledged id and make the snapshot the displayed
    /// truth. Resets the machine and abandons any pending exchange.
    async fn adopt_snapshot(&mut self, snapshot: ConversationSnapshot) -> Result<(), SessionError> {
        self.store.save(&snapshot.session_id).await?;
        info!(session_id = %snapshot.session_id, turns = snapshot.history.len(), "Conversation ready");
        self.session = Some(snapshot.session_id);
        self.log.replace_all(snapshot.history);
        self.pending = None;
        self.timeout_notice_posted = false;
        self.recovery.reset();
        Ok(())
    }
}
