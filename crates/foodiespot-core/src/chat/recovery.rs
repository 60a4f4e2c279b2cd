//! Send/recovery state machine.
//!
//! Tracks where the conversation is in the "send, maybe time out, poll for
//! the result" protocol. Recovery after a timeout is an explicit,
//! user-triggered action rather than an automatic retry: the timed-out
//! turn is assumed delivered, and re-sending it could duplicate it
//! server-side.
//!
//! ```text
//! Idle ----begin_send----> Sending --delivered--> Idle
//!                          Sending --timed_out--> AwaitingConfirmation
//!                          Sending --failed-----> Idle
//! AwaitingConfirmation --begin_send-----> Sending
//! AwaitingConfirmation --begin_recovery-> Recovering --recovered-------> Idle
//!                                         Recovering --recovery_failed-> AwaitingConfirmation
//! ```

use foodiespot_types::chat::ChatPhase;
use foodiespot_types::error::TransitionError;

/// State machine guarding the send and recovery affordances.
///
/// Starts in `Idle` and cycles for the conversation's lifetime; there is
/// no terminal phase. Invalid events yield a [`TransitionError`] and leave
/// the phase unchanged.
#[derive(Debug, Clone)]
pub struct RecoveryController {
    phase: ChatPhase,
}

impl Default for RecoveryController {
    fn default() -> Self {
        Self::new()
    }
}

impl RecoveryController {
    /// Create a controller in the initial `Idle` phase.
    pub fn new() -> Self {
        Self {
            phase: ChatPhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// Whether a new send may start. True in `Idle` and
    /// `AwaitingConfirmation`; only an in-flight send or recovery disables
    /// the affordance.
    pub fn send_allowed(&self) -> bool {
        matches!(
            self.phase,
            ChatPhase::Idle | ChatPhase::AwaitingConfirmation
        )
    }

    /// Whether an explicit recovery fetch may start.
    pub fn recovery_available(&self) -> bool {
        self.phase == ChatPhase::AwaitingConfirmation
    }

    /// A send is leaving for the server.
    pub fn begin_send(&mut self) -> Result<(), TransitionError> {
        if self.send_allowed() {
            self.phase = ChatPhase::Sending;
            Ok(())
        } else {
            Err(self.rejected("begin_send"))
        }
    }

    /// The reply arrived within the bounded wait.
    pub fn delivered(&mut self) -> Result<(), TransitionError> {
        self.from_sending(ChatPhase::Idle, "delivered")
    }

    /// The bounded wait elapsed; the turn is assumed delivered.
    pub fn timed_out(&mut self) -> Result<(), TransitionError> {
        self.from_sending(ChatPhase::AwaitingConfirmation, "timed_out")
    }

    /// The send failed hard (invalid session or transport fault).
    pub fn failed(&mut self) -> Result<(), TransitionError> {
        self.from_sending(ChatPhase::Idle, "failed")
    }

    /// The user triggered a recovery fetch.
    pub fn begin_recovery(&mut self) -> Result<(), TransitionError> {
        if self.phase == ChatPhase::AwaitingConfirmation {
            self.phase = ChatPhase::Recovering;
            Ok(())
        } else {
            Err(self.rejected("begin_recovery"))
        }
    }

    /// The recovery fetch returned the canonical history.
    pub fn recovered(&mut self) -> Result<(), TransitionError> {
        if self.phase == ChatPhase::Recovering {
            self.phase = ChatPhase::Idle;
            Ok(())
        } else {
            Err(self.rejected("recovered"))
        }
    }

    /// The recovery fetch failed; recovery stays available for a retry.
    pub fn recovery_failed(&mut self) -> Result<(), TransitionError> {
        if self.phase == ChatPhase::Recovering {
            self.phase = ChatPhase::AwaitingConfirmation;
            Ok(())
        } else {
            Err(self.rejected("recovery_failed"))
        }
    }

    /// Return to `Idle` from any phase (bootstrap or session delete).
    pub fn reset(&mut self) {
        self.phase = ChatPhase::Idle;
    }

    fn from_sending(
        &mut self,
        next: ChatPhase,
        event: &'static str,
    ) -> Result<(), TransitionError> {
        if self.phase == ChatPhase::Sending {
            self.phase = next;
            Ok(())
        } else {
            Err(self.rejected(event))
        }
    }

    fn rejected(&self, event: &'static str) -> TransitionError {
        TransitionError {
            phase: self.phase,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_idle() {
        let ctrl = RecoveryController::new();
        assert_eq!(ctrl.phase(), ChatPhase::Idle);
        assert!(ctrl.send_allowed());
        assert!(!ctrl.recovery_available());
    }

    #[test]
    fn test_successful_send_cycle() {
        let mut ctrl = RecoveryController::new();
        ctrl.begin_send().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Sending);
        assert!(!ctrl.send_allowed());

        ctrl.delivered().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Idle);
    }

    #[test]
    fn test_timeout_then_recovery_cycle() {
        let mut ctrl = RecoveryController::new();
        ctrl.begin_send().unwrap();
        ctrl.timed_out().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::AwaitingConfirmation);
        assert!(ctrl.recovery_available());
        assert!(ctrl.send_allowed());

        ctrl.begin_recovery().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Recovering);
        assert!(!ctrl.send_allowed());

        ctrl.recovered().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Idle);
    }

    #[test]
    fn test_recovery_failure_allows_retry() {
        let mut ctrl = RecoveryController::new();
        ctrl.begin_send().unwrap();
        ctrl.timed_out().unwrap();
        ctrl.begin_recovery().unwrap();
        ctrl.recovery_failed().unwrap();

        assert_eq!(ctrl.phase(), ChatPhase::AwaitingConfirmation);
        assert!(ctrl.recovery_available());
        // Retry is a fresh begin_recovery.
        ctrl.begin_recovery().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Recovering);
    }

    #[test]
    fn test_send_allowed_while_awaiting_confirmation() {
        let mut ctrl = RecoveryController::new();
        ctrl.begin_send().unwrap();
        ctrl.timed_out().unwrap();

        ctrl.begin_send().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Sending);
    }

    #[test]
    fn test_hard_failure_returns_to_idle() {
        let mut ctrl = RecoveryController::new();
        ctrl.begin_send().unwrap();
        ctrl.failed().unwrap();
        assert_eq!(ctrl.phase(), ChatPhase::Idle);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut ctrl = RecoveryController::new();
        assert!(ctrl.delivered().is_err());
        assert!(ctrl.timed_out().is_err());
        assert!(ctrl.begin_recovery().is_err());
        assert!(ctrl.recovered().is_err());
        // Phase unchanged after rejections.
        assert_eq!(ctrl.phase(), ChatPhase::Idle);

        ctrl.begin_send().unwrap();
        let err = ctrl.begin_send().unwrap_err();
        assert_eq!(err.phase, ChatPhase::Sending);
        assert_eq!(err.event, "begin_send");
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut ctrl = RecoveryController::new();
        ctrl.begin_send().unwrap();
        ctrl.reset();
        assert_eq!(ctrl.phase(), ChatPhase::Idle);

        ctrl.begin_send().unwrap();
        ctrl.timed_out().unwrap();
        ctrl.reset();
        assert_eq!(ctrl.phase(), ChatPhase::Idle);
    }
}
