//! Voice call state machine with thread-safe transitions.
//!
//! Valid transitions for the call lifecycle:
//! - Idle / Ended -> Listening (start call)
//! - Listening -> Processing (final transcript received)
//! - Processing -> Speaking (reply ready, read aloud)
//! - Processing -> Listening (reply ready silently, or transcript abandoned)
//! - Listening -> Speaking (a reply is spoken without a voice turn)
//! - Speaking -> Listening (utterance finished)
//! - any state except Ended -> Ended (end call)

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_core::FolioError;

/// Lifecycle state of a voice call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceSessionState {
    /// No call has been started yet.
    Idle,
    /// Capturing speech from the visitor.
    Listening,
    /// A transcript is being answered; new transcripts are dropped.
    Processing,
    /// A reply is being read aloud.
    Speaking,
    /// The call was hung up. A new start re-enters Listening.
    Ended,
}

impl fmt::Display for VoiceSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceSessionState::Idle => write!(f, "Idle"),
            VoiceSessionState::Listening => write!(f, "Listening"),
            VoiceSessionState::Processing => write!(f, "Processing"),
            VoiceSessionState::Speaking => write!(f, "Speaking"),
            VoiceSessionState::Ended => write!(f, "Ended"),
        }
    }
}

impl VoiceSessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &VoiceSessionState) -> bool {
        use VoiceSessionState::*;
        matches!(
            (self, target),
            (Idle, Listening)
                | (Ended, Listening)
                | (Listening, Processing)
                | (Processing, Speaking)
                | (Processing, Listening)
                | (Listening, Speaking)
                | (Speaking, Listening)
                // Hang up
                | (Idle, Ended)
                | (Listening, Ended)
                | (Processing, Ended)
                | (Speaking, Ended)
        )
    }

    /// Whether a call is in progress.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            VoiceSessionState::Listening | VoiceSessionState::Processing | VoiceSessionState::Speaking
        )
    }
}

/// Shared handle on the current call state.
///
/// Clones observe the same state, so a status display can watch the call
/// while the driver owns the session.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<VoiceSessionState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(VoiceSessionState::Idle)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VoiceSessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> VoiceSessionState {
        *self.lock()
    }

    /// Attempt to transition to the target state.
    ///
    /// Returns a `FolioError::Voice` and leaves the state untouched when the
    /// transition is not allowed.
    pub fn transition(&self, target: VoiceSessionState) -> Result<(), FolioError> {
        let mut state = self.lock();
        if state.can_transition_to(&target) {
            tracing::debug!(from = %*state, to = %target, "Voice state transition");
            *state = target;
            Ok(())
        } else {
            Err(FolioError::Voice(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
