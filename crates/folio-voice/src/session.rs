//! Voice call session.
//!
//! `VoiceSession` owns the call state and the speech collaborators. It never
//! sleeps or resolves intents itself: anything that has to happen later is
//! handed back to the caller as a [`Followup`], tagged with the call epoch it
//! was issued in. Ending or restarting a call bumps the epoch, so followups
//! from an earlier call are recognised as stale and ignored.

use std::sync::Arc;
use std::time::Duration;

use folio_core::config::VoiceConfig;
use folio_core::{ConversationView, Role, VoiceStatus};

use crate::io::{InputEvent, SpeechInput, SpeechOutput};
use crate::state::{StateMachine, VoiceSessionState};
use crate::utterance::Utterance;

/// Message appended to the transcript when a call is hung up.
pub const CALL_ENDED_MESSAGE: &str =
    "Call ended. Click the microphone to start a new conversation!";

/// Work the caller has to schedule after feeding an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    /// Resolve this transcript, then call [`VoiceSession::response_ready`].
    Resolve { transcript: String, epoch: u64 },
    /// Call [`VoiceSession::restart_capture`] once `after` has elapsed.
    RestartCapture { after: Duration, epoch: u64 },
}

pub struct VoiceSession {
    state: StateMachine,
    input: Box<dyn SpeechInput>,
    output: Box<dyn SpeechOutput>,
    view: Arc<dyn ConversationView>,
    config: VoiceConfig,
    min_transcript_chars: usize,
    epoch: u64,
}

impl VoiceSession {
    pub fn new(
        input: Box<dyn SpeechInput>,
        output: Box<dyn SpeechOutput>,
        view: Arc<dyn ConversationView>,
        config: VoiceConfig,
        min_transcript_chars: usize,
    ) -> Self {
        Self {
            state: StateMachine::new(),
            input,
            output,
            view,
            config,
            min_transcript_chars,
            epoch: 0,
        }
    }

    pub fn state(&self) -> VoiceSessionState {
        self.state.current()
    }

    /// Shared handle for observers of the call state.
    pub fn state_handle(&self) -> StateMachine {
        self.state.clone()
    }

    pub fn is_on_call(&self) -> bool {
        self.state().is_active()
    }

    /// Current call epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a call.
    ///
    /// Returns `false` when voice is disabled or capture cannot start; the
    /// visitor is told once and the chat carries on text-only. Starting while
    /// already on a call is a no-op that returns `true`.
    pub fn start(&mut self) -> bool {
        if self.is_on_call() {
            return true;
        }
        if !self.config.enabled {
            return self.unavailable("voice calls are disabled");
        }
        if !self.input.is_available() {
            return self.unavailable("speech capture is not supported here");
        }
        if let Err(e) = self.input.start() {
            return self.unavailable(&e.to_string());
        }

        self.enter(VoiceSessionState::Listening);
        self.epoch += 1;
        self.view.set_status(VoiceStatus::Listening);
        tracing::info!(epoch = self.epoch, "Voice call started");
        true
    }

    fn unavailable(&self, reason: &str) -> bool {
        tracing::warn!(reason, "Voice call unavailable, continuing text-only");
        self.view.set_status(VoiceStatus::Unavailable);
        false
    }

    /// Feed one event from the capture side.
    pub fn on_input_event(&mut self, event: InputEvent) -> Followup {
        let state = self.state();
        match event {
            InputEvent::Started => {
                if state == VoiceSessionState::Listening {
                    self.view.set_status(VoiceStatus::Listening);
                }
                Followup::Nothing
            }
            InputEvent::FinalResult(text) => self.accept_transcript(state, text),
            InputEvent::SpeechEnded if state == VoiceSessionState::Listening => {
                Followup::RestartCapture {
                    after: self.config.speech_end_restart(),
                    epoch: self.epoch,
                }
            }
            InputEvent::Error(message) if state == VoiceSessionState::Listening => {
                tracing::warn!(error = %message, "Speech capture error, reconnecting");
                self.view.set_status(VoiceStatus::Reconnecting);
                Followup::RestartCapture {
                    after: self.config.error_restart(),
                    epoch: self.epoch,
                }
            }
            InputEvent::SpeechEnded | InputEvent::Error(_) => Followup::Nothing,
        }
    }

    fn accept_transcript(&mut self, state: VoiceSessionState, text: String) -> Followup {
        if state != VoiceSessionState::Listening {
            tracing::debug!(%state, "Transcript dropped");
            return Followup::Nothing;
        }
        let transcript = text.trim();
        if transcript.chars().count() < self.min_transcript_chars {
            tracing::debug!(transcript, "Transcript too short, ignored");
            return Followup::Nothing;
        }

        self.enter(VoiceSessionState::Processing);
        self.view.set_status(VoiceStatus::Thinking);
        Followup::Resolve {
            transcript: transcript.to_string(),
            epoch: self.epoch,
        }
    }

    /// Deliver the reply for a transcript handed out by [`Followup::Resolve`].
    ///
    /// Replies belonging to an ended call, or arriving when the session is no
    /// longer waiting for one, are ignored.
    pub fn response_ready(&mut self, epoch: u64, reply: &str) -> Followup {
        if epoch != self.epoch || self.state() != VoiceSessionState::Processing {
            tracing::debug!(epoch, current = self.epoch, "Stale reply ignored");
            return Followup::Nothing;
        }
        if self.config.speak_replies && self.say(reply) {
            return Followup::Nothing;
        }
        self.enter(VoiceSessionState::Listening);
        self.resume_capture()
    }

    /// Give up on a transcript that produced no reply.
    pub fn abandon_transcript(&mut self, epoch: u64) -> Followup {
        if epoch != self.epoch || self.state() != VoiceSessionState::Processing {
            return Followup::Nothing;
        }
        self.enter(VoiceSessionState::Listening);
        self.resume_capture()
    }

    /// The speech output finished the current utterance.
    pub fn speech_ended(&mut self) -> Followup {
        if self.state() != VoiceSessionState::Speaking {
            return Followup::Nothing;
        }
        self.enter(VoiceSessionState::Listening);
        self.resume_capture()
    }

    /// Run a restart scheduled by [`Followup::RestartCapture`].
    ///
    /// A restart that fails schedules another one after the error backoff.
    pub fn restart_capture(&mut self, epoch: u64) -> Followup {
        if epoch != self.epoch || self.state() != VoiceSessionState::Listening {
            return Followup::Nothing;
        }
        self.resume_capture()
    }

    /// Read `text` aloud, cutting off whatever is playing.
    ///
    /// Ignored unless a call is active.
    pub fn speak(&mut self, text: &str) -> bool {
        if !self.is_on_call() {
            tracing::debug!(state = %self.state(), "Speak ignored outside a call");
            return false;
        }
        self.say(text)
    }

    fn say(&mut self, text: &str) -> bool {
        let Some(utterance) = Utterance::from_reply(text, &self.config) else {
            return false;
        };

        self.output.cancel();
        self.input.stop();
        self.output.speak(&utterance);
        if self.state() != VoiceSessionState::Speaking {
            self.enter(VoiceSessionState::Speaking);
        }
        self.view.set_status(VoiceStatus::Speaking);
        true
    }

    /// Hang up. Idempotent: ending an ended call does nothing.
    pub fn end_call(&mut self) -> bool {
        if self.state() == VoiceSessionState::Ended {
            return false;
        }

        self.output.cancel();
        self.input.stop();
        self.enter(VoiceSessionState::Ended);
        self.epoch += 1;
        self.view.set_status(VoiceStatus::CallEnded);
        self.view.append_message(CALL_ENDED_MESSAGE, Role::Assistant);
        tracing::info!(epoch = self.epoch, "Voice call ended");
        true
    }

    fn resume_capture(&mut self) -> Followup {
        match self.input.start() {
            Ok(()) => {
                self.view.set_status(VoiceStatus::Listening);
                Followup::Nothing
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not resume speech capture, retrying");
                self.view.set_status(VoiceStatus::Reconnecting);
                Followup::RestartCapture {
                    after: self.config.error_restart(),
                    epoch: self.epoch,
                }
            }
        }
    }

    fn enter(&self, target: VoiceSessionState) {
        if let Err(e) = self.state.transition(target) {
            tracing::error!(error = %e, "Voice session out of sync");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
