//! Call driver: the single task that owns the conversation and the voice
//! session.
//!
//! Console input, capture events and synthesis completions arrive on one
//! channel; the thinking pause and capture restarts are kept as a local timer
//! list. Both are multiplexed with `tokio::select!`, so nothing here needs a
//! lock and events are handled strictly one at a time.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

use folio_chat::{ChatError, Conversation};
use folio_core::config::FolioConfig;
use folio_core::{ConversationTurn, InputSource};
use folio_voice::{Followup, InputEvent, VoiceSession};

/// Everything the driver reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallInput {
    /// Event from the speech capture collaborator.
    Capture(InputEvent),
    /// The speech output finished its utterance.
    SpeechFinished,
    /// A typed chat message.
    Text(String),
    StartCall,
    EndCall,
    Quit,
}

#[derive(Debug)]
enum Scheduled {
    /// Answer a turn. Voice turns carry the call epoch they were heard in.
    Reply {
        turn: ConversationTurn,
        voice_epoch: Option<u64>,
    },
    RestartCapture { epoch: u64 },
}

#[derive(Debug)]
struct Timer {
    due: Instant,
    job: Scheduled,
}

pub struct CallDriver {
    conversation: Conversation,
    session: VoiceSession,
    thinking_delay: Duration,
    speak_replies: bool,
    timers: Vec<Timer>,
}

impl CallDriver {
    pub fn new(conversation: Conversation, session: VoiceSession, config: &FolioConfig) -> Self {
        Self {
            conversation,
            session,
            thinking_delay: config.conversation.thinking_delay(),
            speak_replies: config.voice.speak_replies,
            timers: Vec::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn session(&self) -> &VoiceSession {
        &self.session
    }

    /// Process inputs until `Quit` arrives or every sender is gone.
    ///
    /// Returns the driver so callers can inspect the final state.
    pub async fn run(mut self, mut inputs: UnboundedReceiver<CallInput>) -> Self {
        tracing::debug!("Call driver started");
        loop {
            let next_due = self.timers.iter().map(|t| t.due).min();
            tokio::select! {
                input = inputs.recv() => match input {
                    Some(CallInput::Quit) | None => break,
                    Some(input) => self.handle(input),
                },
                _ = sleep_until(next_due) => self.fire_due(),
            }
        }
        tracing::debug!(pending_timers = self.timers.len(), "Call driver stopped");
        self
    }

    fn handle(&mut self, input: CallInput) {
        match input {
            CallInput::Text(text) => self.accept_text(&text),
            CallInput::Capture(event) => self.accept_capture(event),
            CallInput::SpeechFinished => {
                let followup = self.session.speech_ended();
                self.follow(followup);
            }
            CallInput::StartCall => {
                self.session.start();
            }
            CallInput::EndCall => {
                self.session.end_call();
            }
            CallInput::Quit => {}
        }
    }

    fn accept_text(&mut self, text: &str) {
        match self.conversation.begin_turn(text, InputSource::Text) {
            Ok(turn) => self.schedule(
                self.thinking_delay,
                Scheduled::Reply {
                    turn,
                    voice_epoch: None,
                },
            ),
            Err(ChatError::EmptyMessage) => {}
            Err(e) => tracing::info!(error = %e, "Message not sent"),
        }
    }

    fn accept_capture(&mut self, event: InputEvent) {
        if self.conversation.is_processing() && matches!(event, InputEvent::FinalResult(_)) {
            tracing::debug!("Transcript dropped while a reply is pending");
            return;
        }

        let followup = self.session.on_input_event(event);
        self.follow(followup);
    }

    /// Schedule whatever the session asked for.
    fn follow(&mut self, followup: Followup) {
        match followup {
            Followup::Nothing => {}
            Followup::Resolve { transcript, epoch } => {
                match self.conversation.begin_turn(&transcript, InputSource::Voice) {
                    Ok(turn) => self.schedule(
                        self.thinking_delay,
                        Scheduled::Reply {
                            turn,
                            voice_epoch: Some(epoch),
                        },
                    ),
                    Err(e) => {
                        tracing::debug!(error = %e, "Transcript rejected");
                        let followup = self.session.abandon_transcript(epoch);
                        self.follow(followup);
                    }
                }
            }
            Followup::RestartCapture { after, epoch } => {
                self.schedule(after, Scheduled::RestartCapture { epoch })
            }
        }
    }

    fn schedule(&mut self, after: Duration, job: Scheduled) {
        self.timers.push(Timer {
            due: Instant::now() + after,
            job,
        });
    }

    fn fire_due(&mut self) {
        let now = Instant::now();
        let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| t.due);

        for timer in due {
            match timer.job {
                Scheduled::Reply { turn, voice_epoch } => self.reply(&turn, voice_epoch),
                Scheduled::RestartCapture { epoch } => {
                    let followup = self.session.restart_capture(epoch);
                    self.follow(followup);
                }
            }
        }
    }

    fn reply(&mut self, turn: &ConversationTurn, voice_epoch: Option<u64>) {
        let resolution = self.conversation.complete_turn(turn);
        match voice_epoch {
            Some(epoch) => {
                let followup = self.session.response_ready(epoch, &resolution.reply);
                self.follow(followup);
            }
            None if self.speak_replies && self.session.is_on_call() => {
                self.session.speak(&resolution.reply);
            }
            None => {}
        }
    }
}

async fn sleep_until(due: Option<Instant>) {
    match due {
        Some(due) => tokio::time::sleep_until(due).await,
        None => std::future::pending().await,
    }
}

// =============================================================================
// Tests
// =============================================================================
