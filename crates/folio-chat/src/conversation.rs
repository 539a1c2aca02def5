//! Chat conversation: turn bookkeeping around the responder.
//!
//! A turn is split in two so the caller can put a "thinking" pause between
//! them without blocking: [`Conversation::begin_turn`] validates and records
//! the input, [`Conversation::complete_turn`] resolves and renders the reply.
//! Only one turn may be in flight at a time.

use std::sync::Arc;

use folio_core::config::ConversationConfig;
use folio_core::{ConversationTurn, ConversationView, InputSource, Resolution, Role, SideEffect};

use crate::error::ChatError;
use crate::responder::IntentResponder;

/// Session-scoped chat state. Nothing here outlives the session.
pub struct Conversation {
    responder: IntentResponder,
    view: Arc<dyn ConversationView>,
    turns: Vec<ConversationTurn>,
    in_flight: Option<u32>,
    max_message_length: usize,
}

impl Conversation {
    pub fn new(
        responder: IntentResponder,
        view: Arc<dyn ConversationView>,
        config: &ConversationConfig,
    ) -> Self {
        Self {
            responder,
            view,
            turns: Vec::new(),
            in_flight: None,
            max_message_length: config.max_message_length,
        }
    }

    /// Whether a reply is currently being prepared.
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// All turns recorded so far, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn responder(&self) -> &IntentResponder {
        &self.responder
    }

    /// Accept a user input and render it.
    ///
    /// Rejects empty or oversized input, and any input while another turn is
    /// still being answered (dropped, not queued).
    pub fn begin_turn(
        &mut self,
        text: &str,
        source: InputSource,
    ) -> Result<ConversationTurn, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }
        if let Some(pending) = self.in_flight {
            tracing::debug!(pending_turn = pending, ?source, "Input dropped while a reply is pending");
            return Err(ChatError::Busy);
        }

        let index = self.turns.len() as u32 + 1;
        let turn = ConversationTurn::new(index, text, source);
        self.view.append_message(text, Role::User);
        self.turns.push(turn.clone());
        self.in_flight = Some(index);

        tracing::debug!(turn = index, ?source, "Turn started");
        Ok(turn)
    }

    /// Resolve a started turn, render the reply and perform its side effect.
    pub fn complete_turn(&mut self, turn: &ConversationTurn) -> Resolution {
        let resolution = self.responder.resolve(&turn.input_text, turn.index);
        self.view.append_message(&resolution.reply, Role::Assistant);

        if resolution.side_effect == SideEffect::OpenAppointmentForm {
            self.view.open_appointment_form();
        }

        if self.in_flight == Some(turn.index) {
            self.in_flight = None;
        }
        resolution
    }
}

// =============================================================================
// Tests
// =============================================================================
