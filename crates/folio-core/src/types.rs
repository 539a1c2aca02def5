use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a transcript message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The visitor typing or speaking to the assistant.
    User,
    /// The scripted assistant.
    Assistant,
}

/// How a user input reached the assistant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Typed into the chat box or sent by a quick-action button.
    #[default]
    Text,
    /// Final transcript from speech recognition.
    Voice,
}

/// UI action a resolved reply asks the caller to perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    /// Nothing beyond rendering the reply.
    #[default]
    None,
    /// Reveal the appointment-booking form.
    OpenAppointmentForm,
}

/// Indicator shown next to the microphone control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStatus {
    /// Capture is running and waiting for speech.
    Listening,
    /// A transcript was accepted and a reply is being prepared.
    Thinking,
    /// A reply is being read aloud.
    Speaking,
    /// Capture hit a transient error and will restart shortly.
    Reconnecting,
    /// Speech capture is not supported here; text only.
    Unavailable,
    /// The call was ended by the user.
    CallEnded,
}

impl VoiceStatus {
    /// Short human-readable label for the indicator.
    pub fn label(&self) -> &'static str {
        match self {
            VoiceStatus::Listening => "Listening...",
            VoiceStatus::Thinking => "Thinking...",
            VoiceStatus::Speaking => "Speaking...",
            VoiceStatus::Reconnecting => "Reconnecting...",
            VoiceStatus::Unavailable => "Voice unavailable, please type",
            VoiceStatus::CallEnded => "Call ended",
        }
    }
}

// =============================================================================
// Value types
// =============================================================================

/// One user input within a session.
///
/// Turn indices start at 1 and only ever grow; the first turn is special-cased
/// by the responder to always greet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub index: u32,
    pub input_text: String,
    pub source: InputSource,
    pub received_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a turn stamped with the current time.
    pub fn new(index: u32, input_text: impl Into<String>, source: InputSource) -> Self {
        Self {
            index,
            input_text: input_text.into(),
            source,
            received_at: Utc::now(),
        }
    }
}

/// Outcome of resolving one input against the rule table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Reply text to render (may contain inline markup).
    pub reply: String,
    /// Action the caller should perform after rendering.
    pub side_effect: SideEffect,
    /// Identifier of the rule that produced the reply.
    pub rule_id: String,
}

// =============================================================================
// Collaborators
// =============================================================================

/// Render surface for the chat transcript.
///
/// Implementations own all presentation; the responder and the voice session
/// only call into this trait.
pub trait ConversationView: Send + Sync {
    /// Append one message to the transcript.
    fn append_message(&self, text: &str, role: Role);

    /// Update the voice status indicator.
    fn set_status(&self, status: VoiceStatus);

    /// Reveal the appointment-booking surface.
    fn open_appointment_form(&self);
}
