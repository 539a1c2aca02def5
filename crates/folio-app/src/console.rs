//! Terminal collaborators: a printing view, a typed-transcript "microphone"
//! and a printing speech output.

use tokio::sync::mpsc::UnboundedSender;

use folio_chat::AppointmentRequest;
use folio_core::{ConversationView, FolioError, Role, VoiceStatus};
use folio_voice::{InputEvent, SpeechInput, SpeechOutput, Utterance};

use crate::call::CallInput;

pub const HELP: &str = "Commands:\n  \
/call                               start a voice call\n  \
/end                                end the call\n  \
/book name; email; date; time[; purpose]   request an appointment\n  \
/help                               show this help\n  \
/quit                               leave";

/// Prints the transcript to stdout.
pub struct ConsoleView {
    assistant_name: String,
}

impl ConsoleView {
    pub fn new(assistant_name: &str) -> Self {
        Self {
            assistant_name: assistant_name.to_string(),
        }
    }
}

impl ConversationView for ConsoleView {
    fn append_message(&self, text: &str, role: Role) {
        match role {
            Role::User => println!("You: {text}"),
            Role::Assistant => println!("{}: {text}\n", self.assistant_name),
        }
    }

    fn set_status(&self, status: VoiceStatus) {
        println!("[{}]", status.label());
    }

    fn open_appointment_form(&self) {
        println!("{HELP_BOOK}");
    }
}

const HELP_BOOK: &str =
    "[appointment form] Send your details with: /book name; email; date; time; purpose";

/// Speech capture backed by typed lines.
///
/// Only reports itself available when the chat runs with `--voice-stdin`;
/// transcripts are then fed in by the console reader.
pub struct TypedCapture {
    enabled: bool,
    capturing: bool,
}

impl TypedCapture {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            capturing: false,
        }
    }
}

impl SpeechInput for TypedCapture {
    fn is_available(&self) -> bool {
        self.enabled
    }

    fn start(&mut self) -> folio_core::Result<()> {
        if !self.enabled {
            return Err(FolioError::Voice("no speech capture device".to_string()));
        }
        if !self.capturing {
            tracing::debug!("Typed capture listening");
        }
        self.capturing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.capturing = false;
    }
}

/// "Speaks" by printing, then reports completion straight away.
pub struct ConsoleSpeech {
    events: UnboundedSender<CallInput>,
}

impl ConsoleSpeech {
    pub fn new(events: UnboundedSender<CallInput>) -> Self {
        Self { events }
    }
}

impl SpeechOutput for ConsoleSpeech {
    fn speak(&mut self, utterance: &Utterance) {
        println!("(speaking, {}) {}", utterance.language, utterance.text);
        if self.events.send(CallInput::SpeechFinished).is_err() {
            tracing::debug!("Call driver gone, speech completion dropped");
        }
    }

    fn cancel(&mut self) {}
}

/// What a typed console line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleLine {
    Call(CallInput),
    Book(AppointmentRequest),
    Help,
    Blank,
}

/// Interpret one line typed at the prompt.
///
/// Plain text becomes a voice transcript while `as_transcript` is set and a
/// chat message otherwise.
pub fn parse_line(line: &str, as_transcript: bool) -> ConsoleLine {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleLine::Blank;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/call" => ConsoleLine::Call(CallInput::StartCall),
        "/end" => ConsoleLine::Call(CallInput::EndCall),
        "/quit" | "/exit" => ConsoleLine::Call(CallInput::Quit),
        "/help" => ConsoleLine::Help,
        "/book" => ConsoleLine::Book(parse_booking(rest)),
        _ if as_transcript => {
            ConsoleLine::Call(CallInput::Capture(InputEvent::FinalResult(line.to_string())))
        }
        _ => ConsoleLine::Call(CallInput::Text(line.to_string())),
    }
}

/// Split `name; email; date; time; purpose` into a request. Missing fields
/// stay empty and are reported by validation.
fn parse_booking(fields: &str) -> AppointmentRequest {
    let mut parts = fields.split(';').map(|p| p.trim().to_string());
    let mut next = || parts.next().unwrap_or_default();
    AppointmentRequest {
        name: next(),
        email: next(),
        date: next(),
        time: next(),
        purpose: Some(next()).filter(|p| !p.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(parse_line("/call", false), ConsoleLine::Call(CallInput::StartCall));
        assert_eq!(parse_line("  /end ", true), ConsoleLine::Call(CallInput::EndCall));
        assert_eq!(parse_line("/quit", false), ConsoleLine::Call(CallInput::Quit));
        assert_eq!(parse_line("/help", false), ConsoleLine::Help);
        assert_eq!(parse_line("   ", false), ConsoleLine::Blank);
    }

    #[test]
    fn test_plain_text_routing() {
        assert_eq!(
            parse_line(" skills ", false),
            ConsoleLine::Call(CallInput::Text("skills".to_string()))
        );
        assert_eq!(
            parse_line("skills", true),
            ConsoleLine::Call(CallInput::Capture(InputEvent::FinalResult("skills".to_string())))
        );
    }

    #[test]
    fn test_book_line() {
        let ConsoleLine::Book(req) =
            parse_line("/book Jane Doe; jane@example.com; 2026-11-02; 10:30; Network audit", false)
        else {
            panic!("expected booking");
        };
        assert_eq!(req.name, "Jane Doe");
        assert_eq!(req.email, "jane@example.com");
        assert_eq!(req.time, "10:30");
        assert_eq!(req.purpose.as_deref(), Some("Network audit"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_book_line_missing_fields() {
        let ConsoleLine::Book(req) = parse_line("/book Jane; jane@example.com", false) else {
            panic!("expected booking");
        };
        assert!(req.date.is_empty());
        assert!(req.purpose.is_none());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_typed_capture_availability() {
        let mut off = TypedCapture::new(false);
        assert!(!off.is_available());
        assert!(off.start().is_err());

        let mut on = TypedCapture::new(true);
        assert!(on.is_available());
        assert!(on.start().is_ok());
    }

    #[test]
    fn test_console_speech_reports_completion() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut speech = ConsoleSpeech::new(tx);
        let utterance = Utterance::from_reply("Hello", &Default::default()).unwrap();
        speech.speak(&utterance);
        assert_eq!(rx.try_recv().unwrap(), CallInput::SpeechFinished);
    }
}
