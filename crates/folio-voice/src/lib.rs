//! Folio Voice crate - voice call session over pluggable speech collaborators.
//!
//! A call moves through a strict state machine:
//! Idle -> Listening -> Processing -> Speaking -> Listening, with any state
//! able to end the call. Capture and synthesis sit behind the
//! [`SpeechInput`] and [`SpeechOutput`] traits so the session can be driven
//! by a browser bridge, a terminal, or fakes in tests.

pub mod io;
pub mod session;
pub mod state;
pub mod utterance;

pub use io::{InputEvent, SpeechInput, SpeechOutput};
pub use session::{Followup, VoiceSession, CALL_ENDED_MESSAGE};
pub use state::{StateMachine, VoiceSessionState};
pub use utterance::{speakable_text, Utterance};
