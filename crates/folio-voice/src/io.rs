//! Speech collaborator boundaries.

use crate::utterance::Utterance;

/// Event raised by the capture side while a call is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Capture is running and hearing audio.
    Started,
    /// A finished transcript for one spoken phrase.
    FinalResult(String),
    /// The speaker stopped talking; capture has shut itself off.
    SpeechEnded,
    /// The capture stream failed.
    Error(String),
}

/// Speech recognition source.
pub trait SpeechInput: Send {
    /// Whether this platform can capture speech at all.
    fn is_available(&self) -> bool;

    /// Begin (or resume) capture. Calling it while already capturing is harmless.
    fn start(&mut self) -> folio_core::Result<()>;

    fn stop(&mut self);
}

/// Speech synthesis sink. Completion is reported back to the call driver
/// out of band, so `speak` must not block until playback ends.
pub trait SpeechOutput: Send {
    fn speak(&mut self, utterance: &Utterance);

    /// Drop the current utterance immediately.
    fn cancel(&mut self);
}
