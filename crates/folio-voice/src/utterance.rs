//! Turning chat replies into something a synthesizer can read.

use std::sync::LazyLock;

use folio_core::config::VoiceConfig;
use regex::Regex;

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#?[a-zA-Z0-9]+);").expect("Invalid entity regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Spoken form of an HTML entity. Unknown entities read as a pause.
fn decode_entity(name: &str) -> &'static str {
    match name {
        "amp" => " and ",
        "quot" => "\"",
        "apos" | "#39" => "'",
        "lt" => "<",
        "gt" => ">",
        _ => " ",
    }
}

/// Strip inline tags, decode common entities, then collapse whitespace.
pub fn speakable_text(text: &str) -> String {
    let untagged = TAGS.replace_all(text, " ");
    let decoded = ENTITY.replace_all(&untagged, |caps: &regex::Captures| decode_entity(&caps[1]));
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// One request to the speech output channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Build an utterance with the configured voice settings.
    ///
    /// Returns `None` when nothing speakable remains after stripping markup.
    pub fn from_reply(reply: &str, config: &VoiceConfig) -> Option<Self> {
        let text = speakable_text(reply);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text,
            language: config.language.clone(),
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_entities() {
        let text = speakable_text("<strong>Skills</strong>&nbsp;and <br/>projects &amp; more");
        assert_eq!(text, "Skills and projects and more");
    }

    #[test]
    fn test_decodes_common_entities() {
        assert_eq!(speakable_text("R&amp;D"), "R and D");
        assert_eq!(speakable_text("it&#39;s &quot;fine&quot;"), "it's \"fine\"");
        assert_eq!(speakable_text("1 &lt; 2 &hellip; done"), "1 < 2 done");
    }

    #[test]
    fn test_collapses_newlines() {
        assert_eq!(speakable_text("  line one\n\n• line two  "), "line one • line two");
    }

    #[test]
    fn test_plain_ampersand_survives() {
        assert_eq!(speakable_text("Networking & System Admin"), "Networking & System Admin");
    }

    #[test]
    fn test_utterance_uses_voice_config() {
        let config = VoiceConfig::default();
        let utt = Utterance::from_reply("Hello <em>there</em>", &config).unwrap();
        assert_eq!(utt.text, "Hello there");
        assert_eq!(utt.language, "en-US");
        assert!((utt.rate - 0.92).abs() < f32::EPSILON);
        assert!((utt.pitch - 1.05).abs() < f32::EPSILON);
        assert!((utt.volume - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_markup_only_reply_is_not_spoken() {
        assert!(Utterance::from_reply("<br/>&nbsp;", &VoiceConfig::default()).is_none());
    }
}
