//! Keyword intent responder.
//!
//! Maps raw user text to exactly one canned reply. Resolution is pure: the
//! responder never touches the UI, it only reports a [`SideEffect`] for the
//! caller to act on.

use std::path::Path;

use folio_core::config::PersonaConfig;
use folio_core::{Resolution, SideEffect};

use crate::catalog::portfolio_rules;
use crate::error::ChatError;
use crate::rules::{ResponseRule, RuleTable};

/// Rule id reported when no rule matched.
pub const DEFAULT_RULE_ID: &str = "default";

/// Lower-case and trim raw input the way every matcher expects it.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Stateless keyword responder over a validated [`RuleTable`].
#[derive(Debug, Clone)]
pub struct IntentResponder {
    table: RuleTable,
}

impl IntentResponder {
    /// Wrap an already personalized table, validating it first.
    pub fn new(table: RuleTable) -> Result<Self, ChatError> {
        table.validate()?;
        Ok(Self { table })
    }

    /// Build the responder for a persona.
    ///
    /// Uses the TOML table at `persona.rules_path` when set, the built-in
    /// portfolio table otherwise.
    pub fn for_persona(persona: &PersonaConfig) -> Result<Self, ChatError> {
        let table = match persona.rules_path.as_deref() {
            Some(path) => {
                let content = std::fs::read_to_string(Path::new(path))
                    .map_err(folio_core::FolioError::from)?;
                tracing::info!(path, "Loaded custom rule table");
                RuleTable::from_toml_str(&content)?
            }
            None => portfolio_rules(),
        };
        Self::new(table.personalize(persona))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Resolve one input into a reply.
    ///
    /// `turn_index` starts at 1; the first turn always greets. Callers must
    /// reject empty input before calling this.
    pub fn resolve(&self, text: &str, turn_index: u32) -> Resolution {
        let normalized = normalize(text);
        debug_assert!(!normalized.is_empty(), "resolve called with empty input");

        let rule = if turn_index == 1 || self.table.greeting.matches(&normalized) {
            Some(&self.table.greeting)
        } else {
            self.table.rules.iter().find(|r| r.matches(&normalized))
        };

        let resolution = match rule {
            Some(rule) => from_rule(rule),
            None => Resolution {
                reply: self.table.default_reply.clone(),
                side_effect: SideEffect::None,
                rule_id: DEFAULT_RULE_ID.to_string(),
            },
        };

        tracing::debug!(
            turn = turn_index,
            rule = %resolution.rule_id,
            side_effect = ?resolution.side_effect,
            "Intent resolved"
        );
        resolution
    }
}

fn from_rule(rule: &ResponseRule) -> Resolution {
    Resolution {
        reply: rule.reply.clone(),
        side_effect: rule.side_effect,
        rule_id: rule.id.clone(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn responder() -> IntentResponder {
        IntentResponder::for_persona(&PersonaConfig::default()).unwrap()
    }

    fn rule_for(text: &str) -> String {
        responder().resolve(text, 2).rule_id
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Book Appointment \n"), "book appointment");
    }

    #[test]
    fn test_first_turn_always_greets() {
        let r = responder();
        for text in ["skills", "book appointment", "askjdhasjkd", "who is isaiah"] {
            let res = r.resolve(text, 1);
            assert_eq!(res.rule_id, "greeting", "input {text:?}");
            assert_eq!(res.side_effect, SideEffect::None);
        }
    }

    #[test]
    fn test_greeting_beats_list_order() {
        assert_eq!(rule_for("hi, tell me about his skills"), "greeting");
        assert_eq!(rule_for("Good morning"), "greeting");
        assert_eq!(rule_for("hey"), "greeting");
    }

    #[test]
    fn test_greeting_words_do_not_fire_inside_words() {
        // "this" contains "hi", "they" contains "hey".
        assert_eq!(rule_for("this is about skills"), "skills");
        assert_eq!(rule_for("they said book a meeting"), "appointment");
    }

    #[test]
    fn test_specific_rule_beats_generic_about() {
        assert_eq!(rule_for("when was he born"), "birth");
        assert_eq!(rule_for("tell me about his birth"), "birth");
        assert_eq!(rule_for("tell me about isaiah"), "about");
    }

    #[test]
    fn test_who_conjunction() {
        assert_eq!(rule_for("who is isaiah"), "who_is");
        assert_eq!(rule_for("who are you"), "who_is");
        assert_eq!(rule_for("what is his name and who gave it"), "who_is");
        // "who" alone falls through to the generic rule.
        assert_eq!(rule_for("who knows"), "about");
    }

    #[test]
    fn test_first_school_conjunction() {
        assert_eq!(rule_for("his first school"), "first_school");
        assert_eq!(rule_for("school at 11"), "first_school");
    }

    #[test]
    fn test_short_tokens_only_match_whole_words() {
        assert_eq!(rule_for("skills"), "skills");
        assert_eq!(rule_for("was he ill"), "health");
        assert_eq!(rule_for("is it his degree"), "studies");
        assert_eq!(rule_for("networks"), DEFAULT_RULE_ID);
    }

    #[test]
    fn test_grandfather_is_a_loss_not_family() {
        assert_eq!(rule_for("grandfather"), "losses");
        assert_eq!(rule_for("grandparents"), "family");
    }

    #[test]
    fn test_skills_reply_contains_enumeration() {
        let res = responder().resolve("skills", 2);
        assert!(res.reply.contains("NETWORKING"));
        assert!(res.reply.contains("CYBERSECURITY"));
        assert!(res.reply.contains("WEB DEV"));
        assert_eq!(res.side_effect, SideEffect::None);
    }

    #[test]
    fn test_book_appointment_signals_form() {
        let res = responder().resolve("book appointment", 2);
        assert_eq!(res.rule_id, "appointment");
        assert_eq!(res.side_effect, SideEffect::OpenAppointmentForm);
    }

    #[test]
    fn test_unmatched_input_returns_default() {
        let r = responder();
        let res = r.resolve("askjdhasjkd", 5);
        assert_eq!(res.rule_id, DEFAULT_RULE_ID);
        assert_eq!(res.reply, r.table().default_reply);
        assert!(res.reply.contains("\"skills\""));
    }

    #[test]
    fn test_every_reply_non_empty() {
        let r = responder();
        let inputs = [
            "born", "family", "juice", "dj", "nocal", "faith", "projects", "job", "call me",
            "how are you", "cool", "thanks", "bye", "linkedin", "joke", "xyz", "?", "1999",
        ];
        for (i, text) in inputs.iter().enumerate() {
            let res = r.resolve(text, i as u32 + 2);
            assert!(!res.reply.trim().is_empty(), "empty reply for {text:?}");
        }
    }

    #[test]
    fn test_persona_placeholders_filled() {
        let persona = PersonaConfig {
            assistant_name: "Ada Bot".to_string(),
            subject_name: "Ada Lovelace".to_string(),
            subject_short_name: "Ada".to_string(),
            rules_path: None,
        };
        let r = IntentResponder::for_persona(&persona).unwrap();
        let greeting = r.resolve("anything", 1);
        assert!(greeting.reply.contains("Ada Bot"));
        assert!(greeting.reply.contains("Ada Lovelace"));
        assert!(!greeting.reply.contains('{'));
        assert_eq!(r.resolve("who is ada", 2).rule_id, "who_is");
        assert_eq!(r.resolve("ada", 2).rule_id, "about");
    }

    #[test]
    fn test_custom_rules_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
default_reply = "Nothing here"

[greeting]
id = "greeting"
reply = "Hi from {assistant}"
[[greeting.groups]]
words = ["hi"]

[[rules]]
id = "rust"
reply = "{short} writes Rust"
[[rules.groups]]
phrases = ["rust"]
"#,
        )
        .unwrap();

        let persona = PersonaConfig {
            rules_path: Some(file.path().to_string_lossy().to_string()),
            ..PersonaConfig::default()
        };
        let r = IntentResponder::for_persona(&persona).unwrap();
        assert_eq!(r.resolve("Rust?", 2).reply, "Isaiah writes Rust");
        assert_eq!(r.resolve("golang", 2).reply, "Nothing here");
        assert_eq!(r.resolve("golang", 1).reply, "Hi from Isaiah AI");
    }

    #[test]
    fn test_missing_rules_path_is_config_error() {
        let persona = PersonaConfig {
            rules_path: Some("/nonexistent/rules.toml".to_string()),
            ..PersonaConfig::default()
        };
        let err = IntentResponder::for_persona(&persona).unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn test_new_rejects_invalid_table() {
        let mut table = portfolio_rules();
        table.default_reply.clear();
        assert!(matches!(
            IntentResponder::new(table),
            Err(ChatError::InvalidRules(_))
        ));
    }
}
