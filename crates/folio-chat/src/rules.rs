//! Keyword rule table.
//!
//! A [`RuleTable`] is an ordered list of [`ResponseRule`]s bracketed by a
//! greeting rule (checked first on greeting input or the first turn) and a
//! default reply (always matches). Tables are plain data: the built-in one
//! lives in [`crate::catalog`], others can be loaded from TOML.

use std::collections::HashSet;

use folio_core::config::PersonaConfig;
use folio_core::SideEffect;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

// =============================================================================
// Matchers
// =============================================================================

/// Any-of set of keywords. Matches when at least one keyword is present.
///
/// `phrases` match anywhere in the input; `words` must sit on word
/// boundaries so short tokens like "it" or "ill" do not fire inside
/// "with" or "skills".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherGroup {
    pub phrases: Vec<String>,
    pub words: Vec<String>,
}

impl MatcherGroup {
    /// Group of substring matchers.
    pub fn phrases(phrases: &[&str]) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            words: Vec::new(),
        }
    }

    /// Add whole-word matchers to this group.
    pub fn with_words(mut self, words: &[&str]) -> Self {
        self.words.extend(words.iter().map(|w| w.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.words.is_empty()
    }

    /// Returns whether any keyword hits the already-normalized input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.phrases.iter().any(|p| normalized.contains(p.as_str()))
            || self.words.iter().any(|w| contains_word(normalized, w))
    }

    fn keywords_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.phrases.iter_mut().chain(self.words.iter_mut())
    }
}

/// Substring search that only accepts hits bounded by non-word characters.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// =============================================================================
// Rules
// =============================================================================

/// A (matcher groups, reply, side effect) triple.
///
/// Every group must hit for the rule to match, so a single group is a plain
/// OR and several groups form an AND of ORs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRule {
    pub id: String,
    #[serde(default)]
    pub groups: Vec<MatcherGroup>,
    pub reply: String,
    #[serde(default)]
    pub side_effect: SideEffect,
}

impl ResponseRule {
    /// Rule matching when any of `phrases` is present.
    pub fn any(id: &str, phrases: &[&str], reply: &str) -> Self {
        Self::with_groups(id, vec![MatcherGroup::phrases(phrases)], reply)
    }

    /// Rule matching only when every group hits.
    pub fn with_groups(id: &str, groups: Vec<MatcherGroup>, reply: &str) -> Self {
        Self {
            id: id.to_string(),
            groups,
            reply: reply.to_string(),
            side_effect: SideEffect::None,
        }
    }

    pub fn with_side_effect(mut self, side_effect: SideEffect) -> Self {
        self.side_effect = side_effect;
        self
    }

    /// Returns whether the rule applies to the normalized input.
    ///
    /// A rule without groups never matches; only the default reply is
    /// allowed to be unconditional.
    pub fn matches(&self, normalized: &str) -> bool {
        !self.groups.is_empty() && self.groups.iter().all(|g| g.matches(normalized))
    }
}

// =============================================================================
// RuleTable
// =============================================================================

/// Ordered, validated rule set for one persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Checked ahead of everything on the first turn or on greeting input.
    pub greeting: ResponseRule,
    /// Checked in order; first match wins.
    #[serde(default)]
    pub rules: Vec<ResponseRule>,
    /// Reply used when nothing else matches.
    pub default_reply: String,
}

impl RuleTable {
    /// Parse a rule table from TOML. The result is not yet personalized.
    pub fn from_toml_str(content: &str) -> Result<Self, ChatError> {
        toml::from_str(content).map_err(|e| ChatError::InvalidRules(e.to_string()))
    }

    /// Fill in persona placeholders and lower-case every keyword.
    ///
    /// Replies may use `{assistant}`, `{subject}` and `{short}`; keywords may
    /// use `{short}`.
    pub fn personalize(mut self, persona: &PersonaConfig) -> Self {
        let short_lower = persona.subject_short_name.to_lowercase();
        let fill_reply = |text: &str| {
            text.replace("{assistant}", &persona.assistant_name)
                .replace("{subject}", &persona.subject_name)
                .replace("{short}", &persona.subject_short_name)
        };

        self.default_reply = fill_reply(&self.default_reply);
        for rule in std::iter::once(&mut self.greeting).chain(self.rules.iter_mut()) {
            rule.reply = fill_reply(&rule.reply);
            for group in &mut rule.groups {
                for keyword in group.keywords_mut() {
                    *keyword = keyword.replace("{short}", &short_lower).to_lowercase();
                }
            }
        }
        self
    }

    /// Check the structural guarantees the responder relies on.
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.default_reply.trim().is_empty() {
            return Err(ChatError::InvalidRules(
                "default reply must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for rule in std::iter::once(&self.greeting).chain(self.rules.iter()) {
            if rule.id.trim().is_empty() {
                return Err(ChatError::InvalidRules("rule id must not be empty".to_string()));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(ChatError::InvalidRules(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
            if rule.reply.trim().is_empty() {
                return Err(ChatError::InvalidRules(format!(
                    "rule '{}' has an empty reply",
                    rule.id
                )));
            }
            if rule.groups.is_empty() {
                return Err(ChatError::InvalidRules(format!(
                    "rule '{}' has no matchers",
                    rule.id
                )));
            }
            if rule.groups.iter().any(MatcherGroup::is_empty) {
                return Err(ChatError::InvalidRules(format!(
                    "rule '{}' has an empty matcher group",
                    rule.id
                )));
            }
        }
        Ok(())
    }

    /// Rule ids in precedence order, greeting first.
    pub fn rule_ids(&self) -> Vec<&str> {
        std::iter::once(self.greeting.id.as_str())
            .chain(self.rules.iter().map(|r| r.id.as_str()))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
