use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;

/// Top-level configuration for the Folio assistant.
///
/// Loaded from `~/.folio/config.toml` by default. Every section falls back to
/// its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub appointment: AppointmentConfig,
}

impl FolioConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FolioConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Who the assistant speaks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Name the assistant introduces itself with.
    pub assistant_name: String,
    /// Full name of the portfolio owner.
    pub subject_name: String,
    /// Short name used in replies and as a keyword.
    pub subject_short_name: String,
    /// Optional TOML rule table replacing the built-in one.
    pub rules_path: Option<String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Isaiah AI".to_string(),
            subject_name: "Isaiah N. Sumo".to_string(),
            subject_short_name: "Isaiah".to_string(),
            rules_path: None,
        }
    }
}

/// Chat turn handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Pause before a reply is produced, in milliseconds.
    pub thinking_delay_ms: u64,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Voice transcripts shorter than this are ignored.
    pub min_transcript_chars: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 1200,
            max_message_length: 2000,
            min_transcript_chars: 3,
        }
    }
}

impl ConversationConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

/// Speech capture and synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Whether voice calls may be started at all.
    pub enabled: bool,
    /// Read replies aloud while on a call.
    pub speak_replies: bool,
    /// BCP 47 language tag for capture and synthesis.
    pub language: String,
    /// Delay before capture restarts after the user stops talking.
    pub speech_end_restart_ms: u64,
    /// Delay before capture restarts after an input-stream error.
    pub error_restart_ms: u64,
    /// Speech rate multiplier.
    pub rate: f32,
    /// Speech pitch multiplier.
    pub pitch: f32,
    /// Output volume (0.0 to 1.0).
    pub volume: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speak_replies: true,
            language: "en-US".to_string(),
            speech_end_restart_ms: 600,
            error_restart_ms: 800,
            rate: 0.92,
            pitch: 1.05,
            volume: 0.9,
        }
    }
}

impl VoiceConfig {
    pub fn speech_end_restart(&self) -> Duration {
        Duration::from_millis(self.speech_end_restart_ms)
    }

    pub fn error_restart(&self) -> Duration {
        Duration::from_millis(self.error_restart_ms)
    }
}

/// Appointment side-channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentConfig {
    /// File the rendered appointment request is written to.
    pub output_path: String,
    /// Purpose used when the visitor leaves it blank.
    pub default_purpose: String,
}

impl Default for AppointmentConfig {
    fn default() -> Self {
        Self {
            output_path: "appointment.txt".to_string(),
            default_purpose: "General discussion".to_string(),
        }
    }
}
