//! Appointment side-channel.
//!
//! When a reply opens the appointment form, the UI collects the visitor's
//! details and hands them here. The request is rendered as a plain-text blob
//! and delivered through an [`AppointmentSink`] (clipboard, file). A failing
//! sink degrades to [`Delivery::Inline`] so the visitor can still copy it.

use std::path::PathBuf;

use folio_core::config::{AppointmentConfig, PersonaConfig};
use folio_core::FolioError;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Details entered in the appointment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub purpose: Option<String>,
}

impl AppointmentRequest {
    /// Check that every mandatory field is filled in.
    pub fn validate(&self) -> Result<(), ChatError> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("date", &self.date),
            ("time", &self.time),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ChatError::IncompleteAppointment(*field)),
            None => Ok(()),
        }
    }

    /// Render the request as the text handed to the sink.
    pub fn render(&self, subject_name: &str, default_purpose: &str) -> String {
        let purpose = self
            .purpose
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(default_purpose);

        format!(
            "{} - APPOINTMENT REQUEST\n\
             Date: {} | Time: {}\n\
             Name: {} | Email: {}\n\
             Purpose: {}\n",
            subject_name.to_uppercase(),
            self.date.trim(),
            self.time.trim(),
            self.name.trim(),
            self.email.trim(),
            purpose
        )
    }
}

/// Destination for a rendered appointment request.
pub trait AppointmentSink {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn deliver(&self, text: &str) -> folio_core::Result<()>;
}

/// Writes the request to a text file, standing in for a download.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AppointmentSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn deliver(&self, text: &str) -> folio_core::Result<()> {
        std::fs::write(&self.path, text).map_err(|e| {
            FolioError::Delivery(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        tracing::info!(path = %self.path.display(), "Appointment request written");
        Ok(())
    }
}

/// How the request ended up reaching the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The sink accepted the text.
    Delivered { sink: String, text: String },
    /// The sink failed; show the text inline instead.
    Inline { text: String },
}

impl Delivery {
    pub fn text(&self) -> &str {
        match self {
            Delivery::Delivered { text, .. } | Delivery::Inline { text } => text,
        }
    }
}

/// Validates, renders and delivers appointment requests for one persona.
pub struct AppointmentDesk {
    subject_name: String,
    default_purpose: String,
}

impl AppointmentDesk {
    pub fn new(persona: &PersonaConfig, config: &AppointmentConfig) -> Self {
        Self {
            subject_name: persona.subject_name.clone(),
            default_purpose: config.default_purpose.clone(),
        }
    }

    /// Submit a request. Only validation errors are returned; a failing sink
    /// degrades to inline delivery.
    pub fn submit(
        &self,
        request: &AppointmentRequest,
        sink: &dyn AppointmentSink,
    ) -> Result<Delivery, ChatError> {
        request.validate()?;
        let text = request.render(&self.subject_name, &self.default_purpose);

        match sink.deliver(&text) {
            Ok(()) => Ok(Delivery::Delivered {
                sink: sink.name().to_string(),
                text,
            }),
            Err(e) => {
                tracing::warn!(sink = sink.name(), error = %e, "Appointment delivery failed, showing inline");
                Ok(Delivery::Inline { text })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            date: "2026-11-02".to_string(),
            time: "10:30".to_string(),
            purpose: Some("Network audit".to_string()),
        }
    }

    fn desk() -> AppointmentDesk {
        AppointmentDesk::new(&PersonaConfig::default(), &AppointmentConfig::default())
    }

    struct MemorySink(Mutex<Vec<String>>);

    impl AppointmentSink for MemorySink {
        fn name(&self) -> &str {
            "memory"
        }

        fn deliver(&self, text: &str) -> folio_core::Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    impl AppointmentSink for BrokenSink {
        fn name(&self) -> &str {
            "clipboard"
        }

        fn deliver(&self, _text: &str) -> folio_core::Result<()> {
            Err(FolioError::Delivery("clipboard permission denied".to_string()))
        }
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        assert!(request().validate().is_ok());

        let mut req = request();
        req.email = "  ".to_string();
        req.time.clear();
        assert!(matches!(
            req.validate(),
            Err(ChatError::IncompleteAppointment("email"))
        ));
    }

    #[test]
    fn test_purpose_is_optional() {
        let mut req = request();
        req.purpose = None;
        assert!(req.validate().is_ok());
        assert!(req.render("Isaiah N. Sumo", "General discussion").contains("Purpose: General discussion"));

        req.purpose = Some("   ".to_string());
        assert!(req.render("Isaiah N. Sumo", "General discussion").contains("Purpose: General discussion"));
    }

    #[test]
    fn test_render_contains_all_fields() {
        let text = request().render("Isaiah N. Sumo", "General discussion");
        assert!(text.starts_with("ISAIAH N. SUMO - APPOINTMENT REQUEST"));
        assert!(text.contains("Date: 2026-11-02 | Time: 10:30"));
        assert!(text.contains("Name: Jane Doe | Email: jane@example.com"));
        assert!(text.contains("Purpose: Network audit"));
    }

    #[test]
    fn test_submit_delivers_to_sink() {
        let sink = MemorySink(Mutex::new(Vec::new()));
        let delivery = desk().submit(&request(), &sink).unwrap();
        assert!(matches!(delivery, Delivery::Delivered { ref sink, .. } if sink == "memory"));
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        assert_eq!(sink.0.lock().unwrap()[0], delivery.text());
    }

    #[test]
    fn test_submit_degrades_to_inline_on_sink_failure() {
        let delivery = desk().submit(&request(), &BrokenSink).unwrap();
        match delivery {
            Delivery::Inline { text } => assert!(text.contains("Jane Doe")),
            other => panic!("expected inline delivery, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_rejects_incomplete_request_without_delivering() {
        let sink = MemorySink(Mutex::new(Vec::new()));
        let mut req = request();
        req.name.clear();
        assert!(desk().submit(&req, &sink).is_err());
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_file_sink_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appointment.txt");
        let delivery = desk().submit(&request(), &FileSink::new(&path)).unwrap();
        assert!(matches!(delivery, Delivery::Delivered { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), delivery.text());
    }

    #[test]
    fn test_file_sink_failure_is_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("appointment.txt");
        let delivery = desk().submit(&request(), &FileSink::new(path)).unwrap();
        assert!(matches!(delivery, Delivery::Inline { .. }));
    }
}
