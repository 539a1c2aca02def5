//! Error types for the conversational layer.

use folio_core::error::FolioError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("a reply is already being prepared")]
    Busy,
    #[error("invalid rule table: {0}")]
    InvalidRules(String),
    #[error("appointment is missing the {0} field")]
    IncompleteAppointment(&'static str),
    #[error("config error: {0}")]
    Config(String),
}

impl From<FolioError> for ChatError {
    fn from(err: FolioError) -> Self {
        ChatError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::Busy.to_string(),
            "a reply is already being prepared"
        );
        assert_eq!(
            ChatError::InvalidRules("duplicate rule id 'x'".to_string()).to_string(),
            "invalid rule table: duplicate rule id 'x'"
        );
        assert_eq!(
            ChatError::IncompleteAppointment("email").to_string(),
            "appointment is missing the email field"
        );
    }

    #[test]
    fn test_chat_error_from_folio_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "rules.toml");
        let chat_err: ChatError = FolioError::from(io_err).into();
        assert!(matches!(chat_err, ChatError::Config(_)));
        assert!(chat_err.to_string().contains("rules.toml"));
    }
}
