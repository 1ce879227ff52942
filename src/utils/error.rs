use thiserror::Error;

/// Contact form input problems. Both are shown inline and never halt the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingField { field: &'static str },

    #[error("Please enter a valid email address.")]
    InvalidEmail { value: String },
}

#[derive(Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error for key '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Clipboard write failed: {message}")]
    ClipboardError { message: String },

    #[error("Submission failed: {message}")]
    SubmissionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserInput,
    Configuration,
    Environment,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::Validation(_) => ErrorCategory::UserInput,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SiteError::ClipboardError { .. } | SiteError::SubmissionError { .. } => {
                ErrorCategory::Environment
            }
            SiteError::IoError(_)
            | SiteError::SerializationError(_)
            | SiteError::StorageError { .. } => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::Validation(_) | SiteError::ClipboardError { .. } => ErrorSeverity::Low,
            SiteError::SubmissionError { .. } | SiteError::StorageError { .. } => {
                ErrorSeverity::Medium
            }
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            SiteError::IoError(_) | SiteError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::Validation(e) => e.to_string(),
            SiteError::ConfigError { message } => format!("Configuration problem: {}", message),
            SiteError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SiteError::StorageError { key, .. } => {
                format!("Could not access the saved value '{}'", key)
            }
            SiteError::ClipboardError { .. } => "Could not copy to the clipboard".to_string(),
            SiteError::SubmissionError { .. } => {
                "Your message could not be handed to the mail client".to_string()
            }
            SiteError::IoError(e) => format!("File access failed: {}", e),
            SiteError::SerializationError(e) => format!("Data could not be read: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::UserInput => "Check the form fields and try again",
            ErrorCategory::Configuration => "Fix the site configuration file and rerun",
            ErrorCategory::Environment => "Send the email directly from your mail client",
            ErrorCategory::Io => "Check that the storage path exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_inline_warnings() {
        let missing = ValidationError::MissingField { field: "email" };
        assert_eq!(missing.to_string(), "Please fill in all required fields.");

        let invalid = ValidationError::InvalidEmail {
            value: "a@b".to_string(),
        };
        assert_eq!(invalid.to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn test_severity_ordering() {
        let user: SiteError = ValidationError::MissingField { field: "subject" }.into();
        let config = SiteError::ConfigError {
            message: "bad".to_string(),
        };

        assert_eq!(user.category(), ErrorCategory::UserInput);
        assert!(user.severity() < config.severity());
        assert_eq!(config.recovery_suggestion(), "Fix the site configuration file and rerun");
    }
}
