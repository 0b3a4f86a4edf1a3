//! Error types and handling for `Powderday`

use thiserror::Error;

/// Main error type for the `Powderday` library
///
/// The aggregation and resolution engines never fail on bad upstream data;
/// these variants only surface at the boundaries (configuration, payload
/// shape, time zone names, file access).
#[derive(Error, Debug)]
pub enum PowderdayError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Top-level provider payload has the wrong shape
    #[error("Payload error: {message}")]
    Payload { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON decoding errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl PowderdayError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new payload error
    pub fn payload<S: Into<String>>(message: S) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PowderdayError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PowderdayError::Validation { message } => format!("Invalid input: {message}"),
            PowderdayError::Payload { .. } => {
                "The provider response could not be understood.".to_string()
            }
            PowderdayError::Io { .. } => {
                "File operation failed. Please check the path and permissions.".to_string()
            }
            PowderdayError::Json { .. } => "Input file is not valid JSON.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = PowderdayError::config("bad ratio");
        assert!(matches!(config_err, PowderdayError::Config { .. }));

        let validation_err = PowderdayError::validation("unknown time zone");
        assert!(matches!(validation_err, PowderdayError::Validation { .. }));

        let payload_err = PowderdayError::payload("missing features");
        assert!(matches!(payload_err, PowderdayError::Payload { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = PowderdayError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = PowderdayError::validation("Mars/Olympus");
        assert!(validation_err.user_message().contains("Mars/Olympus"));

        let payload_err = PowderdayError::payload("test");
        assert!(payload_err.user_message().contains("provider response"));
    }

    #[test]
    fn test_io_and_json_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PowderdayError = io_err.into();
        assert!(matches!(err, PowderdayError::Io { .. }));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PowderdayError = json_err.into();
        assert!(matches!(err, PowderdayError::Json { .. }));
    }
}
