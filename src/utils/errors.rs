//! Error handling for the registration controller
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;
use crate::state::validator::ValidationError;

/// Main error type for the registration crate
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Reference dataset error: {0}")]
    Dataset(String),

    #[error("Unknown region: {region_id}")]
    UnknownRegion { region_id: u32 },

    #[error("Unknown district: {district_id}")]
    UnknownDistrict { district_id: u32 },

    #[error("District selector is disabled until a region is selected")]
    DistrictSelectorDisabled,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("No seats left for direction: {direction}")]
    SeatsExhausted { direction: String },

    #[error("Agreement must be accepted before continuing")]
    AgreementRequired,

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Registration already completed")]
    AlreadySubmitted,

    #[error("Operation not available in {mode} mode")]
    NotApplicable { mode: String },

    #[error("Registration transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Registration rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML rendering error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Registration endpoint transport errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    RequestFailed(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    ServiceUnavailable(String),
}

/// Result type alias for registration operations
pub type Result<T> = std::result::Result<T, RegistrationError>;

/// Result type alias for transport operations
pub type TransportResult<T> = std::result::Result<T, TransportError>;

impl RegistrationError {
    /// Check if the error is recoverable by the visitor (form stays editable)
    pub fn is_recoverable(&self) -> bool {
        match self {
            RegistrationError::Config(_) => false,
            RegistrationError::ConfigSource(_) => false,
            RegistrationError::Dataset(_) => false,
            RegistrationError::UnknownRegion { .. } => true,
            RegistrationError::UnknownDistrict { .. } => true,
            RegistrationError::DistrictSelectorDisabled => true,
            RegistrationError::Validation(_) => true,
            RegistrationError::SeatsExhausted { .. } => true,
            RegistrationError::AgreementRequired => true,
            RegistrationError::SubmissionInFlight => true,
            RegistrationError::AlreadySubmitted => true,
            RegistrationError::NotApplicable { .. } => true,
            RegistrationError::Transport(_) => true,
            RegistrationError::Rejected { .. } => true,
            RegistrationError::Http(_) => true,
            RegistrationError::Serialization(_) => false,
            RegistrationError::Toml(_) => false,
            RegistrationError::Io(_) => true,
            RegistrationError::UrlParse(_) => false,
            RegistrationError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegistrationError::Config(_) => ErrorSeverity::Critical,
            RegistrationError::ConfigSource(_) => ErrorSeverity::Critical,
            RegistrationError::Dataset(_) => ErrorSeverity::Critical,
            RegistrationError::Validation(_) => ErrorSeverity::Info,
            RegistrationError::AgreementRequired => ErrorSeverity::Info,
            RegistrationError::InvalidInput(_) => ErrorSeverity::Info,
            RegistrationError::SeatsExhausted { .. } => ErrorSeverity::Warning,
            RegistrationError::SubmissionInFlight => ErrorSeverity::Warning,
            RegistrationError::AlreadySubmitted => ErrorSeverity::Warning,
            RegistrationError::Rejected { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl TransportError {
    /// Classify a reqwest failure, keeping its message for display
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_timeout() {
            TransportError::Timeout(message)
        } else if error.is_connect() {
            TransportError::ServiceUnavailable(message)
        } else {
            TransportError::RequestFailed(message)
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::Role;
    use crate::state::validator::Rule;

    #[test]
    fn test_form_errors_are_recoverable() {
        let errors = vec![
            RegistrationError::Validation(ValidationError::new(Role::Primary, Rule::FirstNameRequired)),
            RegistrationError::SeatsExhausted { direction: "ai".to_string() },
            RegistrationError::Rejected { status: 400, message: "phone taken".to_string() },
            RegistrationError::Transport(TransportError::Timeout("operation timed out".to_string())),
            RegistrationError::AgreementRequired,
        ];

        for error in errors {
            assert!(error.is_recoverable(), "{} should be recoverable", error);
        }
    }

    #[test]
    fn test_startup_errors_are_critical() {
        let error = RegistrationError::Config("missing endpoint".to_string());
        assert!(!error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert_eq!(error.severity().to_string(), "CRITICAL");
    }

    #[test]
    fn test_transport_error_message_is_bare() {
        let error = TransportError::RequestFailed("connection reset".to_string());
        assert_eq!(error.to_string(), "connection reset");

        let error = TransportError::ServiceUnavailable("error sending request: connection refused".to_string());
        assert_eq!(error.to_string(), "error sending request: connection refused");
    }
}
