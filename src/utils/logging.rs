//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the registration controller.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{RegistrationError, Result};

/// Initialize logging based on configuration.
///
/// Log lines go to stderr so stdout stays free for the terminal host. When a
/// file directory is configured a daily rolling file is written as well; the
/// returned guard must be kept alive for the file writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| RegistrationError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let stderr_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "aiday-register.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_ansi(false).with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| RegistrationError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a controller mount for a resolved direction
pub fn log_form_mounted(direction: &str, mode: &str, seats_left: u32) {
    info!(
        direction = direction,
        mode = mode,
        seats_left = seats_left,
        "Registration form mounted"
    );
}

/// Log a submission attempt that passed every guard
pub fn log_submission_attempt(direction: &str, mode: &str, team: bool) {
    info!(
        direction = direction,
        mode = mode,
        team = team,
        "Submitting registration"
    );
}

/// Log a submission that was stopped before any network call
pub fn log_submission_rejected(direction: &str, reason: &str) {
    debug!(
        direction = direction,
        reason = reason,
        "Registration rejected before submission"
    );
}

/// Log the raw registration response
pub fn log_registration_response(status: u16, body: &str) {
    if (200..300).contains(&status) {
        info!(status = status, body = body, "Registration response received");
    } else {
        warn!(status = status, body = body, "Registration response is not a success");
    }
}

/// Log the final outcome of a submission
pub fn log_submission_outcome(direction: &str, success: bool, seats_left: u32, message: &str) {
    if success {
        info!(
            direction = direction,
            seats_left = seats_left,
            message = message,
            "Registration completed"
        );
    } else {
        warn!(
            direction = direction,
            seats_left = seats_left,
            message = message,
            "Registration failed"
        );
    }
}

/// Log a transport-level failure
pub fn log_transport_error(endpoint: &str, error: &str) {
    error!(
        endpoint = endpoint,
        error = error,
        "Registration request failed"
    );
}

/// Log a cascade selection
pub fn log_cascade_selection(role: &str, level: &str, id: u32, name: &str) {
    debug!(
        role = role,
        level = level,
        id = id,
        name = name,
        "Cascade selection changed"
    );
}
