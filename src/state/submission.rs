//! Submission state machine
//!
//! `Idle -> Submitting -> Done` on success, `Submitting -> Idle` with an
//! error on failure. Rejections before any request keep the phase at `Idle`
//! and only record the message. At most one request is in flight.

use std::fmt;
use serde::Serialize;
use crate::utils::errors::{RegistrationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Done,
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionPhase::Idle => write!(f, "idle"),
            SubmissionPhase::Submitting => write!(f, "submitting"),
            SubmissionPhase::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionState {
    phase: SubmissionPhase,
    error: Option<String>,
    success_message: Option<String>,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            error: None,
            success_message: None,
        }
    }
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Submit control is disabled while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn is_done(&self) -> bool {
        self.phase == SubmissionPhase::Done
    }

    /// Idle with an error recorded
    pub fn has_failed(&self) -> bool {
        self.phase == SubmissionPhase::Idle && self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Check that a new submission may start, without changing state
    pub fn ensure_ready(&self) -> Result<()> {
        match self.phase {
            SubmissionPhase::Idle => Ok(()),
            SubmissionPhase::Submitting => Err(RegistrationError::SubmissionInFlight),
            SubmissionPhase::Done => Err(RegistrationError::AlreadySubmitted),
        }
    }

    /// Enter `Submitting`, clearing the previous error
    pub fn begin(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.phase = SubmissionPhase::Submitting;
        self.error = None;
        Ok(())
    }

    /// Record a rejection made before any request; the phase is unchanged
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Request succeeded
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.phase = SubmissionPhase::Done;
        self.error = None;
        self.success_message = Some(message.into());
    }

    /// Request failed; the form becomes editable again
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = SubmissionPhase::Idle;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
