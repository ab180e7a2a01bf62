//! Form state management
//!
//! Region/district cascades, validation, the submission state machine and
//! the controller that ties them together.

pub mod cascade;
pub mod controller;
pub mod submission;
pub mod validator;

pub use cascade::RegionCascade;
pub use controller::{
    FormContext, FormEvent, FormView, ParticipantView, RegistrationController, SubmitStep, UiCommand,
};
pub use submission::{SubmissionPhase, SubmissionState};
pub use validator::{is_valid_email, validate_form, validate_person, Rule, ValidationError};
