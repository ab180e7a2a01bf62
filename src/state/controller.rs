//! Registration form controller
//!
//! One controller per mounted registration page. It owns the form state
//! (participants, cascades, seat counter, submission phase) and talks to the
//! presentation host only through [`FormEvent`] inputs and [`UiCommand`]
//! outputs.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::config::{NoFormConfig, Settings, SocialLink};
use crate::i18n::I18n;
use crate::models::catalog::CatalogEntry;
use crate::models::direction::{DirectionKey, FormMode, SeatCapacities};
use crate::models::payload::RegistrationPayload;
use crate::models::person::{FieldUpdate, Person, Role};
use crate::models::region::District;
use crate::services::catalog::{lookup_entry, CatalogProvider, StaticCatalog};
use crate::services::reference::ReferenceData;
use crate::services::registration::{
    HttpRegistrationClient, RegistrationTransport, ResponseBody, TransportResponse,
};
use crate::state::cascade::RegionCascade;
use crate::state::submission::{SubmissionPhase, SubmissionState};
use crate::state::validator::validate_form;
use crate::utils::errors::{RegistrationError, Result, TransportResult};
use crate::utils::logging::{
    log_form_mounted, log_submission_attempt, log_submission_outcome, log_submission_rejected,
};

/// Side effects the host performs on the controller's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    NavigateBack,
    NavigateHome,
    Navigate(String),
    ShowAlert(String),
    FocusFirstName,
}

/// User interactions with the mounted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edit { role: Role, update: FieldUpdate },
    SelectRegion { role: Role, region_id: Option<u32> },
    SelectDistrict { role: Role, district_id: u32 },
    SetDirection(String),
    SetAgreement(bool),
    /// Escape key or the cancel button
    Cancel,
    /// Home button of the success view
    GoHome,
}

/// Result of the synchronous half of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// Every guard passed; post this payload and hand the result to
    /// [`RegistrationController::complete_submit`]
    Send(RegistrationPayload),
    /// Nothing to send (no-form directions)
    Finished(Vec<UiCommand>),
}

/// Read-only collaborators shared by every mounted form
pub struct FormContext {
    pub catalog: Arc<dyn CatalogProvider>,
    pub reference: Arc<ReferenceData>,
    pub transport: Arc<dyn RegistrationTransport>,
    pub i18n: Arc<I18n>,
    pub seats: SeatCapacities,
    pub no_form: NoFormConfig,
}

impl FormContext {
    pub fn new(
        settings: &Settings,
        catalog: Arc<dyn CatalogProvider>,
        reference: Arc<ReferenceData>,
        transport: Arc<dyn RegistrationTransport>,
        i18n: Arc<I18n>,
    ) -> Self {
        Self {
            catalog,
            reference,
            transport,
            i18n,
            seats: SeatCapacities::from_config(&settings.seats),
            no_form: settings.no_form.clone(),
        }
    }

    /// Load every collaborator named in the settings
    pub async fn load(settings: &Settings) -> Result<Self> {
        let reference = ReferenceData::from_config(&settings.datasets).await?;
        let catalog_path = settings.datasets.catalog_path.as_deref().map(Path::new);
        let catalog = StaticCatalog::load(catalog_path).await?;
        let i18n = I18n::load(&settings.i18n).await?;
        let transport = HttpRegistrationClient::new(&settings.registration)?;

        Ok(Self::new(
            settings,
            Arc::new(catalog),
            Arc::new(reference),
            Arc::new(transport),
            Arc::new(i18n),
        ))
    }
}

/// One participant section as the host should show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    pub role: Role,
    pub person: Person,
    pub region_id: Option<u32>,
    pub district_id: Option<u32>,
    pub district_enabled: bool,
    pub district_options: Vec<District>,
}

/// Snapshot of everything the host renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub direction: DirectionKey,
    pub mode: FormMode,
    pub entry: CatalogEntry,
    pub seats_left: u32,
    pub participants: Vec<ParticipantView>,
    pub direction_input: String,
    pub agreed: bool,
    pub social_links: Vec<SocialLink>,
    pub phase: SubmissionPhase,
    pub submit_enabled: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
}

pub struct RegistrationController {
    context: Arc<FormContext>,
    language: String,
    direction: DirectionKey,
    mode: FormMode,
    entry: CatalogEntry,
    seats_left: u32,
    primary: Person,
    partner: Person,
    primary_cascade: RegionCascade,
    partner_cascade: RegionCascade,
    direction_input: String,
    agreed: bool,
    submission: SubmissionState,
}

impl RegistrationController {
    /// Mount the form for a raw route token
    pub fn mount(context: Arc<FormContext>, route_token: Option<&str>, language: &str) -> Self {
        let direction = DirectionKey::resolve(route_token);
        let mode = direction.mode();
        let entry = lookup_entry(context.catalog.as_ref(), &direction);
        let seats_left = context.seats.capacity_for(&direction);

        log_form_mounted(direction.as_str(), &mode.to_string(), seats_left);

        Self {
            language: language.to_string(),
            direction_input: direction.as_str().to_string(),
            primary_cascade: RegionCascade::new(Role::Primary, language),
            partner_cascade: RegionCascade::new(Role::Partner, language),
            primary: Person::default(),
            partner: Person::default(),
            agreed: false,
            submission: SubmissionState::new(),
            context,
            direction,
            mode,
            entry,
            seats_left,
        }
    }

    /// Commands to run once the form is on screen
    pub fn on_mount(&self) -> Vec<UiCommand> {
        if self.mode.has_form() {
            vec![UiCommand::FocusFirstName]
        } else {
            Vec::new()
        }
    }

    pub fn direction(&self) -> &DirectionKey {
        &self.direction
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn seats_left(&self) -> u32 {
        self.seats_left
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn person(&self, role: Role) -> &Person {
        match role {
            Role::Primary => &self.primary,
            Role::Partner => &self.partner,
        }
    }

    /// Offered districts of one participant section
    pub fn district_options(&self, role: Role) -> &[District] {
        match role {
            Role::Primary => self.primary_cascade.district_options(),
            Role::Partner => self.partner_cascade.district_options(),
        }
    }

    /// Handle one interaction
    pub fn apply(&mut self, event: FormEvent) -> Result<Vec<UiCommand>> {
        match event {
            FormEvent::Cancel => return Ok(vec![UiCommand::NavigateBack]),
            FormEvent::GoHome => return Ok(vec![UiCommand::NavigateHome]),
            FormEvent::Edit { role, update } => {
                self.ensure_editable(role)?;
                self.person_mut(role).apply(update);
            }
            FormEvent::SelectRegion { role, region_id } => {
                self.ensure_editable(role)?;
                let reference = Arc::clone(&self.context.reference);
                let (cascade, person) = self.section_mut(role);
                cascade.select_region(&reference, person, region_id)?;
            }
            FormEvent::SelectDistrict { role, district_id } => {
                self.ensure_editable(role)?;
                let (cascade, person) = self.section_mut(role);
                cascade.select_district(person, district_id)?;
            }
            FormEvent::SetDirection(text) => {
                self.ensure_editable(Role::Primary)?;
                self.direction_input = text;
            }
            FormEvent::SetAgreement(agreed) => {
                if self.mode != FormMode::NoForm {
                    return Err(self.not_applicable());
                }
                self.agreed = agreed;
            }
        }
        Ok(Vec::new())
    }

    /// Run every guard and, when they pass, enter `Submitting`.
    ///
    /// Rejections are recorded as the form error and returned; the phase
    /// stays `Idle` and no request is made.
    pub fn begin_submit(&mut self) -> Result<SubmitStep> {
        self.submission.ensure_ready()?;
        self.submission.clear_error();

        if self.mode == FormMode::NoForm {
            if !self.agreed {
                return Err(self.reject(RegistrationError::AgreementRequired, "errors.agreement_required"));
            }
            debug!(direction = %self.direction, "Agreement accepted, redirecting");
            return Ok(SubmitStep::Finished(vec![UiCommand::Navigate(
                self.context.no_form.redirect_url.clone(),
            )]));
        }

        let partner = self.mode.is_team().then_some(&self.partner);
        if let Err(error) = validate_form(&self.primary, partner) {
            let key = error.message_key();
            return Err(self.reject(RegistrationError::Validation(error), &key));
        }

        if self.seats_left == 0 {
            let direction = self.direction.to_string();
            return Err(self.reject(RegistrationError::SeatsExhausted { direction }, "errors.seats_exhausted"));
        }

        self.submission.begin()?;
        let payload = RegistrationPayload::build(&self.primary, partner, &self.direction_input, &self.direction);
        log_submission_attempt(payload.direction.as_str(), &self.mode.to_string(), payload.is_team());

        Ok(SubmitStep::Send(payload))
    }

    /// Apply the transport result of the request started by
    /// [`begin_submit`](Self::begin_submit)
    pub fn complete_submit(&mut self, result: TransportResult<TransportResponse>) -> Vec<UiCommand> {
        if !self.submission.is_busy() {
            warn!(phase = %self.submission.phase(), "Ignoring response without a submission in flight");
            return Vec::new();
        }

        let i18n = Arc::clone(&self.context.i18n);
        let lang = self.language.clone();

        match result {
            Ok(response) if response.is_success() => {
                self.seats_left = self.seats_left.saturating_sub(1);
                let message = ResponseBody::parse(&response.body)
                    .success_note()
                    .unwrap_or_else(|| i18n.t("success.default", &lang, None));

                log_submission_outcome(self.direction.as_str(), true, self.seats_left, &message);
                self.submission.succeed(message.clone());
                vec![UiCommand::ShowAlert(message)]
            }
            Ok(response) => {
                let message = ResponseBody::parse(&response.body)
                    .error_note()
                    .unwrap_or_else(|| i18n.t_with("errors.server_status", &lang, "status", response.status));

                let error = RegistrationError::Rejected { status: response.status, message: message.clone() };
                self.record_failure(&error, message.clone());
                vec![UiCommand::ShowAlert(i18n.t_with("alerts.server_error", &lang, "message", message))]
            }
            Err(transport_error) => {
                let raw = transport_error.to_string();
                let message = if raw.is_empty() { i18n.t("errors.network_default", &lang, None) } else { raw.clone() };
                let alert_text = if raw.is_empty() { "Unknown".to_string() } else { raw };

                self.record_failure(&RegistrationError::Transport(transport_error), message);
                vec![UiCommand::ShowAlert(i18n.t_with("alerts.network_error", &lang, "message", alert_text))]
            }
        }
    }

    /// Submit and await the endpoint
    pub async fn submit(&mut self) -> Result<Vec<UiCommand>> {
        match self.begin_submit()? {
            SubmitStep::Finished(commands) => Ok(commands),
            SubmitStep::Send(payload) => {
                let transport = Arc::clone(&self.context.transport);
                let result = transport.post_registration(&payload).await;
                Ok(self.complete_submit(result))
            }
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> FormView {
        let mut participants = Vec::new();
        if self.mode.has_form() {
            participants.push(self.participant_view(Role::Primary));
            if self.mode.is_team() {
                participants.push(self.participant_view(Role::Partner));
            }
        }

        let social_links = match self.mode {
            FormMode::NoForm => self.context.no_form.social_links.clone(),
            _ => Vec::new(),
        };

        FormView {
            direction: self.direction.clone(),
            mode: self.mode,
            entry: self.entry.clone(),
            seats_left: self.seats_left,
            participants,
            direction_input: self.direction_input.clone(),
            agreed: self.agreed,
            social_links,
            phase: self.submission.phase(),
            submit_enabled: self.submission.phase() == SubmissionPhase::Idle,
            error: self.submission.error().map(str::to_string),
            success_message: self.submission.success_message().map(str::to_string),
        }
    }

    fn participant_view(&self, role: Role) -> ParticipantView {
        let (cascade, person) = match role {
            Role::Primary => (&self.primary_cascade, &self.primary),
            Role::Partner => (&self.partner_cascade, &self.partner),
        };
        ParticipantView {
            role,
            person: person.clone(),
            region_id: cascade.selected_region(),
            district_id: cascade.selected_district_id(person),
            district_enabled: cascade.district_enabled(),
            district_options: cascade.district_options().to_vec(),
        }
    }

    fn ensure_editable(&self, role: Role) -> Result<()> {
        if !self.mode.has_form() || (role == Role::Partner && !self.mode.is_team()) {
            return Err(self.not_applicable());
        }
        if self.submission.is_done() {
            return Err(RegistrationError::AlreadySubmitted);
        }
        Ok(())
    }

    fn not_applicable(&self) -> RegistrationError {
        RegistrationError::NotApplicable { mode: self.mode.to_string() }
    }

    fn reject(&mut self, error: RegistrationError, message_key: &str) -> RegistrationError {
        let message = self.context.i18n.t(message_key, &self.language, None);
        log_submission_rejected(self.direction.as_str(), &error.to_string());
        self.submission.reject(message);
        error
    }

    fn record_failure(&mut self, error: &RegistrationError, message: String) {
        warn!(severity = %error.severity(), error = %error, "Registration submission failed");
        log_submission_outcome(self.direction.as_str(), false, self.seats_left, &message);
        self.submission.fail(message);
    }

    fn person_mut(&mut self, role: Role) -> &mut Person {
        match role {
            Role::Primary => &mut self.primary,
            Role::Partner => &mut self.partner,
        }
    }

    fn section_mut(&mut self, role: Role) -> (&mut RegionCascade, &mut Person) {
        match role {
            Role::Primary => (&mut self.primary_cascade, &mut self.primary),
            Role::Partner => (&mut self.partner_cascade, &mut self.partner),
        }
    }
}
