//! Interactive terminal session
//!
//! Keeps the visited routes and the mounted form, turns host commands into
//! controller calls and controller commands into output lines.

use std::sync::Arc;
use tracing::{debug, info};
use crate::handlers::commands::{help::help_text, HostCommand};
use crate::handlers::render::{
    describe_error, render_command, render_districts, render_form, render_landing, render_regions,
};
use crate::handlers::routes::Route;
use crate::state::controller::{FormContext, RegistrationController, UiCommand};
use crate::utils::errors::RegistrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Output of one handled line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub flow: Flow,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, flow: Flow::Continue }
    }
}

pub struct Session {
    context: Arc<FormContext>,
    language: String,
    history: Vec<String>,
    form: Option<RegistrationController>,
}

impl Session {
    pub fn new(context: Arc<FormContext>, language: impl Into<String>) -> Self {
        Self {
            context,
            language: language.into(),
            history: Vec::new(),
            form: None,
        }
    }

    pub fn form(&self) -> Option<&RegistrationController> {
        self.form.as_ref()
    }

    /// Navigate to a path and render it
    pub fn open(&mut self, path: &str) -> Vec<String> {
        self.history.push(path.to_string());
        self.mount(path)
    }

    fn mount(&mut self, path: &str) -> Vec<String> {
        let i18n = Arc::clone(&self.context.i18n);
        let route = Route::from_path(path);
        match route {
            Route::Landing => {
                self.form = None;
                vec![render_landing(self.context.catalog.as_ref(), &i18n, &self.language)]
            }
            Route::Register(_) => {
                info!(path = path, token = ?route.token(), "Opening registration page");
                let controller = RegistrationController::mount(Arc::clone(&self.context), route.token(), &self.language);
                let mut lines = vec![render_form(&controller.view(), &i18n, &self.language)];
                let mount_commands = controller.on_mount();
                self.form = Some(controller);
                lines.extend(self.perform(mount_commands));
                lines
            }
        }
    }

    /// Handle one parsed command
    pub async fn handle(&mut self, command: HostCommand) -> Reply {
        let i18n = Arc::clone(&self.context.i18n);
        let lang = self.language.clone();
        debug!(command = ?command, "Handling host command");

        match command {
            HostCommand::Quit => Reply { lines: vec![i18n.t("host.bye", &lang, None)], flow: Flow::Quit },
            HostCommand::Help => Reply::lines(vec![help_text(&i18n, &lang)]),
            HostCommand::Open(path) => Reply::lines(self.open(&path)),
            HostCommand::Regions => Reply::lines(vec![render_regions(self.context.reference.regions(), &lang)]),
            HostCommand::Districts(role) => match &self.form {
                Some(form) => Reply::lines(vec![render_districts(form.district_options(role), &i18n, &lang)]),
                None => Reply::lines(vec![i18n.t("host.no_form_open", &lang, None)]),
            },
            HostCommand::Submit => {
                let Some(form) = self.form.as_mut() else {
                    return Reply::lines(vec![i18n.t("host.no_form_open", &lang, None)]);
                };
                let result = form.submit().await;
                self.finish(result)
            }
            // Back and home work from the landing page too
            HostCommand::Back if self.form.is_none() => Reply::lines(self.perform(vec![UiCommand::NavigateBack])),
            HostCommand::Home if self.form.is_none() => Reply::lines(self.perform(vec![UiCommand::NavigateHome])),
            other => {
                let Some(event) = other.into_event() else {
                    return Reply::lines(Vec::new());
                };
                let Some(form) = self.form.as_mut() else {
                    return Reply::lines(vec![i18n.t("host.no_form_open", &lang, None)]);
                };
                let result = form.apply(event);
                self.finish(result)
            }
        }
    }

    /// Parse and handle one input line
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        if line.trim().is_empty() {
            return Reply::lines(Vec::new());
        }
        match line.parse::<HostCommand>() {
            Ok(command) => self.handle(command).await,
            Err(error) => Reply::lines(vec![describe_error(&error, &self.context.i18n, &self.language)]),
        }
    }

    fn finish(&mut self, result: Result<Vec<UiCommand>, RegistrationError>) -> Reply {
        let mut lines = match result {
            Ok(commands) => self.perform(commands),
            Err(error) if !error.is_recoverable() => {
                return Reply {
                    lines: vec![describe_error(&error, &self.context.i18n, &self.language)],
                    flow: Flow::Quit,
                };
            }
            Err(error) => vec![describe_error(&error, &self.context.i18n, &self.language)],
        };
        if let Some(form) = &self.form {
            lines.push(render_form(&form.view(), &self.context.i18n, &self.language));
        }
        Reply::lines(lines)
    }

    /// Execute UI commands, navigation included
    fn perform(&mut self, commands: Vec<UiCommand>) -> Vec<String> {
        let i18n = Arc::clone(&self.context.i18n);
        let mut lines = Vec::new();

        for command in commands {
            match command {
                UiCommand::NavigateBack => {
                    self.history.pop();
                    let previous = self.history.last().cloned().unwrap_or_else(|| "/".to_string());
                    lines.extend(self.mount(&previous));
                }
                UiCommand::NavigateHome => {
                    lines.extend(self.open("/"));
                }
                other => lines.extend(render_command(&other, &i18n, &self.language)),
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::config::Settings;
    use crate::i18n::I18n;
    use crate::models::payload::RegistrationPayload;
    use crate::services::catalog::StaticCatalog;
    use crate::services::reference::ReferenceData;
    use crate::services::registration::{RegistrationTransport, TransportResponse};
    use crate::utils::errors::TransportResult;

    struct Accepting;

    #[async_trait]
    impl RegistrationTransport for Accepting {
        async fn post_registration(&self, _payload: &RegistrationPayload) -> TransportResult<TransportResponse> {
            Ok(TransportResponse::new(200, r#"{"message": "Qabul qilindi"}"#))
        }
    }

    fn session() -> Session {
        let settings = Settings::default();
        let context = FormContext::new(
            &settings,
            Arc::new(StaticCatalog::builtin().unwrap()),
            Arc::new(ReferenceData::builtin().unwrap()),
            Arc::new(Accepting),
            Arc::new(I18n::embedded(&settings.i18n).unwrap()),
        );
        Session::new(Arc::new(context), "uz")
    }

    #[tokio::test]
    async fn test_open_focuses_first_name() {
        let mut session = session();
        let reply = session.handle_line("open /register/ai").await;
        assert!(reply.lines.iter().any(|line| line == "> Ism"));
        assert_eq!(session.form().map(|form| form.direction().as_str()), Some("ai"));
    }

    #[tokio::test]
    async fn test_route_token_is_resolved_on_open() {
        let mut session = session();
        session.handle_line("open /events/RoboFutbol").await;
        assert_eq!(session.form().map(|form| form.direction().as_str()), Some("rfutbol"));

        session.handle_line("open /register/").await;
        assert_eq!(session.form().map(|form| form.direction().as_str()), Some("ai"));
    }

    #[tokio::test]
    async fn test_back_returns_to_previous_page() {
        let mut session = session();
        session.handle_line("open /").await;
        session.handle_line("open /register/rsumo").await;

        session.handle_line("back").await;
        assert!(session.form().is_none());
    }

    #[tokio::test]
    async fn test_full_registration() {
        let mut session = session();
        session.handle_line("open /register/ai").await;
        for line in [
            "set first_name Malika",
            "set phone +998935551122",
            "set email malika@example.uz",
            "region 14",
            "district 46",
        ] {
            session.handle_line(line).await;
        }

        let reply = session.handle_line("submit").await;
        assert!(reply.lines.iter().any(|line| line == "[!] Qabul qilindi"));
        assert_eq!(session.form().map(|form| form.seats_left()), Some(59));
    }

    #[tokio::test]
    async fn test_quit() {
        let mut session = session();
        assert_eq!(session.handle_line("quit").await.flow, Flow::Quit);
    }
}
