//! Registration endpoint client
//!
//! The endpoint is an opaque HTTP collaborator: one JSON `POST` per
//! registration, any 2xx counts as success. Response bodies are read as
//! text first and parsed as JSON only when possible, so a malformed body
//! still yields a readable message.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use crate::config::RegistrationConfig;
use crate::models::payload::RegistrationPayload;
use crate::utils::errors::{RegistrationError, Result, TransportError, TransportResult};
use crate::utils::logging::{log_registration_response, log_transport_error};

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends registration payloads
#[async_trait]
pub trait RegistrationTransport: Send + Sync {
    /// Post one payload. Transport failures are errors; every HTTP status,
    /// including non-2xx, is a response.
    async fn post_registration(&self, payload: &RegistrationPayload) -> TransportResult<TransportResponse>;
}

/// reqwest-based transport
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    endpoint: String,
}

impl HttpRegistrationClient {
    pub fn new(config: &RegistrationConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(RegistrationError::Http)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationTransport for HttpRegistrationClient {
    async fn post_registration(&self, payload: &RegistrationPayload) -> TransportResult<TransportResponse> {
        debug!(endpoint = %self.endpoint, payload = ?payload, "Posting registration payload");

        let response = self.client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let error = TransportError::from_reqwest(&e);
                log_transport_error(&self.endpoint, &error.to_string());
                error
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        log_registration_response(status, &body);

        Ok(TransportResponse { status, body })
    }
}

/// Response body after an optional JSON parse
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    /// Body that is not valid JSON
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    /// First present, non-blank field among `keys` of a JSON object body
    fn first_field(&self, keys: &[&str]) -> Option<&Value> {
        match self {
            ResponseBody::Json(Value::Object(map)) => keys
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|value| is_truthy(value)),
            _ => None,
        }
    }

    /// Server note for a failed request: `detail`, `message` or `errors`,
    /// structured values rendered as JSON; a non-JSON body is used verbatim
    pub fn error_note(&self) -> Option<String> {
        match self.first_field(&["detail", "message", "errors"]) {
            Some(value) => Some(value_text(value)),
            None => match self {
                ResponseBody::Text(text) => Some(text.clone()),
                ResponseBody::Json(Value::String(text)) if !text.is_empty() => Some(text.clone()),
                _ => None,
            },
        }
    }

    /// Server note for a successful request: `message` or `detail`
    pub fn success_note(&self) -> Option<String> {
        self.first_field(&["message", "detail"]).map(value_text)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_note_priority() {
        let body = ResponseBody::parse(r#"{"message": "bad", "detail": "phone taken"}"#);
        assert_eq!(body.error_note().as_deref(), Some("phone taken"));

        let body = ResponseBody::parse(r#"{"detail": "", "message": "bad request"}"#);
        assert_eq!(body.error_note().as_deref(), Some("bad request"));
    }

    #[test]
    fn test_structured_errors_are_serialized() {
        let body = ResponseBody::parse(r#"{"errors": {"email": ["taken"]}}"#);
        let note = body.error_note().unwrap();
        let reparsed: Value = serde_json::from_str(&note).unwrap();
        assert_eq!(reparsed, json!({"email": ["taken"]}));
    }

    #[test]
    fn test_malformed_body_degrades_to_text() {
        let body = ResponseBody::parse("<html>Bad Gateway</html>");
        assert_eq!(body, ResponseBody::Text("<html>Bad Gateway</html>".to_string()));
        assert_eq!(body.error_note().as_deref(), Some("<html>Bad Gateway</html>"));
        assert!(body.success_note().is_none());
    }

    #[test]
    fn test_object_without_known_fields_has_no_note() {
        assert!(ResponseBody::parse(r#"{"ok": false}"#).error_note().is_none());
        assert!(ResponseBody::parse("").error_note().is_none());
        assert!(ResponseBody::parse("[1, 2]").error_note().is_none());
    }

    #[test]
    fn test_success_note_prefers_message() {
        let body = ResponseBody::parse(r#"{"detail": "created", "message": "Xush kelibsiz"}"#);
        assert_eq!(body.success_note().as_deref(), Some("Xush kelibsiz"));
        assert!(ResponseBody::parse(r#"{"id": 7}"#).success_note().is_none());
    }

    #[test]
    fn test_response_success_range() {
        assert!(TransportResponse::new(201, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(400, "").is_success());
    }

    #[test]
    fn test_client_builds_without_timeout() {
        let config = crate::config::Settings::default().registration;
        let client = HttpRegistrationClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://aiday.infinite-co.uz/register/");
    }
}
