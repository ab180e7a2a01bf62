//! Mock registration endpoint for testing
//!
//! A wiremock server standing in for the remote registration API, plus an
//! in-process transport that counts calls without any networking.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use serde_json::Value;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use aiday_register::models::RegistrationPayload;
use aiday_register::services::{RegistrationTransport, TransportResponse};
use aiday_register::utils::errors::TransportResult;

pub const REGISTER_PATH: &str = "/register/";

/// Mock registration API server
pub struct RegistrationMockServer {
    pub server: MockServer,
}

impl RegistrationMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Endpoint URL to put into the settings
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), REGISTER_PATH)
    }

    /// Answer every JSON POST with a JSON body, expecting exactly `calls` requests
    pub async fn mock_json(&self, status: u16, body: Value, calls: u64) {
        self.mount(ResponseTemplate::new(status).set_body_json(body), calls).await;
    }

    /// Answer every JSON POST with a raw text body
    pub async fn mock_text(&self, status: u16, body: &str, calls: u64) {
        self.mount(ResponseTemplate::new(status).set_body_string(body), calls).await;
    }

    async fn mount(&self, response: ResponseTemplate, calls: u64) {
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .respond_with(response)
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far
    pub async fn received_payloads(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
            .collect()
    }
}

/// In-process transport that records payloads and replays one result
pub struct CountingTransport {
    calls: AtomicUsize,
    payloads: Mutex<Vec<RegistrationPayload>>,
    reply: TransportResult<TransportResponse>,
}

impl CountingTransport {
    pub fn replying(reply: TransportResult<TransportResponse>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            reply,
        }
    }

    pub fn accepting() -> Self {
        Self::replying(Ok(TransportResponse::new(200, "")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn payloads(&self) -> Vec<RegistrationPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrationTransport for CountingTransport {
    async fn post_registration(&self, payload: &RegistrationPayload) -> TransportResult<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        self.reply.clone()
    }
}
