// Checkout Gateway Sandbox
//
// In-process stand-in for the hosted checkout provider. Sessions are kept in
// memory and can be flipped to paid or made to fail from the test body.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use kaabo::core::{AppError, Result};
use kaabo::modules::checkout::services::{
    CheckoutGateway, CheckoutSession, CheckoutSessionRequest,
};

#[derive(Default)]
struct SandboxState {
    sessions: HashMap<String, CheckoutSession>,
    requests: Vec<CheckoutSessionRequest>,
    next_id: u32,
    fail_next: Option<String>,
}

/// Sandbox implementation of `CheckoutGateway`
#[derive(Default)]
pub struct SandboxGateway {
    state: Mutex<SandboxState>,
}

impl SandboxGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the session report `payment_status = "paid"`
    pub fn mark_paid(&self, session_id: &str) {
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .get_mut(session_id)
            .unwrap_or_else(|| panic!("Unknown sandbox session {}", session_id));
        session.payment_status = "paid".to_string();
        session.status = Some("complete".to_string());
        session.url = None;
    }

    /// The next gateway call fails with `message`
    pub fn fail_next(&self, message: &str) {
        self.state.lock().unwrap().fail_next = Some(message.to_string());
    }

    /// Most recent create-session request
    pub fn last_request(&self) -> Option<CheckoutSessionRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }
}

#[async_trait]
impl CheckoutGateway for SandboxGateway {
    async fn create_session(&self, request: CheckoutSessionRequest) -> Result<CheckoutSession> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_next.take() {
            return Err(AppError::gateway(message));
        }

        state.next_id += 1;
        let id = format!("cs_test_{:04}", state.next_id);
        let session = CheckoutSession {
            id: id.clone(),
            url: Some(format!("https://checkout.sandbox.test/pay/{}", id)),
            payment_status: "unpaid".to_string(),
            status: Some("open".to_string()),
        };

        state.requests.push(request);
        state.sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_next.take() {
            return Err(AppError::gateway(message));
        }

        state
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| AppError::gateway(format!("No such checkout.session: '{}'", session_id)))
    }

    fn name(&self) -> &str {
        "sandbox"
    }
}
