//! Per-form submission state
//!
//! A session lives as long as the mounted form. Each submit walks
//! `Idle -> Validating -> {FieldErrors | Submitting -> {Success | ApiError}}`;
//! terminal states read back as `Idle` once the status TTL has passed.

use super::client::LeadSubmitter;
use crate::{
    error::{AppError, Result},
    models::{FormKind, LeadResponse, SubmissionPayload},
    validation::{validate, FieldErrors, FormInput},
};
use parking_lot::Mutex;
use serde::Serialize;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::task::AbortHandle;
use tracing::{info, warn};
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Submitted successfully!";
pub const REJECTED_MESSAGE: &str = "An error occurred.";
pub const TRANSPORT_MESSAGE: &str = "Failed to submit. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success { message: String },
    FieldErrors { errors: FieldErrors },
    ApiError { message: String },
}

impl SubmissionResult {
    /// Maps the lead API outcome; transport causes are logged, not shown.
    pub fn from_response(kind: FormKind, response: Result<LeadResponse>) -> Self {
        match response {
            Ok(LeadResponse { success: true, .. }) => SubmissionResult::Success {
                message: SUCCESS_MESSAGE.to_string(),
            },
            Ok(LeadResponse { message, .. }) => SubmissionResult::ApiError {
                message: message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| REJECTED_MESSAGE.to_string()),
            },
            Err(e) => {
                warn!(form = %kind, error = %e, "lead submission failed");
                SubmissionResult::ApiError {
                    message: TRANSPORT_MESSAGE.to_string(),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

/// What the form shows right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
    Success { message: String },
    FieldErrors { errors: FieldErrors },
    ApiError { message: String },
}

impl From<SubmissionResult> for FormState {
    fn from(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success { message } => FormState::Success { message },
            SubmissionResult::FieldErrors { errors } => FormState::FieldErrors { errors },
            SubmissionResult::ApiError { message } => FormState::ApiError { message },
        }
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    Validating,
    Submitting,
    Done { result: SubmissionResult, at: Instant },
}

#[derive(Debug)]
struct Inner {
    input: FormInput,
    phase: Phase,
    attempt: u64,
    in_flight: Option<AbortHandle>,
    closed: bool,
    last_activity: Instant,
}

impl Inner {
    /// Writes a terminal state unless the session was torn down or a newer attempt started.
    fn record(&mut self, attempt: u64, result: SubmissionResult) -> bool {
        if self.closed || self.attempt != attempt {
            return false;
        }
        self.in_flight = None;
        self.phase = Phase::Done {
            result,
            at: Instant::now(),
        };
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub kind: FormKind,
    pub input: FormInput,
    #[serde(flatten)]
    pub state: FormState,
}

#[derive(Debug)]
pub struct FormSession {
    id: Uuid,
    kind: FormKind,
    status_ttl: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl FormSession {
    pub fn new(kind: FormKind, status_ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            status_ttl,
            inner: Arc::new(Mutex::new(Inner {
                input: FormInput::new(),
                phase: Phase::Idle,
                attempt: 0,
                in_flight: None,
                closed: false,
                last_activity: Instant::now(),
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn set_input(&self, field: impl Into<String>, value: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.input.set(field, value);
        inner.last_activity = Instant::now();
    }

    pub fn update_input(&self, fields: FormInput) {
        let mut inner = self.inner.lock();
        inner.input.extend(fields);
        inner.last_activity = Instant::now();
    }

    pub fn input(&self) -> FormInput {
        self.inner.lock().input.clone()
    }

    pub fn last_activity(&self) -> Instant {
        self.inner.lock().last_activity
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.inner.lock().phase, Phase::Submitting)
    }

    pub fn state(&self) -> FormState {
        self.state_at(Instant::now())
    }

    pub fn state_at(&self, now: Instant) -> FormState {
        let inner = self.inner.lock();
        match &inner.phase {
            Phase::Idle => FormState::Idle,
            Phase::Validating => FormState::Validating,
            Phase::Submitting => FormState::Submitting,
            Phase::Done { result, at } => {
                if now.saturating_duration_since(*at) >= self.status_ttl {
                    FormState::Idle
                } else {
                    result.clone().into()
                }
            }
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            kind: self.kind,
            input: self.input(),
            state: self.state(),
        }
    }

    /// Runs one submit attempt. Rejected while a previous attempt is still
    /// in flight; the network is only reached when validation passes.
    pub async fn submit(&self, submitter: Arc<dyn LeadSubmitter>) -> Result<SubmissionResult> {
        let (attempt, input) = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return Err(AppError::NotFound(format!("Form session {} is closed", self.id)));
            }
            if matches!(inner.phase, Phase::Validating | Phase::Submitting) {
                return Err(AppError::Conflict(
                    "A submission for this form is already in progress".to_string(),
                ));
            }
            inner.attempt += 1;
            inner.phase = Phase::Validating;
            inner.last_activity = Instant::now();
            (inner.attempt, inner.input.clone())
        };

        let data = match validate(&input, self.kind.schema()) {
            Ok(data) => data,
            Err(errors) => {
                info!(form = %self.kind, session = %self.id, fields = errors.len(), "form failed validation");
                let result = SubmissionResult::FieldErrors { errors };
                self.finish(attempt, result.clone());
                return Ok(result);
            }
        };

        let payload = SubmissionPayload::build(self.kind, &data);
        let task = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return Err(AppError::NotFound(format!("Form session {} is closed", self.id)));
            }
            inner.phase = Phase::Submitting;

            // Recorded inside the task: the caller's future may be dropped mid-request.
            let shared = self.inner.clone();
            let (kind, id) = (self.kind, self.id);
            let task = tokio::spawn(async move {
                let result = SubmissionResult::from_response(kind, submitter.submit(&payload).await);
                info!(form = %kind, session = %id, success = result.is_success(), "form submission finished");
                let recorded = shared.lock().record(attempt, result.clone());
                (result, recorded)
            });
            inner.in_flight = Some(task.abort_handle());
            task
        };

        match task.await {
            Ok((result, true)) => Ok(result),
            Ok((_, false)) => {
                Err(AppError::NotFound(format!("Form session {} was closed", self.id)))
            }
            Err(e) if e.is_cancelled() => {
                info!(form = %self.kind, session = %self.id, "form submission cancelled");
                Err(AppError::NotFound(format!("Form session {} was closed", self.id)))
            }
            Err(e) => {
                let result = SubmissionResult::from_response(
                    self.kind,
                    Err(AppError::Other(anyhow::anyhow!("submission task failed: {}", e))),
                );
                self.finish(attempt, result.clone());
                Ok(result)
            }
        }
    }

    fn finish(&self, attempt: u64, result: SubmissionResult) -> bool {
        self.inner.lock().record(attempt, result)
    }

    /// Teardown: cancels any in-flight request. The session accepts nothing afterwards.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
        inner.phase = Phase::Idle;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.lock().in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct StubSubmitter {
        calls: AtomicUsize,
        response: std::result::Result<LeadResponse, String>,
        gate: Option<Arc<Notify>>,
    }

    impl StubSubmitter {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Ok(LeadResponse { success: true, message: None }),
                gate: None,
            })
        }

        fn rejecting(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Ok(LeadResponse {
                    success: false,
                    message: Some(message.to_string()),
                }),
                gate: None,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Err("connection refused".to_string()),
                gate: None,
            })
        }

        fn gated(gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Ok(LeadResponse { success: true, message: None }),
                gate: Some(gate),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LeadSubmitter for StubSubmitter {
        async fn submit(&self, _payload: &SubmissionPayload) -> Result<LeadResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.response
                .clone()
                .map_err(AppError::Upstream)
        }
    }

    fn contact_session() -> FormSession {
        let session = FormSession::new(FormKind::Contact, Duration::from_millis(5000));
        session.update_input(
            FormInput::new()
                .with("firstName", "Jane")
                .with("lastName", "Doe")
                .with("email", "jane@example.com")
                .with("phoneNumber", "224-497-2554"),
        );
        session
    }

    #[tokio::test]
    async fn test_success_keeps_input() {
        let session = contact_session();
        let submitter = StubSubmitter::ok();

        let result = session.submit(submitter.clone()).await.unwrap();

        assert!(result.is_success());
        assert_eq!(submitter.calls(), 1);
        assert_eq!(
            session.state(),
            FormState::Success { message: SUCCESS_MESSAGE.to_string() }
        );
        assert_eq!(session.input().get("firstName"), "Jane");
    }

    #[tokio::test]
    async fn test_field_errors_skip_network() {
        let session = contact_session();
        session.set_input("phoneNumber", "12345");
        let submitter = StubSubmitter::ok();

        let result = session.submit(submitter.clone()).await.unwrap();

        assert_eq!(submitter.calls(), 0);
        match result {
            SubmissionResult::FieldErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get("phoneNumber"), Some("Invalid phone number"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_rejection_message_is_shown() {
        let session = contact_session();
        session.submit(StubSubmitter::rejecting("Duplicate")).await.unwrap();

        assert_eq!(
            session.state(),
            FormState::ApiError { message: "Duplicate".to_string() }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_uses_generic_message() {
        let session = contact_session();
        session.submit(StubSubmitter::failing()).await.unwrap();

        assert_eq!(
            session.state(),
            FormState::ApiError { message: TRANSPORT_MESSAGE.to_string() }
        );
    }

    #[test]
    fn test_rejection_without_message_uses_fallback() {
        let result = SubmissionResult::from_response(
            FormKind::Estimate,
            Ok(LeadResponse { success: false, message: None }),
        );
        assert_eq!(
            result,
            SubmissionResult::ApiError { message: REJECTED_MESSAGE.to_string() }
        );
    }

    #[tokio::test]
    async fn test_status_clears_after_ttl_and_not_before() {
        let session = contact_session();
        let before = Instant::now();
        session.submit(StubSubmitter::ok()).await.unwrap();
        let after = Instant::now();

        assert!(matches!(
            session.state_at(before + Duration::from_millis(4999)),
            FormState::Success { .. }
        ));
        assert_eq!(session.state_at(after + Duration::from_millis(5000)), FormState::Idle);
    }

    #[tokio::test]
    async fn test_field_errors_and_api_error_clear_at_ttl() {
        let session = contact_session();
        session.set_input("email", "broken");
        let before = Instant::now();
        session.submit(StubSubmitter::ok()).await.unwrap();
        let after = Instant::now();

        assert!(matches!(
            session.state_at(before + Duration::from_millis(4999)),
            FormState::FieldErrors { .. }
        ));
        assert_eq!(session.state_at(after + Duration::from_millis(5000)), FormState::Idle);

        session.set_input("email", "jane@example.com");
        let before = Instant::now();
        session.submit(StubSubmitter::rejecting("Duplicate")).await.unwrap();
        let after = Instant::now();

        assert_eq!(
            session.state_at(before + Duration::from_millis(4999)),
            FormState::ApiError { message: "Duplicate".to_string() }
        );
        assert_eq!(session.state_at(after + Duration::from_millis(5000)), FormState::Idle);
    }

    #[tokio::test]
    async fn test_outcome_recorded_after_caller_is_dropped() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(contact_session());
        let submitter = StubSubmitter::gated(gate.clone());

        let caller = {
            let session = session.clone();
            let submitter = submitter.clone();
            tokio::spawn(async move { session.submit(submitter).await })
        };

        while !session.is_submitting() {
            tokio::task::yield_now().await;
        }
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());

        gate.notify_one();
        while session.is_submitting() {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            session.state(),
            FormState::Success { message: SUCCESS_MESSAGE.to_string() }
        );

        gate.notify_one();
        let next = session.submit(submitter.clone()).await.unwrap();
        assert!(next.is_success());
        assert_eq!(submitter.calls(), 2);
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(contact_session());
        let submitter = StubSubmitter::gated(gate.clone());

        let first = {
            let session = session.clone();
            let submitter = submitter.clone();
            tokio::spawn(async move { session.submit(submitter).await })
        };

        while !session.is_submitting() {
            tokio::task::yield_now().await;
        }
        assert_eq!(session.state(), FormState::Submitting);

        let second = session.submit(submitter.clone()).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert!(first.is_success());
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test]
    async fn test_close_cancels_in_flight_request() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(contact_session());
        let submitter = StubSubmitter::gated(gate.clone());

        let pending = {
            let session = session.clone();
            let submitter = submitter.clone();
            tokio::spawn(async move { session.submit(submitter).await })
        };

        while !session.is_submitting() {
            tokio::task::yield_now().await;
        }
        session.close();

        let outcome = pending.await.unwrap();
        assert!(matches!(outcome, Err(AppError::NotFound(_))));
        assert_eq!(session.state(), FormState::Idle);
        assert!(session.submit(submitter).await.is_err());
    }

    #[tokio::test]
    async fn test_new_submit_restarts_from_terminal_state() {
        let session = contact_session();
        session.set_input("email", "broken");
        session.submit(StubSubmitter::ok()).await.unwrap();
        assert!(matches!(session.state(), FormState::FieldErrors { .. }));

        session.set_input("email", "jane@example.com");
        let result = session.submit(StubSubmitter::ok()).await.unwrap();
        assert!(result.is_success());
    }
}
