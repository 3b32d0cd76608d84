#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pushkind_passengers::api::{Acknowledgment, ApiResult, PassengerApi, TransportError};
use pushkind_passengers::domain::passenger::{Passenger, PassengerPayload};
use serde_json::json;

/// In-memory stand-in for the remote passenger API.
pub struct FakePassengerApi {
    list_response: ApiResult<Vec<Passenger>>,
    /// Zero-based index of the submission that fails, if any.
    fail_submission_at: Option<usize>,
    /// Zero-based index of the submission that never answers, if any.
    stall_submission_at: Option<usize>,
    list_calls: AtomicUsize,
    submitted: Mutex<Vec<PassengerPayload>>,
}

impl FakePassengerApi {
    pub fn with_passengers(passengers: Vec<Passenger>) -> Self {
        Self::with_response(Ok(passengers))
    }

    pub fn with_response(list_response: ApiResult<Vec<Passenger>>) -> Self {
        Self {
            list_response,
            fail_submission_at: None,
            stall_submission_at: None,
            list_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_submission_at(mut self, index: usize) -> Self {
        self.fail_submission_at = Some(index);
        self
    }

    pub fn stalling_submission_at(mut self, index: usize) -> Self {
        self.stall_submission_at = Some(index);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<PassengerPayload> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PassengerApi for FakePassengerApi {
    async fn list_passengers(&self) -> ApiResult<Vec<Passenger>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_response.clone()
    }

    async fn submit_passenger(&self, payload: &PassengerPayload) -> ApiResult<Acknowledgment> {
        let position = self.submitted.lock().unwrap().len();
        if self.stall_submission_at == Some(position) {
            std::future::pending::<()>().await;
        }
        if self.fail_submission_at == Some(position) {
            return Err(TransportError::status(500, "Internal Server Error").into());
        }
        self.submitted.lock().unwrap().push(payload.clone());
        Ok(Acknowledgment(json!({ "message": "Passenger added" })))
    }
}

pub fn passenger(name: &str, email: Option<&str>) -> Passenger {
    Passenger {
        name: Some(name.into()),
        email: email.map(Into::into),
        ..Passenger::default()
    }
}
