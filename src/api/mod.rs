//! Client side of the remote passenger API.
//!
//! [`PassengerApi`] is the seam services depend on; [`http::HttpPassengerApi`]
//! is the production implementation. Each call is one best-effort request:
//! retries are left to the caller.

use async_trait::async_trait;

use crate::domain::passenger::{Passenger, PassengerPayload};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use errors::{ApiError, ApiResult, TransportError};

/// Server acknowledgment of a submitted passenger, kept uninterpreted.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Acknowledgment(pub serde_json::Value);

#[async_trait]
pub trait PassengerApi: Send + Sync {
    /// Fetches the full passenger list in server order.
    async fn list_passengers(&self) -> ApiResult<Vec<Passenger>>;

    /// Sends one passenger as a multipart payload.
    async fn submit_passenger(&self, payload: &PassengerPayload) -> ApiResult<Acknowledgment>;
}
