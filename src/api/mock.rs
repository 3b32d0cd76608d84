//! Mock API implementation for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::{Acknowledgment, ApiResult, PassengerApi};
use crate::domain::passenger::{Passenger, PassengerPayload};

mock! {
    pub PassengerApi {}

    #[async_trait]
    impl PassengerApi for PassengerApi {
        async fn list_passengers(&self) -> ApiResult<Vec<Passenger>>;
        async fn submit_passenger(&self, payload: &PassengerPayload) -> ApiResult<Acknowledgment>;
    }
}
