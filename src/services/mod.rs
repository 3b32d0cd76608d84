//! Service layer shared by the HTTP routes.
//!
//! Services are generic over [`PassengerApi`](crate::api::PassengerApi) so they
//! can be exercised against mocks.

use thiserror::Error;

use crate::api::ApiError;
use crate::domain::intake::IntakeError;
use crate::forms::FormError;

pub mod intake;
pub mod main;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error("workspace state is unavailable")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
