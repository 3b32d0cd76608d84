//! Form definitions backing the passenger desk routes.

use thiserror::Error;

pub mod intake;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("malformed multipart payload: {0}")]
    Multipart(String),

    #[error("field `{0}` exceeds the upload size limit")]
    PartTooLarge(String),

    #[error("field `{0}` is not valid UTF-8")]
    InvalidText(String),

    #[error("invalid draft id")]
    InvalidDraftId,
}
