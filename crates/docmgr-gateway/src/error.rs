//! Classified failures of remote operations.

use thiserror::Error;

use docmgr_core::error::{AppError, ErrorKind};

/// Generic message used when an upload failure carries no readable detail.
pub const UPLOAD_FAILED_FALLBACK: &str = "Upload failed";

/// Failure of a gateway call.
///
/// Only [`GatewayError::Unauthorized`] has session-wide consequences
/// (forced logout); every other kind is reported by the initiating view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The token endpoint rejected the credentials or could not be reached.
    #[error("Login failed")]
    AuthFailed,
    /// The backend answered 401 or 403 to a listing call.
    #[error("Unauthorized")]
    Unauthorized,
    /// A listing or lookup failed for any other reason.
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// A download returned a non-success response.
    #[error("Failed to download file: {0}")]
    DownloadFailed(String),
    /// An upload failed; the message is shown to the user verbatim.
    #[error("{0}")]
    UploadFailed(String),
}

impl GatewayError {
    /// Whether this failure invalidates the current session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        let kind = match &err {
            GatewayError::AuthFailed => ErrorKind::Authentication,
            GatewayError::Unauthorized => ErrorKind::Authorization,
            _ => ErrorKind::ExternalService,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
