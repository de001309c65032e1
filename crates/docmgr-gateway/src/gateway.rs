//! Gateway trait for the document backend.

use async_trait::async_trait;
use bytes::Bytes;

use docmgr_entity::file::{FileVersionRecord, UploadAck, UploadFile};
use docmgr_entity::session::Credential;

use crate::error::GatewayError;

/// Optional narrowing of a version listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only versions of this parent URL.
    pub parent_url: Option<String>,
    /// Only this version number.
    pub revision: Option<u32>,
}

impl ListFilter {
    /// Whether the filter narrows nothing.
    pub fn is_empty(&self) -> bool {
        self.parent_url.is_none() && self.revision.is_none()
    }
}

/// Remote operations of the document backend.
///
/// Every call takes an optional credential, attached as the
/// `Authorization: Token <credential>` header when present.
#[async_trait]
pub trait DocumentGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange email and password for a credential.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, GatewayError>;

    /// Fetch a full snapshot of the caller's file versions.
    async fn list_versions(
        &self,
        credential: Option<&Credential>,
        filter: &ListFilter,
    ) -> Result<Vec<FileVersionRecord>, GatewayError>;

    /// Fetch one file version by backend identifier.
    async fn get_version(
        &self,
        credential: Option<&Credential>,
        id: &str,
    ) -> Result<FileVersionRecord, GatewayError>;

    /// Download the content of a version. `None` selects the latest one.
    async fn download_version(
        &self,
        credential: Option<&Credential>,
        parent_url: &str,
        revision: Option<u32>,
    ) -> Result<Bytes, GatewayError>;

    /// Upload a new version of the file at `parent_url`.
    async fn upload_version(
        &self,
        credential: Option<&Credential>,
        file: &UploadFile,
        parent_url: &str,
    ) -> Result<UploadAck, GatewayError>;
}
