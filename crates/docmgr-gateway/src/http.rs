//! `reqwest` implementation of the document gateway.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::{debug, warn};

use docmgr_core::config::api::ApiConfig;
use docmgr_core::error::AppError;
use docmgr_core::result::AppResult;
use docmgr_entity::file::{FileVersionRecord, UploadAck, UploadFile};
use docmgr_entity::session::{AuthTokenRequest, AuthTokenResponse, Credential};

use crate::error::{GatewayError, UPLOAD_FAILED_FALLBACK};
use crate::gateway::{DocumentGateway, ListFilter};

/// Gateway talking to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// Shared connection pool.
    client: Client,
    /// Address every endpoint is resolved against.
    base_url: Url,
}

impl HttpGateway {
    /// Create a gateway from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "API base URL '{}' cannot hold endpoint paths",
                config.base_url
            )));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The configured base address.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint below the base address, with a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }
}

/// Attach the credential header when a credential is present.
fn authorize(builder: RequestBuilder, credential: Option<&Credential>) -> RequestBuilder {
    match credential {
        Some(credential) => builder.header(AUTHORIZATION, credential.authorization_value()),
        None => builder,
    }
}

/// Extract the `{"error": "..."}` message of a failed upload, or fall back.
pub fn upload_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UPLOAD_FAILED_FALLBACK.to_string())
}

fn is_unauthorized(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[async_trait]
impl DocumentGateway for HttpGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, GatewayError> {
        let url = self.endpoint(&["auth-token"]);
        debug!(%url, "Requesting auth token");

        let body = AuthTokenRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Auth token request failed");
                GatewayError::AuthFailed
            })?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Auth token rejected");
            return Err(GatewayError::AuthFailed);
        }

        let token: AuthTokenResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Auth token response unreadable");
            GatewayError::AuthFailed
        })?;

        Credential::new(token.token).map_err(|_| GatewayError::AuthFailed)
    }

    async fn list_versions(
        &self,
        credential: Option<&Credential>,
        filter: &ListFilter,
    ) -> Result<Vec<FileVersionRecord>, GatewayError> {
        let mut url = self.endpoint(&["file_versions"]);
        if !filter.is_empty() {
            let mut query = url.query_pairs_mut();
            if let Some(parent_url) = &filter.parent_url {
                query.append_pair("parent_url", parent_url);
            }
            if let Some(revision) = filter.revision {
                query.append_pair("revision", &revision.to_string());
            }
        }
        debug!(%url, "Listing file versions");

        let response = authorize(self.client.get(url), credential)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if is_unauthorized(status) {
            return Err(GatewayError::Unauthorized);
        }
        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!("listing returned {status}")));
        }

        response
            .json::<Vec<FileVersionRecord>>()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("unreadable listing: {e}")))
    }

    async fn get_version(
        &self,
        credential: Option<&Credential>,
        id: &str,
    ) -> Result<FileVersionRecord, GatewayError> {
        let url = self.endpoint(&["file_versions", id]);
        debug!(%url, "Fetching file version");

        let response = authorize(self.client.get(url), credential)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if is_unauthorized(status) {
            return Err(GatewayError::Unauthorized);
        }
        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!("lookup returned {status}")));
        }

        response
            .json::<FileVersionRecord>()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("unreadable record: {e}")))
    }

    async fn download_version(
        &self,
        credential: Option<&Credential>,
        parent_url: &str,
        revision: Option<u32>,
    ) -> Result<Bytes, GatewayError> {
        let mut url = self.endpoint(&["files", "download"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("parent_url", parent_url);
            if let Some(revision) = revision {
                query.append_pair("revision", &revision.to_string());
            }
        }
        debug!(%url, "Downloading file version");

        let response = authorize(self.client.get(url), credential)
            .send()
            .await
            .map_err(|e| GatewayError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::DownloadFailed(status.to_string()));
        }

        response
            .bytes()
            .await
            .map_err(|e| GatewayError::DownloadFailed(e.to_string()))
    }

    async fn upload_version(
        &self,
        credential: Option<&Credential>,
        file: &UploadFile,
        parent_url: &str,
    ) -> Result<UploadAck, GatewayError> {
        let url = self.endpoint(&["files", "upload"]);
        debug!(%url, file_name = %file.file_name, size = file.size(), "Uploading file version");

        let part = Part::bytes(file.content.to_vec()).file_name(file.file_name.clone());
        let form = Form::new()
            .part("file", part)
            .text("parent_url", parent_url.to_string());

        let response = authorize(self.client.post(url), credential)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Upload request failed");
                GatewayError::UploadFailed(UPLOAD_FAILED_FALLBACK.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = upload_error_message(&body);
            debug!(%status, %message, "Upload rejected");
            return Err(GatewayError::UploadFailed(message));
        }

        let body = response.bytes().await.unwrap_or_default();
        let raw = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        Ok(UploadAck { raw })
    }
}
