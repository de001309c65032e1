//! Scripted gateway for state-layer unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use docmgr_entity::file::{FileVersionRecord, UploadAck, UploadFile};
use docmgr_entity::session::Credential;
use docmgr_gateway::{DocumentGateway, GatewayError, ListFilter};

type Listing = Result<Vec<FileVersionRecord>, GatewayError>;

pub fn record(id: &str, parent_url: &str, version_number: u32) -> FileVersionRecord {
    FileVersionRecord {
        id: id.to_string(),
        file_name: parent_url.rsplit('/').next().unwrap_or(parent_url).to_string(),
        version_number,
        parent_url: parent_url.to_string(),
        upload_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        can_read: true,
        can_write: true,
        content_hash: None,
    }
}

/// Answers listings from a queue (empty listing once drained).
#[derive(Debug, Default)]
pub struct StubGateway {
    listings: Mutex<VecDeque<Listing>>,
    gate: Mutex<Option<Arc<Notify>>>,
    list_calls: AtomicUsize,
    listed_with: Mutex<Vec<Option<String>>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_listing(&self, listing: Listing) {
        self.listings.lock().unwrap().push_back(listing);
    }

    /// Make the next listing call wait until the returned handle is notified.
    pub fn gate_listings(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn listed_with(&self) -> Vec<Option<String>> {
        self.listed_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentGateway for StubGateway {
    async fn authenticate(&self, _email: &str, password: &str) -> Result<Credential, GatewayError> {
        if password == "pw" {
            Credential::new("T1").map_err(|_| GatewayError::AuthFailed)
        } else {
            Err(GatewayError::AuthFailed)
        }
    }

    async fn list_versions(
        &self,
        credential: Option<&Credential>,
        _filter: &ListFilter,
    ) -> Result<Vec<FileVersionRecord>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listed_with
            .lock()
            .unwrap()
            .push(credential.map(|c| c.as_str().to_string()));
        let listing = self
            .listings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        listing
    }

    async fn get_version(
        &self,
        _credential: Option<&Credential>,
        id: &str,
    ) -> Result<FileVersionRecord, GatewayError> {
        Err(GatewayError::RequestFailed(format!("no record {id}")))
    }

    async fn download_version(
        &self,
        _credential: Option<&Credential>,
        _parent_url: &str,
        _revision: Option<u32>,
    ) -> Result<Bytes, GatewayError> {
        Ok(Bytes::from_static(b"payload"))
    }

    async fn upload_version(
        &self,
        _credential: Option<&Credential>,
        _file: &UploadFile,
        _parent_url: &str,
    ) -> Result<UploadAck, GatewayError> {
        Ok(UploadAck {
            raw: serde_json::Value::Null,
        })
    }
}
