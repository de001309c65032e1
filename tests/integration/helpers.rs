//! Shared test helpers for integration tests.
//!
//! [`TestBackend`] is an in-process `axum` stand-in for the document REST
//! API. It records every request it receives and answers with canned
//! responses that individual tests can swap out.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

use docmgr_cli::sink::DirectorySink;
use docmgr_core::config::api::ApiConfig;
use docmgr_core::traits::download::DownloadSink;
use docmgr_gateway::{DocumentGateway, HttpGateway};
use docmgr_state::AppContext;
use docmgr_state::token::MemoryTokenStore;

/// Account the stub backend accepts.
pub const EMAIL: &str = "a@b.com";
/// Password of [`EMAIL`].
pub const PASSWORD: &str = "pw";
/// Token issued for a successful login.
pub const TOKEN: &str = "T1";
/// Key the credential is persisted under.
pub const TOKEN_KEY: &str = "token";
/// Payload served by the download endpoint unless overridden.
pub const PAYLOAD: &[u8] = b"%PDF-1.7 review";

/// One request as seen by the stub backend.
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    /// Endpoint path, e.g. `/api/file_versions/`
    pub path: String,
    /// Decoded query parameters
    pub query: HashMap<String, String>,
    /// Raw `Authorization` header
    pub authorization: Option<String>,
    /// Multipart text fields
    pub fields: HashMap<String, String>,
    /// Multipart file name and bytes
    pub file: Option<(String, Vec<u8>)>,
}

/// Canned responses and request log.
#[derive(Debug)]
struct BackendState {
    listing: Mutex<(StatusCode, Value)>,
    download: Mutex<(StatusCode, Vec<u8>)>,
    upload: Mutex<(StatusCode, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl BackendState {
    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// In-process document backend
pub struct TestBackend {
    /// Base address to point a gateway at, e.g. `http://127.0.0.1:4242/api`
    pub base_url: String,
    state: Arc<BackendState>,
}

impl TestBackend {
    /// Start a backend on an ephemeral port with an empty listing.
    pub async fn start() -> Self {
        let state = Arc::new(BackendState {
            listing: Mutex::new((StatusCode::OK, json!([]))),
            download: Mutex::new((StatusCode::OK, PAYLOAD.to_vec())),
            upload: Mutex::new((StatusCode::CREATED, json!({ "id": 99 }).to_string())),
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/api/auth-token/", post(auth_token))
            .route("/api/file_versions/", get(list_versions))
            .route("/api/file_versions/{id}/", get(get_version))
            .route("/api/files/download/", get(download))
            .route("/api/files/upload/", post(upload))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test backend");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// Answer listings with `status` and `body`.
    pub fn set_listing(&self, status: StatusCode, body: Value) {
        *self.state.listing.lock().unwrap() = (status, body);
    }

    /// Answer downloads with `status` and `body`.
    pub fn set_download(&self, status: StatusCode, body: &[u8]) {
        *self.state.download.lock().unwrap() = (status, body.to_vec());
    }

    /// Answer uploads with `status` and a raw `body`.
    pub fn set_upload(&self, status: StatusCode, body: &str) {
        *self.state.upload.lock().unwrap() = (status, body.to_string());
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests received on `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Gateway pointed at this backend.
    pub fn gateway(&self) -> Arc<dyn DocumentGateway> {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        };
        Arc::new(HttpGateway::new(&config).expect("Failed to build gateway"))
    }

    /// Client wired to this backend over an in-memory token store.
    pub fn client(&self) -> TestClient {
        self.client_with(MemoryTokenStore::new())
    }

    /// Client wired to this backend over `store`.
    pub fn client_with(&self, store: MemoryTokenStore) -> TestClient {
        let ctx = Arc::new(AppContext::new(
            self.gateway(),
            Arc::new(store.clone()),
            TOKEN_KEY,
        ));
        let downloads = TempDir::new().expect("Failed to create download dir");
        TestClient {
            ctx,
            store,
            downloads,
        }
    }
}

/// Client-side handles for one test
pub struct TestClient {
    /// Application context under test
    pub ctx: Arc<AppContext>,
    /// Durable store behind the session
    pub store: MemoryTokenStore,
    /// Directory downloads are saved into
    pub downloads: TempDir,
}

impl TestClient {
    /// Sink saving into [`TestClient::downloads`].
    pub fn sink(&self) -> Arc<dyn DownloadSink> {
        Arc::new(DirectorySink::new(self.downloads.path()))
    }

    /// Path a download named `file_name` lands at.
    pub fn saved(&self, file_name: &str) -> PathBuf {
        self.downloads.path().join(file_name)
    }
}

/// Listing entry the way the backend serializes it.
pub fn version_json(id: i64, file_name: &str, parent_url: &str, version: u32) -> Value {
    json!({
        "id": id,
        "file_name": file_name,
        "version_number": version,
        "parent_url": parent_url,
        "upload_time": "2024-05-01T10:00:00Z",
        "can_read": true,
        "can_write": false,
    })
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn auth_token(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    state.record(RecordedRequest {
        path: "/api/auth-token/".to_string(),
        ..RecordedRequest::default()
    });

    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email == Some(EMAIL) && password == Some(PASSWORD) {
        (StatusCode::OK, Json(json!({ "token": TOKEN }))).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "non_field_errors": ["Unable to log in with provided credentials."] })),
        )
            .into_response()
    }
}

async fn list_versions(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record(RecordedRequest {
        path: "/api/file_versions/".to_string(),
        query,
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    });

    let (status, body) = state.listing.lock().unwrap().clone();
    (status, Json(body)).into_response()
}

async fn get_version(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.record(RecordedRequest {
        path: format!("/api/file_versions/{}/", id),
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    });

    let (status, body) = state.listing.lock().unwrap().clone();
    if !status.is_success() {
        return (status, Json(body)).into_response();
    }
    let found = body
        .as_array()
        .and_then(|items| {
            items.iter().find(|item| match item.get("id") {
                Some(Value::Number(n)) => n.to_string() == id,
                Some(Value::String(s)) => *s == id,
                _ => false,
            })
        })
        .cloned();
    match found {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response(),
    }
}

async fn download(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record(RecordedRequest {
        path: "/api/files/download/".to_string(),
        query,
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    });

    let (status, body) = state.download.lock().unwrap().clone();
    (status, body).into_response()
}

async fn upload(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut request = RecordedRequest {
        path: "/api/files/upload/".to_string(),
        authorization: authorization(&headers),
        ..RecordedRequest::default()
    };

    while let Some(field) = multipart.next_field().await.expect("Malformed multipart") {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.expect("Unreadable file part");
                request.file = Some((file_name, bytes.to_vec()));
            }
            None => {
                let text = field.text().await.expect("Unreadable text part");
                request.fields.insert(name, text);
            }
        }
    }
    state.record(request);

    let (status, body) = state.upload.lock().unwrap().clone();
    (status, body).into_response()
}
