//! Integration tests for the login flow.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;

use docmgr_cli::views::LoginView;
use docmgr_cli::views::login::{
    LOGIN_FAILED_MESSAGE, LOGIN_MISSING_INPUT_MESSAGE, SESSION_REJECTED_MESSAGE,
};
use docmgr_core::config::api::ApiConfig;
use docmgr_gateway::{DocumentGateway, GatewayError, HttpGateway};
use docmgr_state::token::MemoryTokenStore;
use helpers::{EMAIL, PASSWORD, TOKEN, TOKEN_KEY, TestBackend, version_json};

#[tokio::test]
async fn test_authenticate_returns_token() {
    let backend = TestBackend::start().await;

    let credential = backend
        .gateway()
        .authenticate(EMAIL, PASSWORD)
        .await
        .unwrap();

    assert_eq!(credential.as_str(), TOKEN);
    assert_eq!(backend.requests_to("/api/auth-token/").len(), 1);
}

#[tokio::test]
async fn test_authenticate_rejected() {
    let backend = TestBackend::start().await;

    let result = backend.gateway().authenticate(EMAIL, "wrong").await;

    assert!(matches!(result, Err(GatewayError::AuthFailed)));
}

#[tokio::test]
async fn test_authenticate_unreachable_backend() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        ..ApiConfig::default()
    };
    let gateway = HttpGateway::new(&config).unwrap();

    let result = gateway.authenticate(EMAIL, PASSWORD).await;

    assert!(matches!(result, Err(GatewayError::AuthFailed)));
}

#[tokio::test]
async fn test_login_view_persists_token_and_loads_listing() {
    let backend = TestBackend::start().await;
    backend.set_listing(
        StatusCode::OK,
        serde_json::json!([version_json(7, "review.pdf", "/documents/review.pdf", 2)]),
    );
    let client = backend.client();
    let mut view = LoginView::new(Arc::clone(&client.ctx));
    view.email = EMAIL.to_string();
    view.password = PASSWORD.to_string();

    assert!(view.submit().await);

    assert!(client.ctx.session().is_authenticated());
    assert_eq!(client.store.peek(TOKEN_KEY), Some(TOKEN.to_string()));
    assert!(view.email.is_empty());
    assert!(view.password.is_empty());
    assert_eq!(view.error(), None);

    let listings = backend.requests_to("/api/file_versions/");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].authorization.as_deref(), Some("Token T1"));
    assert_eq!(client.ctx.registry().len(), 1);
}

#[tokio::test]
async fn test_login_view_rejected_listing_fails() {
    let backend = TestBackend::start().await;
    backend.set_listing(
        StatusCode::FORBIDDEN,
        serde_json::json!({ "detail": "Invalid token." }),
    );
    let client = backend.client();
    let mut view = LoginView::new(Arc::clone(&client.ctx));
    view.email = EMAIL.to_string();
    view.password = PASSWORD.to_string();

    assert!(!view.submit().await);

    assert_eq!(view.error(), Some(SESSION_REJECTED_MESSAGE));
    assert!(view.render().contains(SESSION_REJECTED_MESSAGE));
    assert!(!client.ctx.session().is_authenticated());
    assert_eq!(client.store.peek(TOKEN_KEY), None);
    assert_eq!(view.email, EMAIL);
}

#[tokio::test]
async fn test_login_view_wrong_password() {
    let backend = TestBackend::start().await;
    let client = backend.client();
    let mut view = LoginView::new(Arc::clone(&client.ctx));
    view.email = EMAIL.to_string();
    view.password = "wrong".to_string();

    assert!(!view.submit().await);

    assert_eq!(view.error(), Some(LOGIN_FAILED_MESSAGE));
    assert!(view.render().contains(LOGIN_FAILED_MESSAGE));
    assert!(!client.ctx.session().is_authenticated());
    assert_eq!(client.store.peek(TOKEN_KEY), None);
    assert!(backend.requests_to("/api/file_versions/").is_empty());
    assert_eq!(view.email, EMAIL);
}

#[tokio::test]
async fn test_login_view_blank_fields_skip_backend() {
    let backend = TestBackend::start().await;
    let client = backend.client();
    let mut view = LoginView::new(Arc::clone(&client.ctx));
    view.email = "   ".to_string();
    view.password = PASSWORD.to_string();

    assert!(!view.submit().await);

    assert_eq!(view.error(), Some(LOGIN_MISSING_INPUT_MESSAGE));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_second_login_replaces_token() {
    let backend = TestBackend::start().await;
    let client = backend.client_with(MemoryTokenStore::with_entry(TOKEN_KEY, "OLD"));
    client.ctx.restore().await.unwrap();

    let mut view = LoginView::new(Arc::clone(&client.ctx));
    view.email = EMAIL.to_string();
    view.password = PASSWORD.to_string();
    assert!(view.submit().await);

    assert_eq!(client.store.peek(TOKEN_KEY), Some(TOKEN.to_string()));
    assert_eq!(
        client.ctx.credential().map(|c| c.as_str().to_string()),
        Some(TOKEN.to_string())
    );
}
