use chrono::Duration;

use pa_core::domain::{AuthRequest, Session};
use pa_core::services::SessionStore;
use pa_shared::SessionConfig;

use super::{cookie_pair, request_with};
use crate::session::CookieSessionStore;

fn store() -> CookieSessionStore {
    CookieSessionStore::new(&SessionConfig {
        secret: "cookie-store-test-secret-0123456789".to_string(),
        ..Default::default()
    })
}

fn populated() -> Session {
    let mut session = Session::new();
    session.set("user", &serde_json::json!({"id": "u-1"})).unwrap();
    session.flash("phone-auth:phone", "+15551234567").unwrap();
    session
}

#[tokio::test]
async fn test_no_cookie_gives_empty_session() {
    let session = store().get(&AuthRequest::default()).await.unwrap();
    assert!(session.is_empty());
    assert!(session.id().is_none());
}

#[tokio::test]
async fn test_persisted_session_reads_back() {
    let store = store();
    let header = store.persist(&populated()).await.unwrap();

    assert!(header.starts_with("pa_session="));
    assert!(header.contains("HttpOnly"));

    let mut session = store.get(&request_with(&header)).await.unwrap();
    assert_eq!(session.data(), populated().data());
    assert_eq!(
        session.get("phone-auth:phone").and_then(|v| v.as_str().map(String::from)),
        Some("+15551234567".to_string())
    );
}

#[tokio::test]
async fn test_cookie_is_not_readable_json() {
    let header = store().persist(&populated()).await.unwrap();
    assert!(!header.contains("15551234567"));
}

#[tokio::test]
async fn test_tampered_cookie_is_discarded() {
    let store = store();
    let header = store.persist(&populated()).await.unwrap();
    let pair = cookie_pair(&header);
    let tampered = format!("{}A", pair);

    let request = AuthRequest::default().with_cookie_header(tampered);
    let session = store.get(&request).await.unwrap();

    assert!(session.is_empty());
}

#[tokio::test]
async fn test_cookie_from_other_secret_is_discarded() {
    let header = store().persist(&populated()).await.unwrap();
    let other = CookieSessionStore::new(&SessionConfig {
        secret: "a-completely-different-secret-value".to_string(),
        ..Default::default()
    });

    let session = other.get(&request_with(&header)).await.unwrap();

    assert!(session.is_empty());
}

#[tokio::test]
async fn test_expired_payload_is_discarded() {
    let store = store().with_ttl(Duration::seconds(-1));
    let header = store.persist(&populated()).await.unwrap();

    let session = store.get(&request_with(&header)).await.unwrap();

    assert!(session.is_empty());
}

#[tokio::test]
async fn test_empty_session_clears_cookie() {
    let header = store().persist(&Session::new()).await.unwrap();
    assert!(header.starts_with("pa_session=;"));
    assert!(header.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_destroy_clears_cookie() {
    let header = store().destroy(&populated()).await.unwrap();
    assert!(header.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_oversized_session_is_an_error() {
    let mut session = Session::new();
    session.set("blob", &"x".repeat(5000)).unwrap();

    let result = store().persist(&session).await;

    assert!(result.is_err());
}
