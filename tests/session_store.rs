//! Session persistence across process restarts, isolated in a temp dir.

use std::fs;
use std::time::{Duration, Instant};

use orange_pages::session::{Credentials, Session, SessionError};
use tempfile::TempDir;

fn email() -> Credentials {
    Credentials::Email {
        email: "alice@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

#[test]
fn test_login_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(dir.path()).unwrap();
    assert!(!session.is_authenticated());

    let start = Instant::now();
    let pending = session.begin_login(email(), Duration::from_millis(1500));
    assert!(!pending.is_ready(start));
    let credentials = pending
        .try_resolve(start + Duration::from_millis(1500))
        .unwrap_or_else(|_| panic!("login still pending"));
    session.complete_login(&credentials).unwrap();

    let reopened = Session::open(dir.path()).unwrap();
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.store().get("auth_token"), Some("mock_token"));

    let contents = fs::read_to_string(reopened.store().path()).unwrap();
    assert!(!contents.contains("hunter2"));
}

#[test]
fn test_logout_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(dir.path()).unwrap();
    session
        .complete_login(&Credentials::Wallet {
            private_key: "secret".to_string(),
        })
        .unwrap();
    session.logout().unwrap();

    let reopened = Session::open(dir.path()).unwrap();
    assert!(!reopened.is_authenticated());
    assert_eq!(reopened.store().get("auth_token"), None);
}

#[test]
fn test_unreadable_store_is_reported() {
    let dir = TempDir::new().unwrap();
    let session = Session::open(dir.path()).unwrap();
    fs::write(session.store().path(), "{ not json").unwrap();

    match Session::open(dir.path()) {
        Err(SessionError::Parse { path, .. }) => assert_eq!(path, session.store().path()),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_wait_returns_credentials() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(dir.path()).unwrap();
    let credentials = session
        .begin_login(
            Credentials::Node {
                node_id: "02abc".to_string(),
            },
            Duration::from_millis(10),
        )
        .wait()
        .await;
    assert_eq!(credentials.identifier(), Some("02abc"));
    session.complete_login(&credentials).unwrap();
    assert!(session.is_authenticated());
}
