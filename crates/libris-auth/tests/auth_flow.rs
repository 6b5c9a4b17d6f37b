//! Login, maintenance gate, introspection and activation flows.

mod common;

use common::{ACCESS_TTL, TestApp};
use libris_auth::{TokenType, VerifyMode};
use libris_core::ErrorKind;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.add_account("reader@libris.test", "pw", true, &["USER"]);

    let result = app
        .orchestrator
        .authenticate("reader@libris.test", "pw")
        .await
        .unwrap();
    assert_eq!(result.first_login, None);

    let access = app
        .verifier
        .verify(&result.access_token, VerifyMode::Access)
        .await
        .unwrap();
    assert_eq!(access.sub, "reader@libris.test");
    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(access.scope, "ROLE_USERUSER_ACCESS");

    let refresh = app
        .verifier
        .verify(&result.refresh_token, VerifyMode::Refresh)
        .await
        .unwrap();
    assert_eq!(refresh.token_type, TokenType::Refresh);
}

#[tokio::test]
async fn test_login_reports_first_login() {
    let app = TestApp::new();
    let id = app.add_account("new@libris.test", "pw", true, &["USER"]);
    let mut snapshot = app.snapshot("new@libris.test").await;
    snapshot.account.first_login = true;
    app.accounts.remove(id);
    app.accounts.insert(snapshot);

    let result = app
        .orchestrator
        .authenticate("new@libris.test", "pw")
        .await
        .unwrap();
    assert_eq!(result.first_login, Some(true));
}

#[tokio::test]
async fn test_wrong_password_is_credential_mismatch() {
    let app = TestApp::new();
    app.add_account("reader@libris.test", "pw", true, &["USER"]);

    let err = app
        .orchestrator
        .authenticate("reader@libris.test", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::CredentialMismatch);
}

#[tokio::test]
async fn test_verified_credentials_without_account() {
    let app = TestApp::new();
    app.credentials.set("orphan@libris.test", "pw");

    let err = app
        .orchestrator
        .authenticate("orphan@libris.test", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccountNotFound);
}

#[tokio::test]
async fn test_inactive_account_rejected() {
    let app = TestApp::new();
    app.add_account("pending@libris.test", "pw", false, &["USER"]);

    let err = app
        .orchestrator
        .authenticate("pending@libris.test", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccountInactive);
}

#[tokio::test]
async fn test_maintenance_blocks_plain_users_only() {
    let app = TestApp::new();
    app.add_account("reader@libris.test", "pw", true, &["USER"]);
    app.add_account("admin@libris.test", "pw", true, &["ADMIN"]);
    app.add_account("staff@libris.test", "pw", true, &["USER", "LIBRARIAN"]);
    app.add_account("nobody@libris.test", "pw", true, &[]);
    app.maintenance.set(true);

    let err = app
        .orchestrator
        .authenticate("reader@libris.test", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MaintenanceBlocked);

    let err = app
        .orchestrator
        .authenticate("nobody@libris.test", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MaintenanceBlocked);

    assert!(app.orchestrator.authenticate("admin@libris.test", "pw").await.is_ok());
    assert!(app.orchestrator.authenticate("staff@libris.test", "pw").await.is_ok());

    app.maintenance.set(false);
    assert!(app.orchestrator.authenticate("reader@libris.test", "pw").await.is_ok());
}

#[tokio::test]
async fn test_maintenance_checked_before_active_flag() {
    let app = TestApp::new();
    app.add_account("pending@libris.test", "pw", false, &["USER"]);
    app.maintenance.set(true);

    let err = app
        .orchestrator
        .authenticate("pending@libris.test", "pw")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MaintenanceBlocked);
}

#[tokio::test]
async fn test_introspect_fresh_token_is_valid() {
    let app = TestApp::new();
    app.add_account("reader@libris.test", "pw", true, &["USER"]);
    let login = app
        .orchestrator
        .authenticate("reader@libris.test", "pw")
        .await
        .unwrap();

    let report = app.orchestrator.introspect(&login.access_token).await.unwrap();
    assert!(report.valid);
}

#[tokio::test]
async fn test_introspect_invalid_tokens() {
    let app = TestApp::new();
    app.add_account("reader@libris.test", "pw", true, &["USER"]);
    let login = app
        .orchestrator
        .authenticate("reader@libris.test", "pw")
        .await
        .unwrap();

    assert!(!app.orchestrator.introspect("garbage").await.unwrap().valid);

    app.clock.advance(ACCESS_TTL + 1);
    assert!(!app.orchestrator.introspect(&login.access_token).await.unwrap().valid);
}

#[tokio::test]
async fn test_introspect_refresh_token_is_not_valid() {
    let app = TestApp::new();
    app.add_account("reader@libris.test", "pw", true, &["USER"]);
    let login = app
        .orchestrator
        .authenticate("reader@libris.test", "pw")
        .await
        .unwrap();

    let report = app.orchestrator.introspect(&login.refresh_token).await.unwrap();
    assert!(!report.valid);
}

#[tokio::test]
async fn test_activation_is_single_use() {
    let app = TestApp::new();
    let id = app.add_account("pending@libris.test", "pw", false, &["USER"]);

    let activation = app
        .orchestrator
        .issue_activation_token("pending@libris.test")
        .await
        .unwrap();
    app.orchestrator.activate(&activation.token).await.unwrap();
    assert!(app.accounts.is_active(id));

    let err = app.orchestrator.activate(&activation.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);

    assert!(app.orchestrator.authenticate("pending@libris.test", "pw").await.is_ok());
}

#[tokio::test]
async fn test_activation_rejects_refresh_token() {
    let app = TestApp::new();
    app.add_account("pending@libris.test", "pw", false, &["USER"]);
    let snapshot = app.snapshot("pending@libris.test").await;
    let refresh = app.issuer.issue_refresh_token(&snapshot).unwrap();

    let err = app.orchestrator.activate(&refresh.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::WrongTokenType);
}

#[tokio::test]
async fn test_activation_for_deleted_account() {
    let app = TestApp::new();
    let id = app.add_account("gone@libris.test", "pw", false, &["USER"]);
    let activation = app
        .orchestrator
        .issue_activation_token("gone@libris.test")
        .await
        .unwrap();
    app.accounts.remove(id);

    let err = app.orchestrator.activate(&activation.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccountNotFound);
}

#[tokio::test]
async fn test_expired_activation_token() {
    let app = TestApp::new();
    app.add_account("late@libris.test", "pw", false, &["USER"]);
    let activation = app
        .orchestrator
        .issue_activation_token("late@libris.test")
        .await
        .unwrap();

    app.clock.advance(ACCESS_TTL);
    let err = app.orchestrator.activate(&activation.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
}

#[tokio::test]
async fn test_activation_token_for_unknown_email() {
    let app = TestApp::new();
    let err = app
        .orchestrator
        .issue_activation_token("ghost@libris.test")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccountNotFound);
}
