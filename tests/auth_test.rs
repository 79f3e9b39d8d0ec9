//! Integration tests for admin authentication.

mod common;

use common::{base_url, TestHarness, ADMIN_PASSWORD, ADMIN_USER, API_KEY};
use serde_json::{json, Value};

async fn login(base: &str, username: &str, password: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/auth/login"))
        .json(&json!({"username": username, "password": password}))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn admin_rejects_missing_token() {
    let (_h, addr) = TestHarness::with_auth_server().await;
    let base = base_url(addr);

    let resp = reqwest::get(format!("{base}/api/admin/projects")).await.unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "unauthorized");

    let resp = reqwest::Client::new()
        .get(format!("{base}/api/admin/projects"))
        .bearer_auth("wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn api_key_grants_access() {
    let (_h, addr) = TestHarness::with_auth_server().await;
    let base = base_url(addr);

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/admin/skills"))
        .bearer_auth(API_KEY)
        .json(&json!({"name": "Rust"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
}

#[tokio::test]
async fn login_issues_token_and_cookie() {
    let (_h, addr) = TestHarness::with_auth_server().await;
    let base = base_url(addr);

    let resp = login(&base, ADMIN_USER, ADMIN_PASSWORD).await;
    assert_eq!(resp.status(), 200);
    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("folio_session="));
    assert!(cookie.contains("HttpOnly"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().unwrap().to_string();

    let resp = reqwest::Client::new()
        .get(format!("{base}/api/admin/profiles"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = reqwest::Client::new()
        .get(format!("{base}/api/admin/profiles"))
        .header("cookie", format!("folio_session={token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let (_h, addr) = TestHarness::with_auth_server().await;
    let base = base_url(addr);

    let resp = login(&base, ADMIN_USER, "hunter2").await;
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("set-cookie").is_none());

    let resp = login(&base, "someone-else", ADMIN_PASSWORD).await;
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn logout_invalidates_session() {
    let (_h, addr) = TestHarness::with_auth_server().await;
    let base = base_url(addr);

    let body: Value = login(&base, ADMIN_USER, ADMIN_PASSWORD)
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/auth/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = reqwest::Client::new()
        .get(format!("{base}/api/admin/skills"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn status_reports_authentication() {
    let (_h, addr) = TestHarness::with_auth_server().await;
    let base = base_url(addr);

    let body: Value = reqwest::get(format!("{base}/api/auth/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"auth_enabled": true, "authenticated": false}));

    let body: Value = reqwest::Client::new()
        .get(format!("{base}/api/auth/status"))
        .bearer_auth(API_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn disabled_auth_is_open() {
    let (_h, addr) = TestHarness::with_server().await;
    let base = base_url(addr);

    let resp = reqwest::get(format!("{base}/api/admin/skills")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = login(&base, "anyone", "anything").await.json().await.unwrap();
    assert_eq!(body["message"], "Auth disabled");
    assert!(body.get("token").is_none());
}
