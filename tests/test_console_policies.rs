//! End-to-end tests for login settings and the restart endpoint.

mod test_support;

use std::time::Duration;

use test_support::{login, spawn_server, ROOT_PASSWORD, ROOT_USERNAME};

#[actix_web::test]
async fn test_login_settings_validation_and_roundtrip() {
    let (server, _control) = spawn_server().await;
    let client = reqwest::Client::new();
    let token = login(&client, &server.base_url, ROOT_USERNAME, ROOT_PASSWORD).await;

    // Default document is served before anything was saved.
    let current: serde_json::Value = client
        .get(format!("{}/v1/api/settings/login", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["default_login_method"], "account");

    // Empty login methods are refused.
    let response = client
        .put(format!("{}/v1/api/settings/login", server.base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "allowed_login_methods": [],
            "allowed_register_methods": ["account"],
            "default_login_method": "account",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // A default outside the allowed list is refused.
    let response = client
        .put(format!("{}/v1/api/settings/login", server.base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "allowed_login_methods": ["account"],
            "allowed_register_methods": ["account"],
            "default_login_method": "phone",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // A valid document persists and reads back identically.
    let response = client
        .put(format!("{}/v1/api/settings/login", server.base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "allowed_login_methods": ["account", "phone"],
            "allowed_register_methods": ["account"],
            "default_login_method": "account",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let saved: serde_json::Value = client
        .get(format!("{}/v1/api/settings/login", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["allowed_login_methods"], serde_json::json!(["account", "phone"]));

    server.shutdown().await;
}

#[actix_web::test]
async fn test_restart_accepts_once_then_declines() {
    let (server, control) = spawn_server().await;
    let client = reqwest::Client::new();
    let token = login(&client, &server.base_url, ROOT_USERNAME, ROOT_PASSWORD).await;

    let first: serde_json::Value = client
        .post(format!("{}/v1/api/system/restart", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["status"], "accepted");

    // A duplicate request while the restart is pending is declined as a
    // normal response, not an error.
    let second: serde_json::Value = client
        .post(format!("{}/v1/api/system/restart", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["status"], "already_restarting");

    // The scheduled action ran against the process-control seam: no
    // supervisor is detected in tests, so it exited for relaunch.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let events = control.events();
    assert_eq!(events, vec!["terminate:75".to_string()]);

    server.shutdown().await;
}

#[actix_web::test]
async fn test_healthcheck_is_public() {
    let (server, _control) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/v1/api/healthcheck", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    server.shutdown().await;
}
