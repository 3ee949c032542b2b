//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use atrium_configs::ServerConfig;
use atrium_server::lifecycle::{self, RunningTestHttpServer};
use atrium_supervisor::{ProcessControl, Supervisor, SupervisorError};

/// Root credentials the test server is seeded with.
pub const ROOT_USERNAME: &str = "root";
pub const ROOT_PASSWORD: &str = "RootPassw0rd!";

/// Process-control double: records decisions, never exits the runner.
#[derive(Default)]
pub struct FakeProcessControl {
    pub supervisor: Option<Supervisor>,
    pub events: Mutex<Vec<String>>,
}

impl FakeProcessControl {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProcessControl for FakeProcessControl {
    fn detect_supervisor(&self) -> Option<Supervisor> {
        self.supervisor.clone()
    }

    fn issue_restart(&self, supervisor: &Supervisor) -> Result<(), SupervisorError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("restart:{:?}", supervisor));
        Ok(())
    }

    fn terminate(&self, code: i32) -> Result<(), SupervisorError> {
        self.events.lock().unwrap().push(format!("terminate:{}", code));
        Ok(())
    }

    fn force_terminate(&self, code: i32) {
        self.events
            .lock()
            .unwrap()
            .push(format!("force_terminate:{}", code));
    }
}

fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.root_password = ROOT_PASSWORD.to_string();
    config.logging.log_to_console = false;
    config
}

/// Spawn a full HTTP server on an ephemeral port.
///
/// Restart requests go to the returned fake control with a short delay,
/// so tests can observe the scheduled action without being terminated.
pub async fn spawn_server() -> (RunningTestHttpServer, Arc<FakeProcessControl>) {
    let config = test_config();
    let control = Arc::new(FakeProcessControl::default());
    let components = lifecycle::bootstrap_isolated(
        &config,
        control.clone(),
        Duration::from_millis(50),
    )
    .await
    .expect("bootstrap failed");

    let server = lifecycle::run_for_tests(&config, components)
        .await
        .expect("server failed to start");
    (server, control)
}

/// Log in and return the bearer token, panicking on failure.
pub async fn login(client: &reqwest::Client, base_url: &str, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/v1/api/auth/login", base_url))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request failed");
    assert!(
        response.status().is_success(),
        "login failed with status {}",
        response.status()
    );

    let body: serde_json::Value = response.json().await.expect("login body not json");
    body["access_token"]
        .as_str()
        .expect("missing access_token")
        .to_string()
}

/// Create a user through the API and return its id.
pub async fn create_user(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    username: &str,
    password: &str,
) -> String {
    let response = client
        .post(format!("{}/v1/api/users", base_url))
        .bearer_auth(token)
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("create request failed");
    assert_eq!(response.status(), 201, "create user failed");

    let body: serde_json::Value = response.json().await.expect("create body not json");
    body["user_id"].as_str().expect("missing user_id").to_string()
}
