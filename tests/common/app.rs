use axum_test::TestServer;
use tempfile::TempDir;
use taskflow::build_router;
use taskflow::config::{Config, LogFormat};
use taskflow::state::AppState;

/// Test configuration
pub fn test_config(database_url: String) -> Config {
    Config {
        database_url,
        database_max_connections: 5,
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_expiration_minutes: 15,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origin: "http://localhost:3000".to_string(),
        log_format: LogFormat::Text,
    }
}

/// Test application wrapper, one SQLite file per instance
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application on the in-process transport
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// Create a test application served over real HTTP (needed for WebSockets)
    pub async fn with_http_transport() -> Self {
        Self::build(true).await
    }

    async fn build(http_transport: bool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!("sqlite://{}", dir.path().join("taskflow.db").display());

        let state = AppState::new(test_config(database_url))
            .await
            .expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = if http_transport {
            TestServer::builder().http_transport().build(router)
        } else {
            TestServer::new(router)
        }
        .expect("Failed to create test server");

        Self {
            server,
            state,
            _dir: dir,
        }
    }
}
