//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use care_api::{create_app, create_app_state};
use care_common::AppConfig;
use care_service::webhook::{sign_payload, SIGNATURE_HEADER};
use reqwest::{multipart, Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret used when `STRIPE_WEBHOOK_SECRET` is not set
pub const TEST_WEBHOOK_SECRET: &str = "whsec_integration";

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19500);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    webhook_secret: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let webhook_secret = config.stripe.webhook_secret.clone();

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            webhook_secret,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POST a multipart form: `data` as JSON plus an optional file
    pub async fn post_form(
        &self,
        path: &str,
        data: &Value,
        file: Option<(&str, Vec<u8>)>,
    ) -> Result<Response> {
        let mut form = multipart::Form::new().text("data", data.to_string());
        if let Some((name, bytes)) = file {
            form = form.part("file", multipart::Part::bytes(bytes).file_name(name.to_string()));
        }
        Ok(self.client.post(self.url(path)).multipart(form).send().await?)
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).json(body).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Deliver a webhook event signed with the server's secret
    pub async fn post_webhook(&self, event: &Value) -> Result<Response> {
        let payload = serde_json::to_vec(event)?;
        let signature = sign_payload(
            &payload,
            &self.webhook_secret,
            chrono::Utc::now().timestamp(),
        )?;
        Ok(self
            .client
            .post(self.url("/webhook"))
            .header(SIGNATURE_HEADER, signature)
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await?)
    }
}

/// Create a test configuration from the environment, filling in what a
/// local test run does not need to provide
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_lookup(|key| match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => match key {
            "STRIPE_WEBHOOK_SECRET" => Some(TEST_WEBHOOK_SECRET.to_string()),
            "MIGRATIONS_DIR" => Some(concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations").to_string()),
            "UPLOAD_DIR" => Some(
                std::env::temp_dir()
                    .join("care-integration-uploads")
                    .display()
                    .to_string(),
            ),
            "RATE_LIMIT_BURST" => Some("1000".to_string()),
            _ => None,
        },
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse the JSON envelope
pub async fn assert_json(response: Response, expected_status: StatusCode) -> Result<Value> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
