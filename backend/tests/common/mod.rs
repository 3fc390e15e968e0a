//! Common test utilities for integration tests
//!
//! Every app runs on in-memory storage with a fixed clock. The model is
//! either a scripted generator or a real `GeminiClient` pointed at a mock
//! server.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use nutriscan_backend::config::AppConfig;
use nutriscan_backend::repositories::InMemoryMealRepository;
use nutriscan_backend::services::gemini::GenerateContentRequest;
use nutriscan_backend::services::{ContentGenerator, FixedClock, GeminiClient, GeminiError};
use nutriscan_backend::{routes, state::AppState};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// 2024-06-12 10:30, a Wednesday
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 12)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

pub fn test_today() -> NaiveDate {
    test_now().date()
}

/// Replays queued replies; an empty queue answers with no text
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<Option<String>, GeminiError>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedGenerator {
    pub fn push_text(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(Some(text.into())));
    }

    pub fn push_error(&self, status: u16) {
        self.replies.lock().unwrap().push_back(Err(GeminiError::Api {
            status,
            message: "scripted failure".to_string(),
        }));
    }

    /// Hold every reply for `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<Option<String>, GeminiError> {
        self.requests.lock().unwrap().push(request.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub generator: Arc<ScriptedGenerator>,
}

impl TestApp {
    /// Empty store, scripted model
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let generator = Arc::new(ScriptedGenerator::default());
        let state = AppState::new(
            config,
            Arc::new(InMemoryMealRepository::new()),
            generator.clone(),
            Arc::new(FixedClock(test_now())),
        )
        .expect("Failed to build state");
        let app = routes::create_router(state.clone());

        Self {
            app,
            state,
            generator,
        }
    }

    /// Real HTTP client against `base_url`
    pub fn with_gemini(base_url: &str) -> Self {
        let scripted = Arc::new(ScriptedGenerator::default());
        let client = GeminiClient::new(Some("test-key".to_string()), "gemini-2.5-flash", base_url);
        let state = AppState::new(
            test_config(),
            Arc::new(InMemoryMealRepository::new()),
            Arc::new(client),
            Arc::new(FixedClock(test_now())),
        )
        .expect("Failed to build state");
        let app = routes::create_router(state.clone());

        Self {
            app,
            state,
            generator: scripted,
        }
    }

    async fn send(&self, method: &str, path: &str, body: Option<&str>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("POST", path, Some(body)).await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> (StatusCode, String) {
        self.send("POST", path, None).await
    }

    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("PUT", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.send("DELETE", path, None).await
    }
}

/// Parse a response body
pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, body))
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.seed.enabled = false;
    config
}
