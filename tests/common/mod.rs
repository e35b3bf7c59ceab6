// Shared harness: in-memory state, stub AI providers, request helpers.
// Each test binary compiles this module separately and uses a subset.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use slidecraft::ai::providers::{ProviderError, SlideProvider};
use slidecraft::ai::SlideGenerator;
use slidecraft::auth::token::TokenKeys;
use slidecraft::config::Config;
use slidecraft::db;
use slidecraft::routes;
use slidecraft::state::AppState;

/// Canned provider: fixed response, counts calls.
pub struct StubProvider {
    name: &'static str,
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn ok(name: &'static str, response: String) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: Ok(response),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str, message: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SlideProvider for StubProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(ProviderError::Malformed(msg.clone())),
        }
    }
}

/// A provider response with `n` well-formed slides.
pub fn slides_json(n: usize) -> String {
    let items: Vec<String> = (1..=n)
        .map(|i| format!(r#"{{"title": "Slide {i}", "content": "Body {i}"}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

pub fn test_app(
    gemini: Arc<dyn SlideProvider>,
    openrouter: Arc<dyn SlideProvider>,
) -> Router {
    let pool = db::create_memory_pool().expect("memory pool");
    db::run_migrations(&pool).expect("migrations");

    let state = AppState {
        db: pool,
        config: Config::default(),
        generator: Arc::new(SlideGenerator::with_providers(gemini, openrouter)),
        token_keys: Arc::new(TokenKeys::new("integration-test-secret", 24)),
    };
    routes::app(state)
}

/// App with a working gemini stub answering `slides` slides.
pub fn app_with_slides(slides: usize) -> Router {
    test_app(
        StubProvider::ok("gemini", slides_json(slides)),
        StubProvider::failing("openrouter", "unused"),
    )
}

pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Drive one request; parse the body as JSON (Null for empty bodies).
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Drive one request; return the raw body (export endpoints).
pub async fn send_raw(
    app: &Router,
    req: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(req).await.expect("request");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, headers, bytes.to_vec())
}

/// Register a fresh user and return their bearer token.
pub async fn register_user(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Test User",
                "email": email,
                "password": "hunter22",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().expect("token").to_string()
}

/// Generate a deck through the API; returns the presentation id.
pub async fn generate_deck(app: &Router, token: &str, prompt: &str, count: usize) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/presentations/generate",
            Some(token),
            Some(json!({ "prompt": prompt, "slides_count": count })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "generate failed: {body}");
    body["presentation"]["id"]
        .as_str()
        .expect("presentation id")
        .to_string()
}
