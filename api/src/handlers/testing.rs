//! Helpers for driving the full router in-process.

use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, LazyLock},
};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use mcontrol_db::storage::{Storage, memory::MemoryStorage};
use serde_json::Value;
use tower::ServiceExt;

use crate::{config::McontrolApiConfig, server};

pub const TEST_PASSWORD: &str = "correct horse";
pub const TEST_SECRET: &str = "test-secret";

/// Low-cost hash so login tests stay fast.
static TEST_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| bcrypt::hash(TEST_PASSWORD, 4).unwrap());

pub fn test_config() -> McontrolApiConfig {
    McontrolApiConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        dump_openapi: false,
        mongodb_uri: String::new(),
        jwt_secret: TEST_SECRET.into(),
        password_hash: TEST_PASSWORD_HASH.clone(),
        node_env: "test".into(),
        cors_origin: None,
        static_dir: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MemoryStorage::new())
    }

    pub fn with_store(store: MemoryStorage) -> Self {
        let store = Arc::new(store);
        let router = server::make(test_config(), store.clone() as Arc<dyn Storage>);
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    /// Logs in with the test password and returns the issued token.
    pub async fn login(&self) -> String {
        let body = serde_json::json!({ "password": TEST_PASSWORD });
        let (status, body) = self
            .send(request(Method::POST, "/api/login", None, Some(body)))
            .await;

        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
