#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use medium_api_rust::auth::{generate_jwt, Claims};
use medium_api_rust::database::{DatabaseError, MemoryPostStore, NewPost, Post, PostChanges, PostStore};
use medium_api_rust::AppState;

pub const SECRET: &str = "integration-test-secret";

/// Memory store that counts every call reaching it
#[derive(Clone, Default)]
pub struct CountingStore {
    pub inner: MemoryPostStore,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostStore for CountingStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        self.hit();
        self.inner.create(post).await
    }

    async fn update_owned(&self, id: &str, author_id: &str, changes: PostChanges) -> Result<Post, DatabaseError> {
        self.hit();
        self.inner.update_owned(id, author_id, changes).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DatabaseError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.inner.ping().await
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: CountingStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_legacy_status(true)
    }

    pub fn with_legacy_status(legacy: bool) -> Self {
        let store = CountingStore::default();
        let mut state = AppState::new(Arc::new(store.clone()), SECRET);
        state.legacy_validation_status = legacy;
        let router = medium_api_rust::app(state, false);
        Self { router, store }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        match body {
            Some(json) => {
                self.send_raw(method, uri, authorization, Some("application/json"), json.to_string())
                    .await
            }
            None => self.send_raw(method, uri, authorization, None, String::new()).await,
        }
    }

    /// Send `body` verbatim, with `content_type` only when given
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        content_type: Option<&str>,
        body: String,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        if let Some(value) = content_type {
            builder = builder.header(header::CONTENT_TYPE, value);
        }
        let request = builder.body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await?.to_vec();

        Ok(TestResponse { status, content_type, body })
    }
}

/// `Authorization` header value for `subject`, signed with the test secret
pub fn bearer(subject: &str) -> String {
    let token = generate_jwt(&Claims::new(subject, 1).expect("claims"), SECRET).expect("token");
    format!("Bearer {}", token)
}

pub fn bearer_with_secret(subject: &str, secret: &str) -> String {
    let token = generate_jwt(&Claims::new(subject, 1).expect("claims"), secret).expect("token");
    format!("Bearer {}", token)
}
