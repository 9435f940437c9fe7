//! Integration tests for the HTTP-backed runtime environment cache.
//!
//! Each test serves a canned response from a local axum server and counts
//! the requests that reach it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::future::join_all;

use common::AppError;
use domain::EnvKey;
use runtime_env::{EnvSource, HttpEnvSource, RuntimeEnvCache, RuntimeEnvConfig};

// =============================================================================
// Test Backend
// =============================================================================

#[derive(Clone)]
struct Backend {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

impl Backend {
    fn ok(body: &'static str) -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn runtime_env_handler(State(backend): State<Backend>) -> impl IntoResponse {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(backend.delay).await;
    (
        backend.status,
        [(header::CONTENT_TYPE, "application/json")],
        backend.body,
    )
}

async fn serve(backend: Backend) -> SocketAddr {
    let app = Router::new()
        .route("/api/runtime-env", get(runtime_env_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> RuntimeEnvConfig {
    RuntimeEnvConfig::for_backend(format!("http://{}", addr))
}

fn cache_for(addr: SocketAddr) -> RuntimeEnvCache {
    RuntimeEnvCache::from_config(&config_for(addr)).unwrap()
}

// =============================================================================
// Cache Behavior
// =============================================================================

#[tokio::test]
async fn test_successful_fetch_serves_known_keys() {
    let backend = Backend::ok(r#"{"VITE_AWS_REGION":"us-east-1"}"#);
    let cache = cache_for(serve(backend.clone()).await);

    assert_eq!(
        cache.get_config_value(EnvKey::AwsRegion).await.as_deref(),
        Some("us-east-1")
    );
    assert_eq!(cache.get_config_value(EnvKey::S3BucketName).await, None);
    assert_eq!(cache.get_config_value(EnvKey::AwsAccessKeyId).await, None);
    assert_eq!(cache.get_config_value(EnvKey::AwsSecretAccessKey).await, None);
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_success_is_memoized() {
    let backend = Backend::ok(r#"{"VITE_S3_BUCKET_NAME":"uploads"}"#);
    let cache = cache_for(serve(backend.clone()).await);

    let first = cache.get_config().await;
    let second = cache.get_config().await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_request() {
    let backend = Backend::ok(r#"{"VITE_AWS_REGION":"eu-central-1"}"#)
        .with_delay(Duration::from_millis(100));
    let cache = cache_for(serve(backend.clone()).await);

    let results = join_all((0..10).map(|_| cache.get_config())).await;

    assert_eq!(backend.hits(), 1);
    assert!(results.iter().all(|env| Arc::ptr_eq(env, &results[0])));
    assert_eq!(results[0].get(EnvKey::AwsRegion), Some("eu-central-1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_share_one_request() {
    let backend = Backend::ok(r#"{"VITE_AWS_ACCESS_KEY_ID":"AKIA0000"}"#)
        .with_delay(Duration::from_millis(100));
    let cache = Arc::new(cache_for(serve(backend.clone()).await));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_config().await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(backend.hits(), 1);
    assert!(results.iter().all(|env| Arc::ptr_eq(env, &results[0])));
}

#[tokio::test]
async fn test_server_error_resolves_to_empty_mapping() {
    let backend =
        Backend::ok(r#"{"error":"boom"}"#).with_status(StatusCode::INTERNAL_SERVER_ERROR);
    let cache = cache_for(serve(backend.clone()).await);

    assert!(cache.get_config().await.is_empty());
    for key in EnvKey::ALL {
        assert_eq!(cache.get_config_value(key).await, None);
    }
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_invalid_body_resolves_to_empty_mapping() {
    let backend = Backend::ok("<html>not json</html>");
    let cache = cache_for(serve(backend.clone()).await);

    assert!(cache.get_config().await.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_resolves_to_empty_mapping() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cache = cache_for(addr);
    assert!(cache.get_config().await.is_empty());
    assert_eq!(cache.get_config_value(EnvKey::AwsRegion).await, None);
}

#[tokio::test]
async fn test_refresh_populates_cache() {
    let backend = Backend::ok(r#"{"VITE_AWS_REGION":"us-west-2"}"#);
    let cache = cache_for(serve(backend.clone()).await);
    assert!(cache.cached().is_none());

    let refreshed = cache.refresh().await;
    assert_eq!(refreshed.get(EnvKey::AwsRegion), Some("us-west-2"));
    assert!(Arc::ptr_eq(&refreshed, &cache.cached().unwrap()));
    assert_eq!(backend.hits(), 1);
}

// =============================================================================
// HTTP Source Errors
// =============================================================================

#[tokio::test]
async fn test_source_reports_status() {
    let backend = Backend::ok("{}").with_status(StatusCode::NOT_FOUND);
    let addr = serve(backend).await;
    let source = HttpEnvSource::new(&config_for(addr).http).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, AppError::Status { status: 404, .. }));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn test_source_reports_decode_error() {
    let backend = Backend::ok(r#"{"VITE_AWS_REGION":["us-east-1"]}"#);
    let addr = serve(backend).await;
    let source = HttpEnvSource::new(&config_for(addr).http).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)));
}

#[tokio::test]
async fn test_source_times_out() {
    let backend = Backend::ok("{}").with_delay(Duration::from_secs(5));
    let addr = serve(backend).await;

    let mut config = config_for(addr);
    config.http.request_timeout_ms = 100;
    let source = HttpEnvSource::new(&config.http).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, AppError::Request(ref e) if e.is_timeout()));
}
