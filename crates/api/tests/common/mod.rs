//! Shared fixtures for the HTTP-level integration tests.
//!
//! [`build_test_app`] wires the production router (same middleware stack as
//! `main.rs`) to in-memory fakes for object storage and email.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use belva_api::auth::jwt::{generate_admin_token, generate_user_token, JwtConfig};
use belva_api::auth::password::hash_password;
use belva_api::config::{AdminCredentials, ServerConfig};
use belva_api::router::build_app_router;
use belva_api::state::AppState;
use belva_events::{EmailError, Mailer, NotificationDispatcher, OutgoingEmail};
use belva_storage::{ObjectStorage, StorageError, StoredObject, UploadFile};

pub const ADMIN_USERNAME: &str = "studio-admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const ADMIN_EMAIL: &str = "admin@belva.test";
pub const STORAGE_URL: &str = "http://storage.test";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory [`ObjectStorage`] that applies the real upload policy.
#[derive(Default)]
pub struct FakeStorage {
    /// Stored key -> size in bytes.
    pub objects: Mutex<BTreeMap<String, usize>>,
    /// When set, every removal fails.
    pub fail_removals: AtomicBool,
}

impl FakeStorage {
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn insert(&self, key: &str) {
        self.objects.lock().unwrap().insert(key.to_string(), 1);
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        bucket: &str,
        folder: &str,
        file: UploadFile,
    ) -> Result<StoredObject, StorageError> {
        let file_name = file.checked_object_name()?;
        let key = format!("{bucket}/{folder}/{file_name}");
        self.objects
            .lock()
            .unwrap()
            .insert(key.clone(), file.bytes.len());
        Ok(StoredObject { key, file_name })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(StorageError::HttpStatus {
                status: 503,
                body: "unavailable".into(),
            });
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn remove_folder(&self, bucket: &str, folder: &str) -> Result<usize, StorageError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(StorageError::HttpStatus {
                status: 503,
                body: "unavailable".into(),
            });
        }
        let prefix = format!("{bucket}/{folder}/");
        let mut objects = self.objects.lock().unwrap();
        let before = objects.len();
        objects.retain(|k, _| !k.starts_with(&prefix));
        Ok(before - objects.len())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{STORAGE_URL}/object/public/{key}")
    }
}

/// [`Mailer`] that records every message it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    /// When set, every send fails (nothing is recorded).
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError::Build("relay unavailable".into()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Argon2 is slow on purpose; hash the fixture credentials once per binary.
fn admin_credentials() -> &'static AdminCredentials {
    static CREDS: OnceLock<AdminCredentials> = OnceLock::new();
    CREDS.get_or_init(|| AdminCredentials {
        username_hash: hash_password(ADMIN_USERNAME).unwrap(),
        password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
    })
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        user_secret: "test-user-secret-that-is-long-enough".to_string(),
        admin_secret: "test-admin-secret-that-is-long-enough".to_string(),
        expiry_hours: 72,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        jwt: test_jwt_config(),
        admin: admin_credentials().clone(),
        admin_email: ADMIN_EMAIL.to_string(),
        notification_concurrency: 4,
        notification_timeout_secs: 5,
    }
}

/// Handles to the fakes behind a test app.
pub struct TestApp {
    pub router: Router,
    pub storage: Arc<FakeStorage>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// A fresh clone of the router for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub fn build_test_app_with_fakes(pool: PgPool) -> TestApp {
    let storage = Arc::new(FakeStorage::default());
    let mailer = Arc::new(RecordingMailer::default());
    let config = test_config();

    let notifier = Arc::new(NotificationDispatcher::new(
        mailer.clone(),
        config.notification_concurrency,
        Duration::from_secs(config.notification_timeout_secs),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        storage: storage.clone(),
        notifier,
    };

    TestApp {
        router: build_app_router(state),
        storage,
        mailer,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_fakes(pool).router
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    generate_admin_token(ADMIN_USERNAME, &test_jwt_config()).unwrap()
}

pub fn user_token() -> String {
    generate_user_token("session-abc", &test_jwt_config()).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

/// POST a body that is sent verbatim, for malformed-JSON cases.
pub async fn send_raw_json(app: Router, uri: &str, raw: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(raw.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send a raw request with a custom `Authorization` header value.
pub async fn get_with_authorization(app: Router, uri: &str, value: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, value)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "belva-test-boundary";

pub enum Part<'a> {
    Text(&'a str, &'a str),
    /// Field name, file name, content type, bytes.
    File(&'a str, &'a str, &'a str, Vec<u8>),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, content_type, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}
