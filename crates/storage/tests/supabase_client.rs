//! Exercises [`SupabaseStorage`] against an in-process fake of the storage
//! REST API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, post};
use axum::{Json, Router};
use belva_storage::{ObjectStorage, StorageConfig, StorageError, SupabaseStorage, UploadFile};
use serde_json::{json, Value};

#[derive(Default)]
struct Recorded {
    uploads: Vec<(String, String, Option<String>, usize)>,
    removed: Vec<(String, Value)>,
}

type Shared = Arc<Mutex<Recorded>>;

async fn upload(
    State(rec): State<Shared>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<Value>, StatusCode> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if auth.as_deref() != Some("Bearer secret-key") {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let key = format!("{bucket}/{path}");
    rec.lock()
        .unwrap()
        .uploads
        .push((bucket, path, auth, body.len()));
    Ok(Json(json!({ "Key": key })))
}

async fn list(Path(_bucket): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["prefix"], "post-1");
    Json(json!([{ "name": "a.png" }, { "name": "b.gif" }]))
}

async fn remove(
    State(rec): State<Shared>,
    Path(bucket): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.lock().unwrap().removed.push((bucket, body));
    Json(json!([]))
}

async fn spawn_fake() -> (String, Shared) {
    let rec: Shared = Arc::default();
    let app = Router::new()
        .route("/object/list/{bucket}", post(list))
        .route("/object/{bucket}", delete(remove))
        .route("/object/{bucket}/{*path}", post(upload))
        .with_state(rec.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), rec)
}

fn client(url: &str, key: &str) -> SupabaseStorage {
    SupabaseStorage::new(StorageConfig {
        url: url.to_string(),
        api_key: key.to_string(),
    })
    .unwrap()
}

fn png(name: &str) -> UploadFile {
    UploadFile {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![1, 2, 3, 4],
    }
}

#[tokio::test]
async fn upload_posts_bytes_under_folder() {
    let (url, rec) = spawn_fake().await;
    let storage = client(&url, "secret-key");

    let stored = storage
        .upload("blog-cover-photos", "post-1", png("cover.png"))
        .await
        .unwrap();

    assert!(stored.key.starts_with("blog-cover-photos/post-1/"));
    assert!(stored.key.ends_with(".png"));
    assert!(stored.key.ends_with(&stored.file_name));

    let rec = rec.lock().unwrap();
    assert_eq!(rec.uploads.len(), 1);
    let (bucket, path, _, size) = &rec.uploads[0];
    assert_eq!(bucket, "blog-cover-photos");
    assert_eq!(path, &format!("post-1/{}", stored.file_name));
    assert_eq!(*size, 4);
}

#[tokio::test]
async fn upload_with_wrong_key_reports_status() {
    let (url, _) = spawn_fake().await;
    let storage = client(&url, "wrong");

    let err = storage
        .upload("blog-cover-photos", "post-1", png("cover.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn upload_without_extension_never_hits_the_network() {
    let storage = client("http://127.0.0.1:1", "secret-key");
    let err = storage
        .upload("blog-cover-photos", "post-1", png("cover"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Rejected(_)));
}

#[tokio::test]
async fn remove_splits_bucket_from_path() {
    let (url, rec) = spawn_fake().await;
    let storage = client(&url, "secret-key");

    storage
        .remove("blog-cover-photos/post-1/a.png")
        .await
        .unwrap();

    let rec = rec.lock().unwrap();
    assert_eq!(rec.removed[0].0, "blog-cover-photos");
    assert_eq!(rec.removed[0].1, json!({ "prefixes": ["post-1/a.png"] }));
}

#[tokio::test]
async fn remove_folder_deletes_every_listed_object() {
    let (url, rec) = spawn_fake().await;
    let storage = client(&url, "secret-key");

    let count = storage
        .remove_folder("blog-body-photos", "post-1")
        .await
        .unwrap();
    assert_eq!(count, 2);

    let rec = rec.lock().unwrap();
    assert_eq!(
        rec.removed[0].1,
        json!({ "prefixes": ["post-1/a.png", "post-1/b.gif"] })
    );
}
