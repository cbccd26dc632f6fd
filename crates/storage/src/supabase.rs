//! Client for the Supabase storage REST API.
//!
//! | Operation | Request                                                  |
//! |-----------|----------------------------------------------------------|
//! | upload    | `POST {url}/object/{bucket}/{path}` raw body, `{Key}` back |
//! | remove    | `DELETE {url}/object/{bucket}` with `{prefixes: [...]}`    |
//! | list      | `POST {url}/object/list/{bucket}` with `{prefix}`          |
//! | public    | `{url}/object/public/{key}`                                |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::policy::UploadFile;
use crate::{split_key, ObjectStorage, StoredObject};

/// HTTP timeout for a single storage request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when listing a folder before removing it.
const LIST_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage API, e.g. `https://<ref>.supabase.co/storage/v1`.
    pub url: String,
    pub api_key: String,
}

impl StorageConfig {
    /// Load from `STORAGE_URL` / `STORAGE_API_KEY`. Returns `None` if either
    /// is unset.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            url: std::env::var("STORAGE_URL").ok()?,
            api_key: std::env::var("STORAGE_API_KEY").ok()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: String,
}

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,
}

#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStorage {
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    async fn remove_paths(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(format!("{}/object/{bucket}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&RemoveRequest { prefixes: paths })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`StorageError::HttpStatus`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        folder: &str,
        file: UploadFile,
    ) -> Result<StoredObject, StorageError> {
        let file_name = file.checked_object_name()?;
        let path = format!("{folder}/{file_name}");

        let response = self
            .client
            .post(format!("{}/object/{bucket}/{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.bytes)
            .send()
            .await?;
        let uploaded: UploadResponse = check_status(response).await?.json().await?;

        tracing::debug!(key = %uploaded.key, "Object uploaded");
        Ok(StoredObject {
            key: uploaded.key,
            file_name,
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let (bucket, path) = split_key(key)?;
        self.remove_paths(bucket, &[path.to_string()]).await?;
        tracing::debug!(key, "Object removed");
        Ok(())
    }

    async fn remove_folder(&self, bucket: &str, folder: &str) -> Result<usize, StorageError> {
        let response = self
            .client
            .post(format!("{}/object/list/{bucket}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ListRequest {
                prefix: folder,
                limit: LIST_LIMIT,
            })
            .send()
            .await?;
        let listed: Vec<ListedObject> = check_status(response).await?.json().await?;

        if listed.is_empty() {
            return Ok(0);
        }

        let paths: Vec<String> = listed
            .into_iter()
            .map(|obj| format!("{folder}/{}", obj.name))
            .collect();
        self.remove_paths(bucket, &paths).await?;

        tracing::debug!(bucket, folder, count = paths.len(), "Folder removed");
        Ok(paths.len())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{key}", self.base_url)
    }
}
