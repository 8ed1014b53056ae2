//! Object storage for uploaded photos

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Blob storage addressed only by caller-chosen keys
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL of the object
    async fn put(&self, key: &str, bytes: Arc<[u8]>, content_type: &str) -> Result<String, StoreError>;
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Arc<[u8]>,
    pub content_type: String,
}

/// Object store kept in memory
#[derive(Clone)]
pub struct MemoryObjectStore {
    public_base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryObjectStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
            objects: Arc::default(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// All stored keys, sorted
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: Arc<[u8]>, content_type: &str) -> Result<String, StoreError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("{}/{}", self.public_base_url.trim_end_matches('/'), key))
    }
}

/// Object store accepting `PUT {upload_url}/{key}` with the raw bytes
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    upload_url: String,
    public_base_url: String,
}

impl HttpObjectStore {
    pub fn new(client: Client, upload_url: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            upload_url: upload_url.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

/// Append each `/`-separated part of `key` to `base` as an encoded path segment
fn object_url(base: &str, key: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(base).map_err(|e| StoreError::Backend(format!("Invalid object store URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| StoreError::Backend("Object store URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(key.split('/'));
    Ok(url)
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: Arc<[u8]>, content_type: &str) -> Result<String, StoreError> {
        let response = self
            .client
            .put(object_url(&self.upload_url, key)?)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(object_url(&self.public_base_url, key)?.to_string())
    }
}
