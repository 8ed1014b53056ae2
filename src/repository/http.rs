//! Document store reached over a JSON HTTP API
//!
//! Wire format, relative to the configured base URL:
//!
//! - `POST {base}/{collection}` with `{"fields": {...}, "serverTimestamps": [...]}`,
//!   answered by `{"id": "..."}`
//! - `GET {base}/{collection}/{id}` answered by the document fields, or 404
//! - `PATCH {base}/{collection}/{id}` with the same body as `POST`

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::{Document, DocumentStore, DocumentWrite};
use crate::error::StoreError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteBody<'a> {
    fields: &'a Document,
    server_timestamps: &'a [String],
}

#[derive(Deserialize)]
struct CreatedBody {
    id: String,
}

#[derive(Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
}

impl HttpDocumentStore {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StoreError::Backend(format!("Invalid document store URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Backend("Document store URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn create(&self, collection: &str, write: DocumentWrite) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.url(&[collection])?)
            .json(&WriteBody {
                fields: &write.fields,
                server_timestamps: &write.server_timestamps,
            })
            .send()
            .await?;
        let created: CreatedBody = check(response).await?.json().await?;
        Ok(created.id)
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self.client.get(self.url(&[collection, id])?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: Document = check(response).await?.json().await?;
        Ok(Some(document))
    }

    async fn update(&self, collection: &str, id: &str, write: DocumentWrite) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.url(&[collection, id])?)
            .json(&WriteBody {
                fields: &write.fields,
                server_timestamps: &write.server_timestamps,
            })
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        check(response).await?;
        Ok(())
    }
}
