//! In-process document store

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, DocumentWrite};
use crate::error::StoreError;

/// Document store kept in memory, keyed by collection then document id
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, HashMap<String, Document>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

fn stamp(fields: &mut Document, server_timestamps: &[String]) {
    let now = Value::String(Utc::now().to_rfc3339());
    for name in server_timestamps {
        fields.insert(name.clone(), now.clone());
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, write: DocumentWrite) -> Result<String, StoreError> {
        let DocumentWrite {
            mut fields,
            server_timestamps,
        } = write;
        stamp(&mut fields, &server_timestamps);

        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: &str, write: DocumentWrite) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let DocumentWrite {
            mut fields,
            server_timestamps,
        } = write;
        stamp(&mut fields, &server_timestamps);
        existing.extend(fields);
        Ok(())
    }
}
