//! Inventory records on the document store

use serde_json::Value;
use std::sync::Arc;

use super::{Document, DocumentStore, DocumentWrite};
use crate::{
    error::{AppError, AppResult, StoreError},
    models::{
        record::{LAST_UPDATED, SUBMITTED_AT},
        FormData, ImageUrls, InventoryRecord,
    },
};

/// Writes and reads sanitized inventory records
#[derive(Clone)]
pub struct InventoryRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl InventoryRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Validate and store a new inventory, returning the generated document id
    pub async fn create(&self, form: &FormData, image_urls: &ImageUrls) -> AppResult<String> {
        form.firefighter_info.validate_required()?;

        let write = DocumentWrite {
            fields: to_document(&InventoryRecord::from_form(form, image_urls)).map_err(persist("submit"))?,
            server_timestamps: vec![SUBMITTED_AT.to_string(), LAST_UPDATED.to_string()],
        };

        let id = self
            .store
            .create(&self.collection, write)
            .await
            .map_err(persist("submit"))?;

        tracing::info!(id = %id, "Equipment inventory submitted successfully");
        Ok(id)
    }

    /// Fetch an inventory by document id; `None` when absent
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<InventoryRecord>> {
        let Some(document) = self
            .store
            .read(&self.collection, id)
            .await
            .map_err(persist("get"))?
        else {
            return Ok(None);
        };

        let mut record: InventoryRecord = serde_json::from_value(Value::Object(document))
            .map_err(|e| persist("get")(StoreError::Malformed(e)))?;
        record.id = Some(id.to_string());
        Ok(Some(record))
    }

    /// Replace an inventory's content, refreshing only its update timestamp
    pub async fn update(&self, id: &str, form: &FormData, image_urls: &ImageUrls) -> AppResult<()> {
        form.firefighter_info.validate_required()?;

        let write = DocumentWrite {
            fields: to_document(&InventoryRecord::from_form(form, image_urls)).map_err(persist("update"))?,
            server_timestamps: vec![LAST_UPDATED.to_string()],
        };

        self.store
            .update(&self.collection, id, write)
            .await
            .map_err(persist("update"))?;

        tracing::info!(id = %id, "Equipment inventory updated successfully");
        Ok(())
    }
}

fn persist(stage: &'static str) -> impl Fn(StoreError) -> AppError {
    move |source| {
        tracing::error!(stage, error = %source, "Equipment inventory store error");
        AppError::Persist { stage, source }
    }
}

fn to_document(record: &InventoryRecord) -> Result<Document, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Backend(format!(
            "inventory record serialized to a non-object value: {}",
            other
        ))),
    }
}
