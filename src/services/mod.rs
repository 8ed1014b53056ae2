//! Upload and submission services

pub mod image_upload;
pub mod object_store;
pub mod submission;

use reqwest::Client;
use std::sync::Arc;

use crate::{
    config::{AppConfig, StorageBackend},
    repository::{http::HttpDocumentStore, memory::MemoryDocumentStore, DocumentStore, InventoryRepository},
};
use object_store::{HttpObjectStore, MemoryObjectStore, ObjectStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub uploads: image_upload::ImageUploadService,
    pub inventories: InventoryRepository,
    pub submission: submission::SubmissionService,
}

impl Services {
    /// Create all services on top of the given stores
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        document_store: Arc<dyn DocumentStore>,
        config: &AppConfig,
    ) -> Self {
        let uploads = image_upload::ImageUploadService::new(object_store, &config.storage, &config.upload);
        let inventories = InventoryRepository::new(document_store, config.storage.collection.clone());
        Self {
            submission: submission::SubmissionService::new(uploads.clone(), inventories.clone()),
            uploads,
            inventories,
        }
    }

    /// Create all services with the stores selected by `storage.backend`
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = &config.storage;
        let (object_store, document_store): (Arc<dyn ObjectStore>, Arc<dyn DocumentStore>) = match storage.backend {
            StorageBackend::Memory => (
                Arc::new(MemoryObjectStore::new(storage.public_base_url.clone())),
                Arc::new(MemoryDocumentStore::new()),
            ),
            StorageBackend::Http => {
                let client = Client::new();
                (
                    Arc::new(HttpObjectStore::new(
                        client.clone(),
                        storage.object_store_url.clone(),
                        storage.public_base_url.clone(),
                    )),
                    Arc::new(HttpDocumentStore::new(client, storage.document_store_url.clone())),
                )
            }
        };
        tracing::info!(backend = ?storage.backend, "Storage backend selected");
        Self::new(object_store, document_store, config)
    }
}
