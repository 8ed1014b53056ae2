//! Document store access and inventory persistence

pub mod http;
pub mod inventory;
pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

pub use inventory::InventoryRepository;

/// Top-level fields of a stored document
pub type Document = Map<String, Value>;

/// One document write.
///
/// Fields named in `server_timestamps` are filled by the store with its own
/// clock at write time and override any value present in `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    pub fields: Document,
    pub server_timestamps: Vec<String>,
}

/// Remote document database holding inventory records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its generated identifier
    async fn create(&self, collection: &str, write: DocumentWrite) -> Result<String, StoreError>;

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Overwrite the given top-level fields of an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when no document has this id.
    async fn update(&self, collection: &str, id: &str, write: DocumentWrite) -> Result<(), StoreError>;
}
