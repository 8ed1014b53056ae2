//! Equipment photo uploads

use chrono::Utc;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::object_store::ObjectStore;
use crate::{
    config::{StorageConfig, UploadConfig},
    error::{AppError, AppResult, StoreError},
    models::{LocalFile, PhotoField},
};

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9.-]").expect("valid filename regex"));

/// Details of one stored photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadResult {
    pub url: String,
    /// Timestamped, sanitized name the object was stored under
    pub filename: String,
    /// Original size in bytes
    pub size: u64,
}

#[derive(Clone)]
pub struct ImageUploadService {
    store: Arc<dyn ObjectStore>,
    photo_root: String,
    max_image_bytes: u64,
}

impl ImageUploadService {
    pub fn new(store: Arc<dyn ObjectStore>, storage: &StorageConfig, upload: &UploadConfig) -> Self {
        Self {
            store,
            photo_root: storage.photo_root.trim_end_matches('/').to_string(),
            max_image_bytes: upload.max_image_bytes,
        }
    }

    /// Reject anything that is not an image or exceeds the size ceiling
    pub fn check(&self, file: &LocalFile) -> AppResult<()> {
        if !file.is_image() {
            return Err(AppError::InvalidType {
                name: file.name.clone(),
                content_type: file.content_type.clone(),
            });
        }
        if file.size() > self.max_image_bytes {
            return Err(AppError::SizeLimit {
                name: file.name.clone(),
                size: file.size(),
                limit: self.max_image_bytes,
            });
        }
        Ok(())
    }

    /// Folder grouping one firefighter's photos
    pub fn folder_for(&self, firefighter_id: &str) -> String {
        format!("{}/{}", self.photo_root, firefighter_id)
    }

    /// Upload a single image into `folder`
    pub async fn upload_image(&self, file: &LocalFile, folder: &str) -> AppResult<ImageUploadResult> {
        self.check(file)?;
        put_image(self.store.clone(), folder.to_string(), file.clone())
            .await
            .map_err(AppError::Upload)
    }

    /// Upload every photo of a submission concurrently.
    ///
    /// All files are checked before the first upload starts. The first failing
    /// upload aborts the ones still running; objects already stored stay put.
    pub async fn upload_equipment_images(
        &self,
        images: Vec<(PhotoField, LocalFile)>,
        firefighter_id: &str,
    ) -> AppResult<IndexMap<PhotoField, ImageUploadResult>> {
        for (_, file) in &images {
            self.check(file)?;
        }

        let folder = self.folder_for(firefighter_id);
        let mut uploads = JoinSet::new();
        for (position, (field, file)) in images.into_iter().enumerate() {
            let store = self.store.clone();
            let folder = folder.clone();
            uploads.spawn(async move { (position, field, put_image(store, folder, file).await) });
        }

        let mut done = Vec::with_capacity(uploads.len());
        while let Some(joined) = uploads.join_next().await {
            let outcome = joined
                .map_err(|e| StoreError::Backend(format!("upload task failed: {}", e)))
                .and_then(|(position, field, result)| result.map(|r| (position, field, r)));
            match outcome {
                Ok(entry) => done.push(entry),
                Err(e) => {
                    uploads.abort_all();
                    tracing::error!(error = %e, "Error uploading equipment images");
                    return Err(AppError::Upload(e));
                }
            }
        }

        done.sort_by_key(|(position, _, _)| *position);
        Ok(done.into_iter().map(|(_, field, result)| (field, result)).collect())
    }
}

async fn put_image(store: Arc<dyn ObjectStore>, folder: String, file: LocalFile) -> Result<ImageUploadResult, StoreError> {
    let filename = format!("{}_{}", Utc::now().timestamp_millis(), sanitize_filename(&file.name));
    let key = format!("{}/{}", folder, filename);
    let url = store.put(&key, file.bytes.clone(), &file.content_type).await?;
    tracing::debug!(key = %key, size = file.size(), "Image stored");
    Ok(ImageUploadResult {
        url,
        filename,
        size: file.size(),
    })
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MAX_IMAGE_BYTES;
    use crate::models::{Category, Slot};
    use crate::services::object_store::{MemoryObjectStore, MockObjectStore};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Fails `bad.jpg` at once; every other upload waits for the gate
    struct StallingStore {
        gate: Arc<Notify>,
        inner: MemoryObjectStore,
    }

    #[async_trait]
    impl ObjectStore for StallingStore {
        async fn put(&self, key: &str, bytes: Arc<[u8]>, content_type: &str) -> Result<String, StoreError> {
            if key.ends_with("bad.jpg") {
                return Err(StoreError::Backend("bucket unavailable".into()));
            }
            self.gate.notified().await;
            self.inner.put(key, bytes, content_type).await
        }
    }

    fn service(store: Arc<dyn ObjectStore>) -> ImageUploadService {
        ImageUploadService::new(store, &StorageConfig::default(), &UploadConfig::default())
    }

    fn image(name: &str, size: usize) -> LocalFile {
        LocalFile::new(name, "image/jpeg", vec![7u8; size])
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("helmet tag (1).JPG"), "helmet_tag__1_.JPG");
        assert_eq!(sanitize_filename("boots-left.v2.png"), "boots-left.v2.png");
        assert_eq!(sanitize_filename("gant/é.jpg"), "gant__.jpg");
    }

    #[test]
    fn test_type_and_size_checks() {
        let mut store = MockObjectStore::new();
        store.expect_put().never();
        let service = service(Arc::new(store));

        let text = LocalFile::new("notes.txt", "text/plain", vec![0u8; 4]);
        assert!(matches!(service.check(&text), Err(AppError::InvalidType { .. })));

        let limit = MAX_IMAGE_BYTES as usize;
        assert!(service.check(&image("exact.jpg", limit)).is_ok());
        assert!(matches!(
            service.check(&image("big.jpg", limit + 1)),
            Err(AppError::SizeLimit { size, .. }) if size == MAX_IMAGE_BYTES + 1
        ));
    }

    #[tokio::test]
    async fn test_upload_image_key_layout() {
        let store = MemoryObjectStore::new("https://files.example");
        let service = service(Arc::new(store.clone()));

        let result = service
            .upload_image(&image("tag photo.jpg", 3), &service.folder_for("FD-42"))
            .await
            .unwrap();

        assert!(result.filename.ends_with("_tag_photo.jpg"));
        let stamp = result.filename.split('_').next().unwrap();
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(result.size, 3);
        assert_eq!(
            result.url,
            format!("https://files.example/equipment-photos/FD-42/{}", result.filename)
        );
        assert_eq!(store.keys().await, vec![format!("equipment-photos/FD-42/{}", result.filename)]);
    }

    #[tokio::test]
    async fn test_batch_results_keyed_by_field() {
        let store = MemoryObjectStore::new("https://files.example");
        let service = service(Arc::new(store.clone()));

        let results = service
            .upload_equipment_images(
                vec![
                    (PhotoField::Equipment(Category::Boots, Slot::Secondary), image("a.jpg", 1)),
                    (PhotoField::Misc(2), image("b.jpg", 2)),
                ],
                "FD-42",
            )
            .await
            .unwrap();

        let fields: Vec<String> = results.keys().map(|f| f.to_string()).collect();
        assert_eq!(fields, vec!["boots_secondary_photo", "misc_2_photo"]);
        assert_eq!(results[&PhotoField::Misc(2)].size, 2);
        assert_eq!(store.keys().await.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_file_stops_batch_before_any_upload() {
        let mut store = MockObjectStore::new();
        store.expect_put().never();
        let service = service(Arc::new(store));

        let err = service
            .upload_equipment_images(
                vec![
                    (PhotoField::Misc(0), image("ok.jpg", 1)),
                    (PhotoField::Misc(1), LocalFile::new("list.txt", "text/plain", vec![1u8])),
                ],
                "FD-42",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidType { name, .. } if name == "list.txt"));
    }

    #[tokio::test]
    async fn test_any_store_failure_fails_batch() {
        let mut store = MockObjectStore::new();
        store.expect_put().returning(|key, _, _| {
            if key.ends_with("bad.jpg") {
                Err(StoreError::Backend("bucket unavailable".into()))
            } else {
                Ok(format!("https://files.example/{}", key))
            }
        });
        let service = service(Arc::new(store));

        let err = service
            .upload_equipment_images(
                vec![
                    (PhotoField::Misc(0), image("good.jpg", 1)),
                    (PhotoField::Misc(1), image("bad.jpg", 1)),
                ],
                "FD-42",
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to upload equipment images: bucket unavailable");
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_failure_aborts_running_uploads() {
        let gate = Arc::new(Notify::new());
        let inner = MemoryObjectStore::new("https://files.example");
        let service = service(Arc::new(StallingStore {
            gate: gate.clone(),
            inner: inner.clone(),
        }));

        let outcome = tokio::time::timeout(
            Duration::from_secs(30),
            service.upload_equipment_images(
                vec![
                    (PhotoField::Equipment(Category::Helmet, Slot::Primary), image("slow.jpg", 1)),
                    (PhotoField::Misc(0), image("bad.jpg", 1)),
                ],
                "FD-42",
            ),
        )
        .await
        .expect("batch returns once an upload fails");
        assert!(matches!(outcome, Err(AppError::Upload(StoreError::Backend(_)))));

        // The stalled upload was cancelled, so opening the gate stores nothing
        gate.notify_waiters();
        gate.notify_one();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(inner.keys().await.is_empty());
    }
}
