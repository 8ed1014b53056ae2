//! Submission pipeline: validate, upload photos, write the inventory document

use crate::{
    error::AppResult,
    models::{FormData, ImageUrls, LocalFile, PhotoField},
    repository::InventoryRepository,
};

use super::image_upload::ImageUploadService;

pub const UPLOADING_MESSAGE: &str = "Uploading images...";
pub const SAVING_MESSAGE: &str = "Saving equipment inventory...";

/// Everything a submission needs, detached from the live form
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub form: FormData,
    /// Attached photos in collection order
    pub photos: Vec<(PhotoField, LocalFile)>,
}

#[derive(Clone)]
pub struct SubmissionService {
    uploads: ImageUploadService,
    inventories: InventoryRepository,
}

impl SubmissionService {
    pub fn new(uploads: ImageUploadService, inventories: InventoryRepository) -> Self {
        Self { uploads, inventories }
    }

    /// Run one submission and return the new document id.
    ///
    /// `progress` receives a status line before each remote step. Any failure
    /// ends the attempt; nothing is retried.
    pub async fn submit<P>(&self, request: SubmissionRequest, progress: P) -> AppResult<String>
    where
        P: Fn(&str),
    {
        let SubmissionRequest { form, photos } = request;
        let info = &form.firefighter_info;
        info.validate_required()?;

        tracing::info!(
            firefighter = %info.firefighter_name.trim(),
            "Starting submission process"
        );
        tracing::info!("Found {} images to upload", photos.len());

        let mut image_urls = ImageUrls::new();
        if !photos.is_empty() {
            progress(UPLOADING_MESSAGE);
            let uploaded = self
                .uploads
                .upload_equipment_images(photos, info.firefighter_id.trim())
                .await?;
            image_urls = uploaded
                .into_iter()
                .map(|(field, result)| (field, result.url))
                .collect();
            tracing::info!(
                fields = ?image_urls.keys().map(ToString::to_string).collect::<Vec<_>>(),
                "Images uploaded successfully"
            );
        }

        progress(SAVING_MESSAGE);
        self.inventories.create(&form, &image_urls).await
    }
}
