//! Form drafts: a filled-in form saved as JSON, replayed through the editors
//!
//! A draft is a `FormData` document with an extra `photos` object mapping
//! photo field identifiers (`boots_secondary_photo`, `misc_0_photo`) to image
//! paths, relative to the draft file.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    form::FormSession,
    models::{
        Category, DateField, EquipmentField, EquipmentItem, FormData, IdentityField, LocalFile,
        MiscField, PhotoField, Slot, INFORMATION_UNAVAILABLE,
    },
};

#[derive(Debug, Deserialize)]
pub struct FormDraft {
    #[serde(flatten)]
    pub form: FormData,
    #[serde(default)]
    pub photos: BTreeMap<String, PathBuf>,
}

/// A draft with its photos read into memory
#[derive(Debug)]
pub struct LoadedDraft {
    pub form: FormData,
    pub photos: Vec<(PhotoField, LocalFile)>,
}

impl FormDraft {
    pub fn parse(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Draft(e.to_string()))
    }

    /// Read a draft file and every photo it references
    pub async fn load(path: &Path) -> AppResult<LoadedDraft> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Draft(format!("cannot read {}: {}", path.display(), e)))?;
        let draft = Self::parse(&json)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let mut photos = Vec::with_capacity(draft.photos.len());
        for (field, photo_path) in draft.photos {
            let field = field.parse::<PhotoField>().map_err(AppError::Draft)?;
            let photo_path = base.join(photo_path);
            let bytes = tokio::fs::read(&photo_path)
                .await
                .map_err(|e| AppError::Draft(format!("cannot read {}: {}", photo_path.display(), e)))?;
            let name = photo_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::debug!(field = %field, path = %photo_path.display(), "Photo loaded from draft");
            photos.push((field, LocalFile::new(name, content_type_for(&photo_path), bytes)));
        }

        Ok(LoadedDraft {
            form: draft.form,
            photos,
        })
    }
}

impl LoadedDraft {
    /// Enter the draft into `session` field by field, as a user would
    pub fn apply(self, session: &mut FormSession) -> AppResult<()> {
        let LoadedDraft { form, photos } = self;
        let info = &form.firefighter_info;
        session.set_identity(IdentityField::Name, info.firefighter_name.as_str());
        session.set_identity(IdentityField::Id, info.firefighter_id.as_str());
        if let Some(rank) = info.rank.as_deref() {
            session.set_identity(IdentityField::Rank, rank);
        }
        if let Some(department) = info.department.as_deref() {
            session.set_identity(IdentityField::Department, department);
        }

        for category in Category::ALL {
            for slot in Slot::ALL {
                apply_item(session, category, slot, form.equipment(category).slot(slot))?;
            }
        }

        for misc in &form.misc_equipment {
            let index = session.add_misc();
            session.set_misc_field(index, MiscField::Type, misc.kind.as_str())?;
            for field in EquipmentField::ALL {
                let Some(value) = misc.item.field(field) else {
                    continue;
                };
                match date_field(field) {
                    Some(date) if is_selector_option(value) => session.select_misc_date(index, date, value)?,
                    Some(date) => session.enter_misc_date(index, date, value)?,
                    None => session.set_misc_field(index, MiscField::Item(field), value)?,
                }
            }
            if let Some(value) = misc.last_service.as_deref() {
                if is_selector_option(value) {
                    session.select_misc_date(index, DateField::LastService, value)?;
                } else {
                    session.enter_misc_date(index, DateField::LastService, value)?;
                }
            }
        }

        for (field, file) in photos {
            match field {
                PhotoField::Equipment(category, slot) => session.select_photo(category, slot, Some(file)),
                PhotoField::Misc(index) => session.select_misc_photo(index, Some(file))?,
            }
        }
        Ok(())
    }
}

fn apply_item(session: &mut FormSession, category: Category, slot: Slot, item: &EquipmentItem) -> AppResult<()> {
    for field in EquipmentField::ALL {
        let Some(value) = item.field(field) else {
            continue;
        };
        match (field, date_field(field)) {
            (EquipmentField::Size, _) => session.select_size(category, slot, value)?,
            (_, Some(date)) if is_selector_option(value) => session.select_date(category, slot, date, value)?,
            (_, Some(date)) => session.enter_date(category, slot, date, value)?,
            _ => session.set_field(category, slot, field, value),
        }
    }
    Ok(())
}

fn date_field(field: EquipmentField) -> Option<DateField> {
    match field {
        EquipmentField::MfgDate => Some(DateField::MfgDate),
        EquipmentField::LastCleaned => Some(DateField::LastCleaned),
        _ => None,
    }
}

/// Dates offered by the selector itself; anything else is typed into the custom input
fn is_selector_option(value: &str) -> bool {
    value.is_empty() || value == INFORMATION_UNAVAILABLE
}

/// MIME type guessed from the file extension
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let draft = FormDraft::parse(
            r#"{
                "firefighterInfo": { "firefighterName": "Jane", "firefighterId": "FD-42", "rank": "Lt." },
                "jacketShell": { "primary": { "size": "L", "mfgDate": "Information Unavailable" } },
                "boots": { "secondary": { "lastCleaned": "2024-03-01", "notes": "resoled" } },
                "miscEquipment": [{ "type": "Radio", "lastService": "2023-11-30" }],
                "photos": { "boots_secondary_photo": "boots.jpg" }
            }"#,
        )
        .unwrap();
        assert_eq!(draft.photos.len(), 1);

        let loaded = LoadedDraft {
            form: draft.form.clone(),
            photos: vec![(
                PhotoField::Equipment(Category::Boots, Slot::Secondary),
                LocalFile::new("boots.jpg", "image/jpeg", vec![1u8]),
            )],
        };
        let mut session = FormSession::default();
        loaded.apply(&mut session).unwrap();

        assert_eq!(session.data(), &draft.form);
        assert!(session.view().item(Category::Boots, Slot::Secondary).photo.is_some());
    }

    #[test]
    fn test_apply_rejects_unknown_size_option() {
        let draft = FormDraft::parse(r#"{ "hood": { "primary": { "size": "XXL" } } }"#).unwrap();
        let loaded = LoadedDraft {
            form: draft.form,
            photos: Vec::new(),
        };
        assert!(matches!(
            loaded.apply(&mut FormSession::default()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a/tag.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
    }
}
