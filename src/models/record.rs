//! Persisted shape of an inventory submission

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::attachment::PhotoField;
use super::equipment::{Category, EquipmentItem, Slot};
use super::form::FormData;
use super::misc::MiscEquipment;

/// Uploaded photo URLs keyed by the form field they belong to
pub type ImageUrls = IndexMap<PhotoField, String>;

/// Equipment entry with blank fields dropped and its photo URL attached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfg_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl StoredItem {
    fn from_item(item: &EquipmentItem, image_url: Option<&String>) -> Self {
        Self {
            serial: present(&item.serial),
            size: present(&item.size),
            manufacturer: present(&item.manufacturer),
            model: present(&item.model),
            mfg_date: present(&item.mfg_date),
            last_cleaned: present(&item.last_cleaned),
            notes: present(&item.notes),
            image_url: image_url.cloned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSet {
    pub primary: StoredItem,
    pub secondary: StoredItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredIdentity {
    pub firefighter_name: String,
    pub firefighter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredMisc {
    /// Always written, even when blank
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub item: StoredItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_service: Option<String>,
}

impl StoredMisc {
    fn from_misc(misc: &MiscEquipment, image_url: Option<&String>) -> Self {
        Self {
            kind: misc.kind.trim().to_string(),
            item: StoredItem::from_item(&misc.item, image_url),
            last_service: present(&misc.last_service),
        }
    }
}

/// Inventory document as written to and read back from the document store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryRecord {
    /// Store-assigned identifier, only set on records read back
    #[serde(skip)]
    pub id: Option<String>,
    pub firefighter_info: StoredIdentity,
    pub jacket_shell: StoredSet,
    pub jacket_liner: StoredSet,
    pub pants_shell: StoredSet,
    pub pants_liner: StoredSet,
    pub helmet: StoredSet,
    pub hood: StoredSet,
    pub gloves: StoredSet,
    pub boots: StoredSet,
    pub misc_equipment: Vec<StoredMisc>,
    /// Filled by the store at creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Filled by the store on every write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Document field holding the creation timestamp
pub const SUBMITTED_AT: &str = "submittedAt";
/// Document field holding the last write timestamp
pub const LAST_UPDATED: &str = "lastUpdated";

impl InventoryRecord {
    /// Build the sanitized record: values trimmed, blanks omitted, photo URLs merged in
    pub fn from_form(form: &FormData, image_urls: &ImageUrls) -> Self {
        let stored_set = |category: Category| {
            let set = form.equipment(category);
            let slot = |slot: Slot| {
                StoredItem::from_item(
                    set.slot(slot),
                    image_urls.get(&PhotoField::Equipment(category, slot)),
                )
            };
            StoredSet {
                primary: slot(Slot::Primary),
                secondary: slot(Slot::Secondary),
            }
        };

        let info = &form.firefighter_info;

        Self {
            id: None,
            firefighter_info: StoredIdentity {
                firefighter_name: info.firefighter_name.trim().to_string(),
                firefighter_id: info.firefighter_id.trim().to_string(),
                rank: present(&info.rank),
                department: present(&info.department),
            },
            jacket_shell: stored_set(Category::JacketShell),
            jacket_liner: stored_set(Category::JacketLiner),
            pants_shell: stored_set(Category::PantsShell),
            pants_liner: stored_set(Category::PantsLiner),
            helmet: stored_set(Category::Helmet),
            hood: stored_set(Category::Hood),
            gloves: stored_set(Category::Gloves),
            boots: stored_set(Category::Boots),
            misc_equipment: form
                .misc_equipment
                .iter()
                .enumerate()
                .map(|(index, misc)| StoredMisc::from_misc(misc, image_urls.get(&PhotoField::Misc(index))))
                .collect(),
            submitted_at: None,
            last_updated: None,
        }
    }

    pub fn equipment(&self, category: Category) -> &StoredSet {
        match category {
            Category::JacketShell => &self.jacket_shell,
            Category::JacketLiner => &self.jacket_liner,
            Category::PantsShell => &self.pants_shell,
            Category::PantsLiner => &self.pants_liner,
            Category::Helmet => &self.helmet,
            Category::Hood => &self.hood,
            Category::Gloves => &self.gloves,
            Category::Boots => &self.boots,
        }
    }
}

/// Trimmed value, or `None` when absent or blank
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::equipment::INFORMATION_UNAVAILABLE;
    use serde_json::json;

    fn form() -> FormData {
        let mut form = FormData::default();
        form.firefighter_info.firefighter_name = "  Jane Doe ".into();
        form.firefighter_info.firefighter_id = "FD-42".into();
        form.firefighter_info.rank = Some("   ".into());
        form
    }

    #[test]
    fn test_blank_form_serializes_identity_only() {
        let record = InventoryRecord::from_form(&form(), &ImageUrls::new());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value["firefighterInfo"],
            json!({ "firefighterName": "Jane Doe", "firefighterId": "FD-42" })
        );
        for category in Category::ALL {
            assert_eq!(value[category.key()], json!({ "primary": {}, "secondary": {} }));
        }
        assert_eq!(value["miscEquipment"], json!([]));
        assert!(value.get(SUBMITTED_AT).is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_values_trimmed_and_urls_merged() {
        let mut form = form();
        form.helmet.primary.serial = Some(" H-1 ".into());
        form.helmet.primary.mfg_date = Some(INFORMATION_UNAVAILABLE.into());
        form.helmet.secondary.notes = Some("\n".into());
        form.misc_equipment.push(MiscEquipment {
            kind: " Radio ".into(),
            ..Default::default()
        });
        form.misc_equipment.push(MiscEquipment::default());

        let mut urls = ImageUrls::new();
        urls.insert(PhotoField::Equipment(Category::Helmet, Slot::Secondary), "https://x/h.jpg".into());
        urls.insert(PhotoField::Misc(1), "https://x/m.jpg".into());

        let value = serde_json::to_value(InventoryRecord::from_form(&form, &urls)).unwrap();
        assert_eq!(
            value["helmet"],
            json!({
                "primary": { "serial": "H-1", "mfgDate": INFORMATION_UNAVAILABLE },
                "secondary": { "imageUrl": "https://x/h.jpg" }
            })
        );
        assert_eq!(
            value["miscEquipment"],
            json!([{ "type": "Radio" }, { "type": "", "imageUrl": "https://x/m.jpg" }])
        );
    }
}
