//! Miscellaneous (free-form) equipment entries

use serde::{Deserialize, Serialize};

use super::equipment::{EquipmentField, EquipmentItem};

/// Gear outside the eight fixed categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MiscEquipment {
    /// Free-text label, e.g. "SCBA mask"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub item: EquipmentItem,
    pub last_service: Option<String>,
}

/// Text leaf of a [`MiscEquipment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscField {
    Type,
    LastService,
    Item(EquipmentField),
}

impl MiscEquipment {
    pub fn set(&mut self, field: MiscField, value: impl Into<String>) {
        let value = value.into();
        match field {
            MiscField::Type => self.kind = value,
            MiscField::LastService => self.last_service = Some(value),
            MiscField::Item(f) => *self.item.field_mut(f) = Some(value),
        }
    }
}
