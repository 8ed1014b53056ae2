//! Whole-form data as entered by the user

use serde::{Deserialize, Serialize};

use super::equipment::{Category, EquipmentSet};
use super::firefighter::FirefighterInfo;
use super::misc::MiscEquipment;

/// Persistable content of the inventory form.
///
/// Transient editor state (photos, previews, date-input flags) is kept apart
/// in [`crate::form::FormView`] so this value can be serialized as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub firefighter_info: FirefighterInfo,
    pub jacket_shell: EquipmentSet,
    pub jacket_liner: EquipmentSet,
    pub pants_shell: EquipmentSet,
    pub pants_liner: EquipmentSet,
    pub helmet: EquipmentSet,
    pub hood: EquipmentSet,
    pub gloves: EquipmentSet,
    pub boots: EquipmentSet,
    pub misc_equipment: Vec<MiscEquipment>,
}

impl FormData {
    pub fn equipment(&self, category: Category) -> &EquipmentSet {
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

    pub fn equipment_mut(&mut self, category: Category) -> &mut EquipmentSet {
        match category {
            Category::JacketShell => &mut self.jacket_shell,
            Category::JacketLiner => &mut self.jacket_liner,
            Category::PantsShell => &mut self.pants_shell,
            Category::PantsLiner => &mut self.pants_liner,
            Category::Helmet => &mut self.helmet,
            Category::Hood => &mut self.hood,
            Category::Gloves => &mut self.gloves,
            Category::Boots => &mut self.boots,
        }
    }
}
