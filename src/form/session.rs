//! Form session: data plus editor state, mutated one field at a time

use super::preview::PreviewRegistry;
use super::view::{FormView, ItemView, PhotoAttachment};
use crate::{
    error::{AppError, AppResult},
    models::{
        Category, DateChoice, DateField, EquipmentField, EquipmentItem, FormData, IdentityField,
        LocalFile, MiscEquipment, MiscField, PhotoField, Slot,
    },
    services::submission::SubmissionRequest,
};

/// The form being filled in
#[derive(Debug)]
pub struct FormSession {
    data: FormData,
    view: FormView,
    previews: PreviewRegistry,
}

impl FormSession {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self {
            data: FormData::default(),
            view: FormView::default(),
            previews,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Clear every field and release every preview
    pub fn reset(&mut self) {
        self.data = FormData::default();
        self.view = FormView::default();
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    pub fn set_identity(&mut self, field: IdentityField, value: impl Into<String>) {
        self.data.firefighter_info.set(field, value);
    }

    // ------------------------------------------------------------------
    // Equipment slots
    // ------------------------------------------------------------------

    pub fn set_field(&mut self, category: Category, slot: Slot, field: EquipmentField, value: impl Into<String>) {
        *self.item_mut(category, slot).field_mut(field) = Some(value.into());
    }

    /// Size selection, restricted to the category's options when it has a fixed list
    pub fn select_size(&mut self, category: Category, slot: Slot, value: &str) -> AppResult<()> {
        if !category.size_input().accepts(value) {
            return Err(AppError::Validation(format!(
                "'{}' is not a size offered for {}",
                value, category
            )));
        }
        self.set_field(category, slot, EquipmentField::Size, value);
        Ok(())
    }

    /// Date selector choice; `custom` only reveals the raw date input
    pub fn select_date(&mut self, category: Category, slot: Slot, field: DateField, option: &str) -> AppResult<()> {
        let leaf = equipment_date(field)?;
        let choice = DateChoice::from_option(option);
        let view = self.view.item_mut(category, slot);
        match choice {
            DateChoice::Custom => view.set_date_input(field, true),
            DateChoice::Value(value) => {
                view.set_date_input(field, false);
                *self.item_mut(category, slot).field_mut(leaf) = Some(value);
            }
        }
        Ok(())
    }

    /// Raw date typed into the custom input; the input stays as it is
    pub fn enter_date(&mut self, category: Category, slot: Slot, field: DateField, value: impl Into<String>) -> AppResult<()> {
        let leaf = equipment_date(field)?;
        self.set_field(category, slot, leaf, value);
        Ok(())
    }

    /// Attach a photo, or clear it with `None`; the previous preview is released
    pub fn select_photo(&mut self, category: Category, slot: Slot, file: Option<LocalFile>) {
        let attachment = file.map(|file| self.attach(file));
        self.view.item_mut(category, slot).photo = attachment;
    }

    // ------------------------------------------------------------------
    // Miscellaneous equipment
    // ------------------------------------------------------------------

    /// Append a blank item and return its index
    pub fn add_misc(&mut self) -> usize {
        self.data.misc_equipment.push(MiscEquipment::default());
        self.view.misc.push(ItemView::default());
        self.data.misc_equipment.len() - 1
    }

    /// Remove the item at `index`; later items shift down by one
    pub fn remove_misc(&mut self, index: usize) -> AppResult<MiscEquipment> {
        self.check_misc(index)?;
        self.view.misc.remove(index);
        Ok(self.data.misc_equipment.remove(index))
    }

    pub fn set_misc_field(&mut self, index: usize, field: MiscField, value: impl Into<String>) -> AppResult<()> {
        self.check_misc(index)?;
        self.data.misc_equipment[index].set(field, value);
        Ok(())
    }

    pub fn select_misc_date(&mut self, index: usize, field: DateField, option: &str) -> AppResult<()> {
        self.check_misc(index)?;
        match DateChoice::from_option(option) {
            DateChoice::Custom => self.view.misc[index].set_date_input(field, true),
            DateChoice::Value(value) => {
                self.view.misc[index].set_date_input(field, false);
                self.data.misc_equipment[index].set(misc_date(field), value);
            }
        }
        Ok(())
    }

    pub fn enter_misc_date(&mut self, index: usize, field: DateField, value: impl Into<String>) -> AppResult<()> {
        self.set_misc_field(index, misc_date(field), value)
    }

    pub fn select_misc_photo(&mut self, index: usize, file: Option<LocalFile>) -> AppResult<()> {
        self.check_misc(index)?;
        let attachment = file.map(|file| self.attach(file));
        self.view.misc[index].photo = attachment;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Attached photos: every category's primary then secondary slot, then misc items in order
    pub fn collect_photos(&self) -> Vec<(PhotoField, LocalFile)> {
        let equipment = Category::ALL.into_iter().flat_map(|category| {
            Slot::ALL.into_iter().filter_map(move |slot| {
                self.view
                    .item(category, slot)
                    .photo
                    .as_ref()
                    .map(|p| (PhotoField::Equipment(category, slot), p.file.clone()))
            })
        });
        let misc = self.view.misc.iter().enumerate().filter_map(|(index, view)| {
            view.photo
                .as_ref()
                .map(|p| (PhotoField::Misc(index), p.file.clone()))
        });
        equipment.chain(misc).collect()
    }

    /// Detached copy of the form for the submission pipeline
    pub fn snapshot(&self) -> SubmissionRequest {
        SubmissionRequest {
            form: self.data.clone(),
            photos: self.collect_photos(),
        }
    }

    fn item_mut(&mut self, category: Category, slot: Slot) -> &mut EquipmentItem {
        self.data.equipment_mut(category).slot_mut(slot)
    }

    fn attach(&self, file: LocalFile) -> PhotoAttachment {
        let preview = self.previews.create(&file);
        PhotoAttachment { file, preview }
    }

    fn check_misc(&self, index: usize) -> AppResult<()> {
        if index >= self.data.misc_equipment.len() {
            return Err(AppError::Validation(format!(
                "no miscellaneous item at index {}",
                index
            )));
        }
        Ok(())
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(PreviewRegistry::new())
    }
}

fn equipment_date(field: DateField) -> AppResult<EquipmentField> {
    field.equipment_field().ok_or_else(|| {
        AppError::Validation("last service date is only kept for miscellaneous equipment".to_string())
    })
}

fn misc_date(field: DateField) -> MiscField {
    match field.equipment_field() {
        Some(leaf) => MiscField::Item(leaf),
        None => MiscField::LastService,
    }
}
