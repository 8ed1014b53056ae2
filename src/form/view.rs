//! Transient editor state kept beside the form data

use std::collections::BTreeSet;

use super::preview::PreviewHandle;
use crate::models::{Category, DateField, LocalFile, Slot};

/// A selected photo together with its preview
#[derive(Debug)]
pub struct PhotoAttachment {
    pub file: LocalFile,
    pub preview: PreviewHandle,
}

/// Editor state of one equipment or misc entry
#[derive(Debug, Default)]
pub struct ItemView {
    pub photo: Option<PhotoAttachment>,
    date_inputs: BTreeSet<DateField>,
}

impl ItemView {
    /// Whether the raw date input of `field` is shown
    pub fn shows_date_input(&self, field: DateField) -> bool {
        self.date_inputs.contains(&field)
    }

    pub(crate) fn set_date_input(&mut self, field: DateField, shown: bool) {
        if shown {
            self.date_inputs.insert(field);
        } else {
            self.date_inputs.remove(&field);
        }
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.photo.as_ref().map(|p| p.preview.url())
    }
}

/// Editor state of the whole form; never serialized
#[derive(Debug, Default)]
pub struct FormView {
    equipment: [[ItemView; 2]; 8],
    pub(crate) misc: Vec<ItemView>,
}

impl FormView {
    pub fn item(&self, category: Category, slot: Slot) -> &ItemView {
        &self.equipment[category.index()][slot.index()]
    }

    pub(crate) fn item_mut(&mut self, category: Category, slot: Slot) -> &mut ItemView {
        &mut self.equipment[category.index()][slot.index()]
    }

    pub fn misc(&self, index: usize) -> Option<&ItemView> {
        self.misc.get(index)
    }
}
