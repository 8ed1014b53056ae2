//! Locally selected photo files and their field identifiers

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::equipment::{Category, Slot};

/// A file picked on the form, held in memory until submission
#[derive(Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    /// Declared MIME type, e.g. `image/jpeg`
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

impl fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Where a photo belongs on the form.
///
/// Renders as `{category}_{slot}_photo` or `misc_{index}_photo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhotoField {
    Equipment(Category, Slot),
    Misc(usize),
}

impl fmt::Display for PhotoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoField::Equipment(category, slot) => {
                write!(f, "{}_{}_photo", category.key(), slot.key())
            }
            PhotoField::Misc(index) => write!(f, "misc_{}_photo", index),
        }
    }
}

impl FromStr for PhotoField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid photo field identifier '{}'", s);
        let stem = s.strip_suffix("_photo").ok_or_else(invalid)?;
        let (head, tail) = stem.split_once('_').ok_or_else(invalid)?;
        if head == "misc" {
            let index = tail.parse::<usize>().map_err(|_| invalid())?;
            return Ok(PhotoField::Misc(index));
        }
        let category = head.parse::<Category>()?;
        let slot = tail.parse::<Slot>()?;
        Ok(PhotoField::Equipment(category, slot))
    }
}
