//! Data models for the gear inventory

pub mod attachment;
pub mod equipment;
pub mod firefighter;
pub mod form;
pub mod misc;
pub mod record;

// Re-export commonly used types
pub use attachment::{LocalFile, PhotoField};
pub use equipment::{
    Category, DateChoice, DateField, EquipmentField, EquipmentItem, EquipmentSet, SizeInput, Slot,
    CUSTOM_DATE_OPTION, INFORMATION_UNAVAILABLE,
};
pub use firefighter::{FirefighterInfo, IdentityField};
pub use form::FormData;
pub use misc::{MiscEquipment, MiscField};
pub use record::{ImageUrls, InventoryRecord, StoredItem, StoredMisc, StoredSet};
