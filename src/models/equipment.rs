//! Protective gear categories and per-item equipment fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option value stored literally when the firefighter cannot read a tag
pub const INFORMATION_UNAVAILABLE: &str = "Information Unavailable";

/// Option value of a date selector that reveals the raw date input
pub const CUSTOM_DATE_OPTION: &str = "custom";

const COAT_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL"];
const HOOD_SIZES: &[&str] = &["Universal", "S/M", "L/XL", "2XL/3XL"];
const GLOVE_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "2XL", "3XL"];

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The eight fixed gear categories of an inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    JacketShell,
    JacketLiner,
    PantsShell,
    PantsLiner,
    Helmet,
    Hood,
    Gloves,
    Boots,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::JacketShell,
        Category::JacketLiner,
        Category::PantsShell,
        Category::PantsLiner,
        Category::Helmet,
        Category::Hood,
        Category::Gloves,
        Category::Boots,
    ];

    /// Key used in documents and photo field identifiers
    pub fn key(self) -> &'static str {
        match self {
            Category::JacketShell => "jacketShell",
            Category::JacketLiner => "jacketLiner",
            Category::PantsShell => "pantsShell",
            Category::PantsLiner => "pantsLiner",
            Category::Helmet => "helmet",
            Category::Hood => "hood",
            Category::Gloves => "gloves",
            Category::Boots => "boots",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// How the size of this gear is entered
    pub fn size_input(self) -> SizeInput {
        match self {
            Category::JacketShell | Category::JacketLiner => SizeInput::Select(COAT_SIZES),
            Category::Hood => SizeInput::Select(HOOD_SIZES),
            Category::Gloves => SizeInput::Select(GLOVE_SIZES),
            Category::PantsShell | Category::PantsLiner => SizeInput::Text {
                placeholder: "e.g., 34x32 or \"Information Unavailable\"",
            },
            Category::Helmet => SizeInput::Text {
                placeholder: "Enter size or \"Information Unavailable\"",
            },
            Category::Boots => SizeInput::Text {
                placeholder: "e.g., 10.5 or \"Information Unavailable\"",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::JacketShell => "Jacket Shell",
            Category::JacketLiner => "Jacket Liner",
            Category::PantsShell => "Pants Shell",
            Category::PantsLiner => "Pants Liner",
            Category::Helmet => "Helmet",
            Category::Hood => "Hood",
            Category::Gloves => "Gloves",
            Category::Boots => "Boots",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("unknown equipment category '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// Primary or secondary instance of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    /// Position in [`Slot::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Slot::Primary),
            "secondary" => Ok(Slot::Secondary),
            _ => Err(format!("unknown slot '{}'", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Size input
// ---------------------------------------------------------------------------

/// Size editor shape of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeInput {
    /// Fixed option list; blank and [`INFORMATION_UNAVAILABLE`] are always offered too
    Select(&'static [&'static str]),
    Text { placeholder: &'static str },
}

impl SizeInput {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            SizeInput::Select(options) => {
                value.is_empty() || value == INFORMATION_UNAVAILABLE || options.contains(&value)
            }
            SizeInput::Text { .. } => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Text leaf of an [`EquipmentItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentField {
    Serial,
    Size,
    Manufacturer,
    Model,
    MfgDate,
    LastCleaned,
    Notes,
}

impl EquipmentField {
    pub const ALL: [EquipmentField; 7] = [
        EquipmentField::Serial,
        EquipmentField::Size,
        EquipmentField::Manufacturer,
        EquipmentField::Model,
        EquipmentField::MfgDate,
        EquipmentField::LastCleaned,
        EquipmentField::Notes,
    ];
}

/// Date leaves edited through a selector with a custom-date escape hatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    MfgDate,
    LastCleaned,
    /// Only carried by miscellaneous items
    LastService,
}

impl DateField {
    /// The equipment leaf backing this date, if equipment items carry it
    pub fn equipment_field(self) -> Option<EquipmentField> {
        match self {
            DateField::MfgDate => Some(EquipmentField::MfgDate),
            DateField::LastCleaned => Some(EquipmentField::LastCleaned),
            DateField::LastService => None,
        }
    }
}

/// What a date selector choice means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateChoice {
    /// Reveal the raw date input, keep the stored value
    Custom,
    /// Store this value (blank and [`INFORMATION_UNAVAILABLE`] included)
    Value(String),
}

impl DateChoice {
    pub fn from_option(value: &str) -> Self {
        if value == CUSTOM_DATE_OPTION {
            DateChoice::Custom
        } else {
            DateChoice::Value(value.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// One piece of gear as entered on the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentItem {
    pub serial: Option<String>,
    pub size: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub mfg_date: Option<String>,
    pub last_cleaned: Option<String>,
    pub notes: Option<String>,
}

impl EquipmentItem {
    pub fn field(&self, field: EquipmentField) -> Option<&str> {
        match field {
            EquipmentField::Serial => self.serial.as_deref(),
            EquipmentField::Size => self.size.as_deref(),
            EquipmentField::Manufacturer => self.manufacturer.as_deref(),
            EquipmentField::Model => self.model.as_deref(),
            EquipmentField::MfgDate => self.mfg_date.as_deref(),
            EquipmentField::LastCleaned => self.last_cleaned.as_deref(),
            EquipmentField::Notes => self.notes.as_deref(),
        }
    }

    pub fn field_mut(&mut self, field: EquipmentField) -> &mut Option<String> {
        match field {
            EquipmentField::Serial => &mut self.serial,
            EquipmentField::Size => &mut self.size,
            EquipmentField::Manufacturer => &mut self.manufacturer,
            EquipmentField::Model => &mut self.model,
            EquipmentField::MfgDate => &mut self.mfg_date,
            EquipmentField::LastCleaned => &mut self.last_cleaned,
            EquipmentField::Notes => &mut self.notes,
        }
    }
}

/// Primary and secondary instance of one category; both always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentSet {
    pub primary: EquipmentItem,
    pub secondary: EquipmentItem,
}

impl EquipmentSet {
    pub fn slot(&self, slot: Slot) -> &EquipmentItem {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut EquipmentItem {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>(), Ok(category));
        }
        assert!("coat".parse::<Category>().is_err());
        assert_eq!(Category::Boots.index(), 7);
    }

    #[test]
    fn test_size_input() {
        let hood = Category::Hood.size_input();
        assert!(hood.accepts("L/XL"));
        assert!(hood.accepts(INFORMATION_UNAVAILABLE));
        assert!(hood.accepts(""));
        assert!(!hood.accepts("XL"));

        assert!(Category::Boots.size_input().accepts("10.5 wide"));
    }

    #[test]
    fn test_date_choice() {
        assert_eq!(DateChoice::from_option("custom"), DateChoice::Custom);
        assert_eq!(
            DateChoice::from_option(INFORMATION_UNAVAILABLE),
            DateChoice::Value(INFORMATION_UNAVAILABLE.to_string())
        );
    }
}
