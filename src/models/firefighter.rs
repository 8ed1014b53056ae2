//! Firefighter identity section of the form

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Identity of the firefighter owning the inventoried gear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FirefighterInfo {
    #[validate(custom(function = "name_present"))]
    pub firefighter_name: String,
    /// Any format is accepted
    #[validate(custom(function = "id_present"))]
    pub firefighter_id: String,
    pub rank: Option<String>,
    pub department: Option<String>,
}

/// Identity text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Name,
    Id,
    Rank,
    Department,
}

impl FirefighterInfo {
    pub fn set(&mut self, field: IdentityField, value: impl Into<String>) {
        let value = value.into();
        match field {
            IdentityField::Name => self.firefighter_name = value,
            IdentityField::Id => self.firefighter_id = value,
            IdentityField::Rank => self.rank = Some(value),
            IdentityField::Department => self.department = Some(value),
        }
    }

    /// Check the required identity fields, reporting every missing one
    pub fn validate_required(&self) -> AppResult<()> {
        if let Err(errors) = self.validate() {
            let mut messages: Vec<String> = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            messages.sort();
            return Err(AppError::Validation(messages.join(", ")));
        }
        Ok(())
    }
}

fn name_present(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Firefighter name is required")
}

fn id_present(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Firefighter ID is required")
}

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed(message));
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, id: &str) -> FirefighterInfo {
        FirefighterInfo {
            firefighter_name: name.to_string(),
            firefighter_id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(info("Jane Doe", "FD-0042").validate_required().is_ok());
        // Any id format is fine
        assert!(info("Jane Doe", "  #42/b ").validate_required().is_ok());
    }

    #[test]
    fn test_blank_fields_are_reported() {
        let err = info("   ", "").validate_required().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Firefighter ID is required, Firefighter name is required"
        );

        let err = info("Jane", "\t").validate_required().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Firefighter ID is required");
    }
}
