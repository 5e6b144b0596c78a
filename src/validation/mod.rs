//! Input validation for the application draft

use crate::draft::{districts_of, ApplicationDraft};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' is too long (max {max} characters)")]
    TooLong { field: String, max: usize },

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Privilege percentage must be between 1 and 100")]
    InvalidPrivilegePercent,

    #[error("District '{district}' does not belong to region '{region}'")]
    DistrictOutsideRegion { district: String, region: String },
}

/// Validate a draft before its form is closed.
pub fn validate_draft(draft: &ApplicationDraft) -> Result<(), ValidationError> {
    require(&draft.last_name, "last_name")?;
    require(&draft.first_name, "first_name")?;
    require(&draft.phone, "phone")?;

    for (value, field) in [
        (&draft.last_name, "last_name"),
        (&draft.first_name, "first_name"),
        (&draft.faculty, "faculty"),
    ] {
        if value.len() > 255 {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: 255,
            });
        }
    }

    if !is_valid_phone(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }

    if draft.has_privilege && !(1..=100).contains(&draft.privilege_percent) {
        return Err(ValidationError::InvalidPrivilegePercent);
    }

    // District options are scoped to the region; a leftover district from a
    // different region never reaches the backend.
    if !draft.district.is_empty() && !districts_of(&draft.region).contains(&draft.district.as_str())
    {
        return Err(ValidationError::DistrictOutsideRegion {
            district: draft.district.clone(),
            region: draft.region.clone(),
        });
    }

    Ok(())
}

fn require(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Accepts local and +998-prefixed numbers with common separators.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let valid_chars = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    valid_chars && (7..=12).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ApplicationDraft {
        ApplicationDraft {
            last_name: "Valiyev".to_string(),
            first_name: "Ali".to_string(),
            phone: "+998 90 123-45-67".to_string(),
            room: "204".to_string(),
            faculty: "Informatika".to_string(),
            region: "Toshkent".to_string(),
            district: "Chilonzor".to_string(),
            has_privilege: true,
            privilege_percent: 50,
        }
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+998901234567"));
        assert!(is_valid_phone("90 123 45 67"));
        assert!(!is_valid_phone("telefon yo'q"));
        assert!(!is_valid_phone("123"));
    }

    #[test]
    fn test_validate_draft_valid() {
        assert!(validate_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_validate_draft_missing_name() {
        let mut draft = valid_draft();
        draft.first_name = "  ".to_string();
        assert!(matches!(
            validate_draft(&draft),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_draft_privilege_percent_range() {
        let mut draft = valid_draft();
        draft.privilege_percent = 0;
        assert!(matches!(
            validate_draft(&draft),
            Err(ValidationError::InvalidPrivilegePercent)
        ));

        // Without the privilege flag the percentage is not checked.
        draft.has_privilege = false;
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_validate_draft_district_outside_region() {
        let mut draft = valid_draft();
        draft.region = "Samarqand".to_string();
        assert!(matches!(
            validate_draft(&draft),
            Err(ValidationError::DistrictOutsideRegion { .. })
        ));
    }

    #[test]
    fn test_validate_draft_empty_district_is_allowed() {
        let mut draft = valid_draft();
        draft.district.clear();
        assert!(validate_draft(&draft).is_ok());
    }
}
