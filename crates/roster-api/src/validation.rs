//! Input validation for member submissions
//!
//! Drafts are checked locally before any request is issued; a rejected
//! draft never reaches the network.

use validator::{ValidateEmail, ValidationError};

use crate::model::MemberDraft;

/// Maximum length for the name field
pub const MAX_NAME_LENGTH: usize = 64;

/// Minimum length for phone fields
pub const MIN_PHONE_LENGTH: usize = 5;

/// Maximum length for phone fields
pub const MAX_PHONE_LENGTH: usize = 20;

/// Validate a member display name
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_empty").with_message("name is required".into()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("name_too_long").with_message("name is too long".into()));
    }
    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email_empty").with_message("email is required".into()));
    }
    if !email.validate_email() {
        return Err(
            ValidationError::new("email_invalid").with_message("email is not valid".into())
        );
    }
    Ok(())
}

/// Validate a phone number
///
/// Phone numbers must:
/// - Be between MIN_PHONE_LENGTH and MAX_PHONE_LENGTH characters
/// - Contain only digits, spaces, and the characters `+`, `-`
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() < MIN_PHONE_LENGTH || phone.len() > MAX_PHONE_LENGTH {
        return Err(
            ValidationError::new("phone_length").with_message("phone number is not valid".into())
        );
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(
            ValidationError::new("phone_invalid_chars")
                .with_message("phone number is not valid".into()),
        );
    }
    Ok(())
}

/// Validate a fee rate percentage
pub fn validate_fee_rate(rate: f64) -> Result<(), ValidationError> {
    if !(0.0..=100.0).contains(&rate) {
        return Err(
            ValidationError::new("fee_rate_range").with_message("fee rate must be 0-100".into())
        );
    }
    Ok(())
}

/// Validate a whole draft, stopping at the first rejected field
pub fn validate_draft(draft: &MemberDraft) -> Result<(), ValidationError> {
    validate_name(&draft.name)?;
    validate_email(&draft.email)?;
    validate_phone(&draft.phone)?;
    if let Some(alt_phone) = &draft.alt_phone {
        validate_phone(alt_phone)?;
    }
    validate_fee_rate(draft.membership_fee_rate)?;
    validate_fee_rate(draft.referral_fee_rate)?;
    Ok(())
}
