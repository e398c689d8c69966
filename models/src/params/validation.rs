use std::borrow::Cow;

use validator::ValidationError;

pub const PHONE_DIGITS: usize = 10;

/// Structural domain check: at least one label, then a dot and an
/// alphabetic TLD of two or more letters.
pub fn is_plausible_email_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !labels.is_empty()
        && labels
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    if is_plausible_email_domain(email) {
        return Ok(());
    }
    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
    Err(ValidationError::new("email_domain").with_message(Cow::Owned(format!(
        "Invalid email domain: '{domain}'. Please check the spelling or use a valid provider."
    ))))
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("Phone number must be exactly 10 digits")))
    }
}
