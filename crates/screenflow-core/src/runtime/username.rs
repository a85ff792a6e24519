// crates/screenflow-core/src/runtime/username.rs
// ============================================================================
// Module: Screenflow Username Rule Evaluator
// Description: Policy-driven username validation with format restrictions.
// Purpose: Accumulate independent, field-scoped validation failures.
// Dependencies: crate::core::{policy, validation}
// ============================================================================

//! ## Overview
//! Username validation runs every applicable check independently so multiple
//! failures can co-occur. Without a policy the only requirement is a
//! non-blank candidate. Length bounds default to 1..=30 and both the email
//! and phone formats default to allowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::policy::UsernamePolicy;
use crate::core::validation::UsernameError;
use crate::core::validation::UsernameValidation;
use crate::core::validation::username_codes;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum digit count for a phone-shaped candidate.
const PHONE_MIN_DIGITS: usize = 7;

/// Maximum digit count for a phone-shaped candidate.
const PHONE_MAX_DIGITS: usize = 15;

/// Message for the missing-username error.
const REQUIRED_MESSAGE: &str = "Username is required.";

/// Message for the email-format restriction error.
const EMAIL_NOT_ALLOWED_MESSAGE: &str = "Usernames in email format are not allowed.";

/// Message for the phone-format restriction error.
const PHONE_NOT_ALLOWED_MESSAGE: &str = "Usernames in phone number format are not allowed.";

// ============================================================================
// SECTION: Username Validation
// ============================================================================

/// Validates a username candidate against a declared policy.
///
/// Without a policy the candidate is valid when its trimmed form is
/// non-empty. With a policy, minimum/maximum length and the email and phone
/// format restrictions are checked independently; every failing check
/// contributes one error.
#[must_use]
pub fn validate_username(candidate: &str, policy: Option<&UsernamePolicy>) -> UsernameValidation {
    let Some(policy) = policy else {
        let errors = if candidate.trim().is_empty() {
            vec![UsernameError::new(username_codes::REQUIRED, REQUIRED_MESSAGE)]
        } else {
            Vec::new()
        };
        return UsernameValidation::from_errors(errors);
    };

    let min_length = policy.effective_min_length();
    let max_length = policy.effective_max_length();
    let formats = policy.effective_formats();
    let length = candidate.chars().count();

    let mut errors = Vec::new();

    if length < usize::try_from(min_length).unwrap_or(usize::MAX) {
        errors.push(UsernameError::new(
            username_codes::TOO_SHORT,
            format!("Username must be at least {min_length} characters."),
        ));
    }

    if length > usize::try_from(max_length).unwrap_or(usize::MAX) {
        errors.push(UsernameError::new(
            username_codes::TOO_LONG,
            format!("Username must be at most {max_length} characters."),
        ));
    }

    if !formats.email_allowed() && is_email_shaped(candidate) {
        errors.push(UsernameError::new(
            username_codes::EMAIL_NOT_ALLOWED,
            EMAIL_NOT_ALLOWED_MESSAGE,
        ));
    }

    if !formats.phone_allowed() && is_phone_shaped(candidate) {
        errors.push(UsernameError::new(
            username_codes::PHONE_NOT_ALLOWED,
            PHONE_NOT_ALLOWED_MESSAGE,
        ));
    }

    UsernameValidation::from_errors(errors)
}

// ============================================================================
// SECTION: Shape Checks
// ============================================================================

/// Returns whether the candidate matches the `local@domain.tld` shape.
///
/// The shape requires no whitespace, exactly one `@`, a non-empty local
/// part, and a domain with a dot that has characters on both sides.
#[must_use]
pub fn is_email_shaped(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = candidate.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    has_interior_dot(domain)
}

/// Returns whether the domain has a dot with characters on both sides.
fn has_interior_dot(domain: &str) -> bool {
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

/// Returns whether the candidate matches an international phone shape.
///
/// Whitespace is stripped first; the remainder must be an optional `+`
/// followed by 7 to 15 ASCII digits and nothing else.
#[must_use]
pub fn is_phone_shaped(candidate: &str) -> bool {
    let normalized: String = candidate.chars().filter(|ch| !ch.is_whitespace()).collect();
    let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
    let count = digits.chars().count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&count)
        && digits.chars().all(|ch| ch.is_ascii_digit())
}
