// crates/screenflow-core/tests/username.rs
// ============================================================================
// Module: Username Evaluator Tests
// Description: Tests for length bounds and format restrictions.
// ============================================================================
//! ## Overview
//! Validates independent error accumulation and the email/phone shape
//! heuristics of the username evaluator.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use screenflow_core::AllowedFormats;
use screenflow_core::USERNAME_FIELD;
use screenflow_core::UsernamePolicy;
use screenflow_core::runtime::username::is_email_shaped;
use screenflow_core::runtime::username::is_phone_shaped;
use screenflow_core::username_codes;
use screenflow_core::validate_username;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

fn restrictive_policy() -> UsernamePolicy {
    UsernamePolicy {
        min_length: Some(3),
        max_length: Some(15),
        allowed_formats: Some(AllowedFormats {
            email: Some(false),
            phone: Some(false),
        }),
    }
}

fn codes(report: &screenflow_core::UsernameValidation) -> Vec<&str> {
    report.errors.iter().map(|error| error.code.as_str()).collect()
}

// ============================================================================
// SECTION: No-Policy Contract
// ============================================================================

#[test]
fn no_policy_requires_nonblank_candidate() {
    assert!(!validate_username("", None).is_valid);
    assert!(!validate_username("   ", None).is_valid);
    assert!(validate_username("pat", None).is_valid);
}

#[test]
fn no_policy_failure_is_field_scoped() {
    let report = validate_username("\t", None);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, username_codes::REQUIRED);
    assert_eq!(report.errors[0].field, USERNAME_FIELD);
}

// ============================================================================
// SECTION: Length Bounds
// ============================================================================

#[test]
fn length_bounds_default_to_one_and_thirty() {
    let policy = UsernamePolicy::default();
    assert!(!validate_username("", Some(&policy)).is_valid);
    assert!(validate_username("a", Some(&policy)).is_valid);
    assert!(validate_username(&"a".repeat(30), Some(&policy)).is_valid);
    assert!(!validate_username(&"a".repeat(31), Some(&policy)).is_valid);
}

#[test]
fn too_short_carries_the_policy_minimum_in_the_message() {
    let report = validate_username("ab", Some(&restrictive_policy()));
    assert!(!report.is_valid);
    assert_eq!(codes(&report), vec![username_codes::TOO_SHORT]);
    assert_eq!(
        report.errors[0].message,
        "Username must be at least 3 characters."
    );
}

#[test]
fn too_long_is_reported_against_the_policy_maximum() {
    let report = validate_username(&"x".repeat(16), Some(&restrictive_policy()));
    assert_eq!(codes(&report), vec![username_codes::TOO_LONG]);
}

// ============================================================================
// SECTION: Format Restrictions
// ============================================================================

#[test]
fn email_shaped_username_is_rejected_when_disallowed() {
    let report = validate_username("pat@example.com", Some(&restrictive_policy()));
    assert_eq!(codes(&report), vec![username_codes::EMAIL_NOT_ALLOWED]);
}

#[test]
fn email_shaped_username_passes_when_allowed() {
    let policy = UsernamePolicy {
        min_length: Some(3),
        max_length: Some(40),
        allowed_formats: Some(AllowedFormats {
            email: Some(true),
            phone: Some(false),
        }),
    };
    assert!(validate_username("pat@example.com", Some(&policy)).is_valid);
}

#[test]
fn phone_shaped_username_is_rejected_when_disallowed() {
    let report = validate_username("+14155550123", Some(&restrictive_policy()));
    assert_eq!(codes(&report), vec![username_codes::PHONE_NOT_ALLOWED]);
}

#[test]
fn absent_format_flags_default_to_allowed() {
    let policy = UsernamePolicy {
        min_length: Some(1),
        max_length: Some(40),
        allowed_formats: None,
    };
    assert!(validate_username("pat@example.com", Some(&policy)).is_valid);
    assert!(validate_username("+14155550123", Some(&policy)).is_valid);
}

#[test]
fn independent_checks_accumulate_multiple_errors() {
    let report = validate_username("pat.account@really-long-domain.example.com",
        Some(&restrictive_policy()));
    assert!(!report.is_valid);
    assert_eq!(
        codes(&report),
        vec![username_codes::TOO_LONG, username_codes::EMAIL_NOT_ALLOWED]
    );
}

// ============================================================================
// SECTION: Shape Heuristics
// ============================================================================

#[test]
fn email_shape_requires_an_interior_domain_dot() {
    assert!(is_email_shaped("a@b.co"));
    assert!(is_email_shaped("first.last@sub.example.com"));
    assert!(!is_email_shaped("a@b"));
    assert!(!is_email_shaped("a@.com"));
    assert!(!is_email_shaped("a@com."));
    assert!(!is_email_shaped("@example.com"));
    assert!(!is_email_shaped("a b@example.com"));
    assert!(!is_email_shaped("a@b@example.com"));
    assert!(!is_email_shaped("plainuser"));
}

#[test]
fn phone_shape_accepts_seven_to_fifteen_digits() {
    assert!(is_phone_shaped("1234567"));
    assert!(is_phone_shaped("+123456789012345"));
    assert!(is_phone_shaped("+1 415 555 0123"));
    assert!(!is_phone_shaped("123456"));
    assert!(!is_phone_shaped("+1234567890123456"));
    assert!(!is_phone_shaped("415-555-0123"));
    assert!(!is_phone_shaped("call-me"));
}
