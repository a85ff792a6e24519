// crates/screenflow-core/tests/password.rs
// ============================================================================
// Module: Password Evaluator Tests
// Description: Tests for policy tiers, rule groups, and determinism.
// ============================================================================
//! ## Overview
//! Validates per-rule annotation, tier fallbacks, and the structural
//! determinism of the password evaluator.

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

use proptest::prelude::any;
use proptest::prelude::proptest;
use screenflow_core::ComplexityRule;
use screenflow_core::PasswordPolicy;
use screenflow_core::PolicyLevel;
use screenflow_core::RuleCode;
use screenflow_core::RuleStatus;
use screenflow_core::validate_password;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

fn class_children() -> Vec<ComplexityRule> {
    vec![
        ComplexityRule::leaf(RuleCode::LOWER_CASE, "Lower case letters (a-z)"),
        ComplexityRule::leaf(RuleCode::UPPER_CASE, "Upper case letters (A-Z)"),
        ComplexityRule::leaf(RuleCode::NUMBERS, "Numbers (0-9)"),
        ComplexityRule::leaf(RuleCode::SPECIAL_CHARACTERS, "Special characters (e.g. !@#)"),
    ]
}

fn good_policy() -> PasswordPolicy {
    PasswordPolicy::new(PolicyLevel::Good)
        .with_min_length(8)
        .with_rules(vec![
            ComplexityRule::leaf(RuleCode::LENGTH_AT_LEAST, "At least 8 characters in length")
                .with_count(8),
            ComplexityRule::leaf(RuleCode::CONTAINS_AT_LEAST, "Contain at least 3 of the following")
                .with_count(3)
                .with_items(class_children()),
        ])
}

// ============================================================================
// SECTION: No-Policy Tier
// ============================================================================

#[test]
fn no_policy_rejects_empty_candidate_with_synthetic_rule() {
    let report = validate_password("", None);
    assert!(!report.is_valid);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].code.as_str(), RuleCode::NO_PASSWORD);
    assert_eq!(report.results[0].status, RuleStatus::Error);
}

#[test]
fn no_policy_accepts_any_nonempty_candidate() {
    let report = validate_password("x", None);
    assert!(report.is_valid);
    assert!(report.results.is_empty());
}

#[test]
fn tier_none_behaves_like_no_policy() {
    let policy = PasswordPolicy::new(PolicyLevel::None).with_min_length(20);
    let report = validate_password("short", Some(&policy));
    assert!(report.is_valid);
    assert!(report.results.is_empty());
}

// ============================================================================
// SECTION: Low Tier
// ============================================================================

#[test]
fn low_tier_without_rules_checks_minimum_length_only() {
    let policy = PasswordPolicy::new(PolicyLevel::Low).with_min_length(6);
    let failing = validate_password("abc", Some(&policy));
    assert!(!failing.is_valid);
    assert_eq!(failing.results.len(), 1);
    assert_eq!(failing.results[0].code.as_str(), RuleCode::NOT_CONFORMANT);
    assert_eq!(
        failing.results[0].label,
        "Password must be at least 6 characters long."
    );

    let passing = validate_password("abcdef", Some(&policy));
    assert!(passing.is_valid);
}

#[test]
fn low_tier_defaults_to_minimum_length_eight() {
    let policy = PasswordPolicy::new(PolicyLevel::Low);
    assert!(!validate_password("1234567", Some(&policy)).is_valid);
    assert!(validate_password("12345678", Some(&policy)).is_valid);
}

#[test]
fn length_is_measured_in_unicode_scalars() {
    let policy = PasswordPolicy::new(PolicyLevel::Low).with_min_length(8);
    // Eight two-byte scalars satisfy an eight-character minimum.
    assert!(validate_password("éééééééé", Some(&policy)).is_valid);
}

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

#[test]
fn length_rule_prefers_declared_count_over_policy_minimum() {
    let policy = PasswordPolicy::new(PolicyLevel::Fair)
        .with_min_length(8)
        .with_rules(vec![
            ComplexityRule::leaf(RuleCode::LENGTH_AT_LEAST, "At least 10 characters").with_count(10),
        ]);
    assert!(!validate_password("12345678", Some(&policy)).is_valid);
    assert!(validate_password("1234567890", Some(&policy)).is_valid);
}

#[test]
fn length_rule_falls_back_to_policy_minimum_without_count() {
    let policy = PasswordPolicy::new(PolicyLevel::Fair)
        .with_min_length(4)
        .with_rules(vec![ComplexityRule::leaf(
            RuleCode::LENGTH_AT_LEAST,
            "At least 4 characters",
        )]);
    assert!(!validate_password("abc", Some(&policy)).is_valid);
    assert!(validate_password("abcd", Some(&policy)).is_valid);
}

#[test]
fn class_rules_report_ascii_membership() {
    let policy = PasswordPolicy::new(PolicyLevel::Fair).with_rules(class_children());
    let report = validate_password("aB3!", Some(&policy));
    assert!(report.is_valid);
    assert!(report.results.iter().all(|rule| rule.is_valid));

    let lower_only = validate_password("abcd", Some(&policy));
    assert!(!lower_only.is_valid);
    let passed: Vec<&str> = lower_only
        .results
        .iter()
        .filter(|rule| rule.is_valid)
        .map(|rule| rule.code.as_str())
        .collect();
    assert_eq!(passed, vec![RuleCode::LOWER_CASE]);
}

#[test]
fn underscore_counts_as_special_character() {
    let policy = PasswordPolicy::new(PolicyLevel::Fair).with_rules(vec![ComplexityRule::leaf(
        RuleCode::SPECIAL_CHARACTERS,
        "Special characters",
    )]);
    assert!(validate_password("abc_def", Some(&policy)).is_valid);
    assert!(!validate_password("abcdef1", Some(&policy)).is_valid);
}

#[test]
fn identical_chars_rule_rejects_three_in_a_row() {
    let policy = PasswordPolicy::new(PolicyLevel::Excellent).with_rules(vec![ComplexityRule::leaf(
        RuleCode::IDENTICAL_CHARS,
        "No more than 2 identical characters in a row",
    )]);
    assert!(validate_password("aabbcc", Some(&policy)).is_valid);
    assert!(!validate_password("aaabcd", Some(&policy)).is_valid);
    assert!(!validate_password("xyzzzx", Some(&policy)).is_valid);
    assert!(!validate_password("", Some(&policy)).is_valid);
}

#[test]
fn unknown_rule_codes_never_block_submission() {
    let policy = PasswordPolicy::new(PolicyLevel::Fair).with_rules(vec![ComplexityRule::leaf(
        "password-policy-entropy-check",
        "Future server-side rule",
    )]);
    let report = validate_password("anything", Some(&policy));
    assert!(report.is_valid);
    assert_eq!(
        report.results[0].code.as_str(),
        "password-policy-entropy-check"
    );
}

// ============================================================================
// SECTION: Group Rules
// ============================================================================

#[test]
fn group_annotates_children_and_caps_threshold_at_three() {
    let policy = good_policy();
    // Three of four classes present: passes the capped threshold.
    let report = validate_password("abcdefG1", Some(&policy));
    assert!(report.is_valid);

    let group = &report.results[1];
    let children = group.items.as_ref().unwrap();
    assert_eq!(children.len(), 4);
    assert!(children[0].is_valid); // lower
    assert!(children[1].is_valid); // upper
    assert!(children[2].is_valid); // numbers
    assert!(!children[3].is_valid); // special
}

#[test]
fn group_threshold_shrinks_to_child_count() {
    let children = vec![
        ComplexityRule::leaf(RuleCode::LOWER_CASE, "Lower case letters (a-z)"),
        ComplexityRule::leaf(RuleCode::NUMBERS, "Numbers (0-9)"),
    ];
    let policy = PasswordPolicy::new(PolicyLevel::Fair).with_rules(vec![
        ComplexityRule::leaf(RuleCode::CONTAINS_AT_LEAST, "Contain all of the following")
            .with_count(3)
            .with_items(children),
    ]);
    // Both of the two children pass; min(3, 2) = 2.
    assert!(validate_password("abc123", Some(&policy)).is_valid);
    assert!(!validate_password("abcdef", Some(&policy)).is_valid);
}

#[test]
fn group_without_children_compares_aggregate_class_tally() {
    let policy = PasswordPolicy::new(PolicyLevel::Good).with_rules(vec![
        ComplexityRule::leaf(RuleCode::CONTAINS_AT_LEAST, "Contain at least 3 of the following")
            .with_count(3),
    ]);
    assert!(validate_password("aB1xxxxx", Some(&policy)).is_valid);
    assert!(!validate_password("abcdefgh", Some(&policy)).is_valid);
}

#[test]
fn group_without_children_or_count_passes_vacuously() {
    let policy = PasswordPolicy::new(PolicyLevel::Good).with_rules(vec![ComplexityRule::leaf(
        RuleCode::CONTAINS_AT_LEAST,
        "Contain at least some of the following",
    )]);
    assert!(validate_password("", Some(&policy)).is_valid);
}

// ============================================================================
// SECTION: Report Structure
// ============================================================================

#[test]
fn report_mirrors_policy_rule_order() {
    let policy = good_policy();
    let report = validate_password("weak", Some(&policy));
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].code.as_str(), RuleCode::LENGTH_AT_LEAST);
    assert_eq!(report.results[1].code.as_str(), RuleCode::CONTAINS_AT_LEAST);
}

#[test]
fn overall_outcome_is_conjunction_of_top_level_rules() {
    let policy = good_policy();
    // Long enough but only one character class.
    let report = validate_password("abcdefghij", Some(&policy));
    assert!(!report.is_valid);
    assert!(report.results[0].is_valid);
    assert!(!report.results[1].is_valid);
}

// ============================================================================
// SECTION: Determinism
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(candidate in any::<String>()) {
        let policy = good_policy();
        let first = validate_password(&candidate, Some(&policy));
        let second = validate_password(&candidate, Some(&policy));
        assert_eq!(first, second);
    }

    #[test]
    fn overall_flag_agrees_with_rule_statuses(candidate in any::<String>()) {
        let policy = good_policy();
        let report = validate_password(&candidate, Some(&policy));
        let conjunction = report.results.iter().all(|rule| rule.is_valid);
        assert_eq!(report.is_valid, conjunction);
        for rule in &report.results {
            assert_eq!(rule.is_valid, rule.status.is_valid());
        }
    }
}
