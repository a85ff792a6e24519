// crates/screenflow-core/src/runtime/password.rs
// ============================================================================
// Module: Screenflow Password Rule Evaluator
// Description: Policy-driven password validation with nested rule groups.
// Purpose: Produce structured per-rule reports for UI consumption.
// Dependencies: crate::core::{policy, validation}
// ============================================================================

//! ## Overview
//! The password evaluator walks the policy's ordered rule list and annotates
//! each rule with a computed status. Character-class membership is scanned
//! once per call and reused by the group-with-threshold rule family. The
//! evaluator is pure and total: identical `(candidate, policy)` inputs yield
//! structurally identical reports, and malformed policy shapes degrade to
//! documented defaults instead of failing the call. Unknown rule codes are
//! reported as valid so a newer server policy never blocks submission.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::policy::ComplexityRule;
use crate::core::policy::PasswordPolicy;
use crate::core::policy::PolicyLevel;
use crate::core::policy::RuleCode;
use crate::core::validation::EvaluatedRule;
use crate::core::validation::PasswordValidation;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Hard cap on the group-with-threshold pass requirement.
const GROUP_THRESHOLD: usize = 3;

/// Run length that trips the identical-characters rule.
const IDENTICAL_RUN: usize = 3;

/// Label for the synthetic missing-password rule.
const NO_PASSWORD_LABEL: &str = "Password is required.";

// ============================================================================
// SECTION: Character Class Checks
// ============================================================================

/// Character-class membership computed once per validation call.
///
/// # Invariants
/// - Reflects the candidate passed to [`ClassChecks::scan`]; reused by leaf
///   rules and by group children without rescanning.
#[derive(Debug, Clone, Copy, Default)]
struct ClassChecks {
    /// Candidate contains an ASCII lowercase letter.
    lower: bool,
    /// Candidate contains an ASCII uppercase letter.
    upper: bool,
    /// Candidate contains an ASCII digit.
    digit: bool,
    /// Candidate contains a non-alphanumeric character or underscore.
    special: bool,
    /// Candidate contains three identical consecutive characters.
    triple_identical: bool,
}

impl ClassChecks {
    /// Scans the candidate in a single pass.
    fn scan(candidate: &str) -> Self {
        let mut checks = Self::default();
        let mut prev: Option<char> = None;
        let mut run = 0_usize;
        for ch in candidate.chars() {
            if ch.is_ascii_lowercase() {
                checks.lower = true;
            } else if ch.is_ascii_uppercase() {
                checks.upper = true;
            } else if ch.is_ascii_digit() {
                checks.digit = true;
            }
            if !ch.is_ascii_alphanumeric() || ch == '_' {
                checks.special = true;
            }
            run = if prev == Some(ch) { run + 1 } else { 1 };
            if run >= IDENTICAL_RUN {
                checks.triple_identical = true;
            }
            prev = Some(ch);
        }
        checks
    }

    /// Returns the memoized outcome for a character-class rule code.
    fn class_for(self, code: &RuleCode) -> Option<bool> {
        match code.as_str() {
            RuleCode::LOWER_CASE => Some(self.lower),
            RuleCode::UPPER_CASE => Some(self.upper),
            RuleCode::NUMBERS => Some(self.digit),
            RuleCode::SPECIAL_CHARACTERS => Some(self.special),
            _ => None,
        }
    }

    /// Returns how many of the four class checks passed.
    fn passed_count(self) -> usize {
        [self.lower, self.upper, self.digit, self.special]
            .into_iter()
            .filter(|passed| *passed)
            .count()
    }
}

// ============================================================================
// SECTION: Password Validation
// ============================================================================

/// Validates a password candidate against a declared policy.
///
/// With no policy (or tier `none`) the only check is a non-empty candidate.
/// Tier `low` without explicit rules reduces to a minimum-length check.
/// Otherwise the policy's rules are evaluated in order; the overall outcome
/// is the logical AND over all top-level rule statuses.
#[must_use]
pub fn validate_password(candidate: &str, policy: Option<&PasswordPolicy>) -> PasswordValidation {
    let Some(policy) = policy.filter(|policy| policy.level != PolicyLevel::None) else {
        return no_policy_validation(candidate);
    };

    let min_length = policy.effective_min_length();
    if policy.level == PolicyLevel::Low && policy.security_info.is_empty() {
        return low_policy_validation(candidate, min_length);
    }

    let checks = ClassChecks::scan(candidate);
    let results = policy
        .security_info
        .iter()
        .map(|rule| evaluate_rule(rule, candidate, min_length, checks))
        .collect();
    PasswordValidation::from_results(results)
}

/// Validates under the "no policy" contract: only non-emptiness is checked.
fn no_policy_validation(candidate: &str) -> PasswordValidation {
    let results = if candidate.is_empty() {
        vec![EvaluatedRule::synthetic(
            RuleCode::NO_PASSWORD,
            NO_PASSWORD_LABEL,
            false,
        )]
    } else {
        Vec::new()
    };
    PasswordValidation::from_results(results)
}

/// Validates under the low tier without explicit rules: length only.
fn low_policy_validation(candidate: &str, min_length: u32) -> PasswordValidation {
    let is_valid = char_length(candidate) >= required_length(min_length);
    let rule = EvaluatedRule::synthetic(
        RuleCode::NOT_CONFORMANT,
        format!("Password must be at least {min_length} characters long."),
        is_valid,
    );
    PasswordValidation::from_results(vec![rule])
}

/// Evaluates one top-level policy rule by code.
fn evaluate_rule(
    rule: &ComplexityRule,
    candidate: &str,
    min_length: u32,
    checks: ClassChecks,
) -> EvaluatedRule {
    match rule.code.as_str() {
        RuleCode::LENGTH_AT_LEAST => {
            let required = rule
                .args
                .and_then(|args| args.count)
                .unwrap_or(min_length);
            EvaluatedRule::leaf(rule, char_length(candidate) >= required_length(required))
        }
        RuleCode::IDENTICAL_CHARS => {
            EvaluatedRule::leaf(rule, !candidate.is_empty() && !checks.triple_identical)
        }
        RuleCode::CONTAINS_AT_LEAST => evaluate_group(rule, checks),
        RuleCode::LOWER_CASE
        | RuleCode::UPPER_CASE
        | RuleCode::NUMBERS
        | RuleCode::SPECIAL_CHARACTERS => {
            EvaluatedRule::leaf(rule, checks.class_for(&rule.code).unwrap_or(false))
        }
        // Unknown rules never block submission; the server enforces them.
        _ => EvaluatedRule::leaf(rule, true),
    }
}

/// Evaluates the group-with-threshold rule family.
///
/// With children present, each child is annotated from the memoized class
/// checks and the parent passes when at least `min(3, child count)` children
/// pass. Without children, the declared count argument stands in for the
/// child count and the aggregate class-check tally is compared against
/// `min(3, declared)`.
fn evaluate_group(rule: &ComplexityRule, checks: ClassChecks) -> EvaluatedRule {
    match rule.items.as_deref() {
        Some(items) if !items.is_empty() => {
            let threshold = GROUP_THRESHOLD.min(items.len());
            let annotated: Vec<EvaluatedRule> = items
                .iter()
                .map(|child| {
                    EvaluatedRule::leaf(child, checks.class_for(&child.code).unwrap_or(false))
                })
                .collect();
            let passed = annotated.iter().filter(|child| child.is_valid).count();
            EvaluatedRule::group(rule, annotated, passed >= threshold)
        }
        _ => {
            let declared = rule.args.and_then(|args| args.count).unwrap_or(0);
            let threshold = GROUP_THRESHOLD.min(required_length(declared));
            EvaluatedRule::leaf(rule, checks.passed_count() >= threshold)
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the candidate length in Unicode scalar values.
fn char_length(candidate: &str) -> usize {
    candidate.chars().count()
}

/// Widens a policy length bound into a comparable count.
fn required_length(required: u32) -> usize {
    usize::try_from(required).unwrap_or(usize::MAX)
}
