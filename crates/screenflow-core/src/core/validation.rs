// crates/screenflow-core/src/core/validation.rs
// ============================================================================
// Module: Screenflow Validation Results
// Description: Structured pass/fail reports produced by the rule evaluator.
// Purpose: Surface per-rule outcomes as data, never as errors or panics.
// Dependencies: crate::core::policy, serde
// ============================================================================

//! ## Overview
//! Validation results mirror the declarative rules they were evaluated
//! against, annotated with a computed status. Failures are recoverable data
//! for UI consumption; the evaluator never throws for well-formed inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::policy::ComplexityRule;
use crate::core::policy::RuleArgs;
use crate::core::policy::RuleCode;

// ============================================================================
// SECTION: Rule Status
// ============================================================================

/// Computed pass/fail status for an evaluated rule.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// The candidate satisfies the rule.
    Valid,
    /// The candidate violates the rule.
    Error,
}

impl RuleStatus {
    /// Returns the status for a boolean outcome.
    #[must_use]
    pub const fn from_outcome(is_valid: bool) -> Self {
        if is_valid { Self::Valid } else { Self::Error }
    }

    /// Returns whether the status is [`RuleStatus::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

// ============================================================================
// SECTION: Evaluated Rules
// ============================================================================

/// Complexity rule annotated with its computed outcome.
///
/// # Invariants
/// - Mirrors the declarative rule it was evaluated from; nested `items` are
///   annotated in place.
/// - `is_valid` always agrees with `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedRule {
    /// Stable rule identifier.
    pub code: RuleCode,
    /// Display text for the rule.
    pub label: String,
    /// Optional rule arguments carried over from the policy.
    pub args: Option<RuleArgs>,
    /// Annotated child rules for the group-with-threshold family.
    pub items: Option<Vec<EvaluatedRule>>,
    /// Computed pass/fail status.
    pub status: RuleStatus,
    /// Boolean mirror of `status`.
    pub is_valid: bool,
}

impl EvaluatedRule {
    /// Annotates a leaf rule with the provided outcome.
    #[must_use]
    pub fn leaf(rule: &ComplexityRule, is_valid: bool) -> Self {
        Self {
            code: rule.code.clone(),
            label: rule.label.clone(),
            args: rule.args,
            items: None,
            status: RuleStatus::from_outcome(is_valid),
            is_valid,
        }
    }

    /// Annotates a group rule with its annotated children and outcome.
    #[must_use]
    pub fn group(rule: &ComplexityRule, items: Vec<Self>, is_valid: bool) -> Self {
        Self {
            code: rule.code.clone(),
            label: rule.label.clone(),
            args: rule.args,
            items: Some(items),
            status: RuleStatus::from_outcome(is_valid),
            is_valid,
        }
    }

    /// Builds a synthetic result rule not present in the policy.
    #[must_use]
    pub fn synthetic(code: impl Into<RuleCode>, label: impl Into<String>, is_valid: bool) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            args: None,
            items: None,
            status: RuleStatus::from_outcome(is_valid),
            is_valid,
        }
    }
}

// ============================================================================
// SECTION: Password Validation
// ============================================================================

/// Structured password validation report.
///
/// # Invariants
/// - `is_valid` is the logical AND over all top-level evaluated rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordValidation {
    /// Overall outcome across all top-level rules.
    pub is_valid: bool,
    /// Per-rule evaluation results in policy order.
    pub results: Vec<EvaluatedRule>,
}

impl PasswordValidation {
    /// Builds a report from evaluated rules, deriving the overall outcome.
    #[must_use]
    pub fn from_results(results: Vec<EvaluatedRule>) -> Self {
        let is_valid = results.iter().all(|rule| rule.status.is_valid());
        Self { is_valid, results }
    }
}

// ============================================================================
// SECTION: Username Validation
// ============================================================================

/// Field name attached to every username validation error.
pub const USERNAME_FIELD: &str = "username";

/// Stable error codes for username validation.
pub mod username_codes {
    /// Username is missing.
    pub const REQUIRED: &str = "username-required";
    /// Username is shorter than the policy minimum.
    pub const TOO_SHORT: &str = "username-too-short";
    /// Username is longer than the policy maximum.
    pub const TOO_LONG: &str = "username-too-long";
    /// Email-shaped usernames are not allowed by the policy.
    pub const EMAIL_NOT_ALLOWED: &str = "username-email-not-allowed";
    /// Phone-shaped usernames are not allowed by the policy.
    pub const PHONE_NOT_ALLOWED: &str = "username-phone-not-allowed";
}

/// Single username validation failure.
///
/// # Invariants
/// - `code` is one of the [`username_codes`] constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameError {
    /// Stable error code.
    pub code: String,
    /// Human-readable message for display.
    pub message: String,
    /// Field the error is scoped to (always `username`).
    pub field: String,
}

impl UsernameError {
    /// Creates a username error with the provided code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: USERNAME_FIELD.to_owned(),
        }
    }
}

/// Structured username validation report.
///
/// # Invariants
/// - `is_valid` holds exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameValidation {
    /// Overall outcome across all checks.
    pub is_valid: bool,
    /// Accumulated validation failures.
    pub errors: Vec<UsernameError>,
}

impl UsernameValidation {
    /// Builds a report from accumulated errors, deriving the overall outcome.
    #[must_use]
    pub fn from_errors(errors: Vec<UsernameError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
