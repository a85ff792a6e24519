// crates/screenflow-core/src/core/policy.rs
// ============================================================================
// Module: Screenflow Credential Policies
// Description: Server-declared password and username policy snapshots.
// Purpose: Model declarative validation policies with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Policies are immutable snapshots supplied by the caller per validation
//! call; the engine never mutates them. Password policies carry an ordered
//! list of complexity rules; a rule with nested `items` is a
//! group-with-threshold ("at least N of the following"), while a rule without
//! items is a leaf evaluated directly against the candidate string. Unknown
//! rule codes are preserved verbatim for forward compatibility.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Policy Levels
// ============================================================================

/// Ordered password policy tier.
///
/// # Invariants
/// - Variant order is the tier order; comparisons rely on it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PolicyLevel {
    /// No policy; only a non-empty candidate is required.
    #[default]
    None,
    /// Minimum-length check only.
    Low,
    /// Length plus basic character classes.
    Fair,
    /// Length plus a class threshold.
    Good,
    /// Strictest tier.
    Excellent,
}

// ============================================================================
// SECTION: Rule Codes
// ============================================================================

/// Stable identifier for a complexity rule.
///
/// # Invariants
/// - Opaque UTF-8 string; unknown codes round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCode(String);

impl RuleCode {
    /// Minimum-length rule.
    pub const LENGTH_AT_LEAST: &'static str = "password-policy-length-at-least";
    /// Lowercase character-class rule.
    pub const LOWER_CASE: &'static str = "password-policy-lower-case";
    /// Uppercase character-class rule.
    pub const UPPER_CASE: &'static str = "password-policy-upper-case";
    /// Digit character-class rule.
    pub const NUMBERS: &'static str = "password-policy-numbers";
    /// Special character-class rule.
    pub const SPECIAL_CHARACTERS: &'static str = "password-policy-special-characters";
    /// Consecutive identical character rule.
    pub const IDENTICAL_CHARS: &'static str = "password-policy-identical-chars";
    /// Group-with-threshold rule ("at least N of the following").
    pub const CONTAINS_AT_LEAST: &'static str = "password-policy-contains-at-least";
    /// Synthetic result code for a missing candidate under no policy.
    pub const NO_PASSWORD: &'static str = "no_password";
    /// Synthetic result code for the low-tier minimum-length check.
    pub const NOT_CONFORMANT: &'static str = "password-policy-not-conformant";

    /// Creates a rule code from a wire string.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RuleCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RuleCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Complexity Rules
// ============================================================================

/// Optional arguments attached to a complexity rule.
///
/// # Invariants
/// - `count` semantics depend on the rule code that carries the arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleArgs {
    /// Numeric threshold for length or group rules.
    pub count: Option<u32>,
}

/// Declarative password complexity rule.
///
/// # Invariants
/// - A rule with `items` is a group-with-threshold evaluated over its
///   children; a rule without `items` is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityRule {
    /// Stable rule identifier.
    pub code: RuleCode,
    /// Display text for the rule.
    pub label: String,
    /// Optional rule arguments.
    pub args: Option<RuleArgs>,
    /// Nested child rules for the group-with-threshold family.
    pub items: Option<Vec<ComplexityRule>>,
}

impl ComplexityRule {
    /// Creates a leaf rule with the provided code and label.
    #[must_use]
    pub fn leaf(code: impl Into<RuleCode>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            args: None,
            items: None,
        }
    }

    /// Attaches a numeric threshold argument to the rule.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.args = Some(RuleArgs { count: Some(count) });
        self
    }

    /// Attaches nested child rules, turning the rule into a group.
    #[must_use]
    pub fn with_items(mut self, items: Vec<Self>) -> Self {
        self.items = Some(items);
        self
    }
}

// ============================================================================
// SECTION: Password Policy
// ============================================================================

/// Server-declared password policy snapshot.
///
/// # Invariants
/// - Immutable once constructed; the engine never mutates a policy.
/// - `security_info` order is evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Policy tier.
    #[serde(default)]
    pub level: PolicyLevel,
    /// Minimum candidate length; defaults to 8 when absent.
    pub min_length: Option<u32>,
    /// Ordered complexity rules for the policy.
    #[serde(default)]
    pub security_info: Vec<ComplexityRule>,
}

impl PasswordPolicy {
    /// Default minimum length applied when the policy omits one.
    pub const DEFAULT_MIN_LENGTH: u32 = 8;

    /// Creates a policy at the given tier with no rules.
    #[must_use]
    pub const fn new(level: PolicyLevel) -> Self {
        Self {
            level,
            min_length: None,
            security_info: Vec::new(),
        }
    }

    /// Sets the minimum candidate length.
    #[must_use]
    pub const fn with_min_length(mut self, min_length: u32) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the ordered complexity rules.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<ComplexityRule>) -> Self {
        self.security_info = rules;
        self
    }

    /// Returns the effective minimum length for the policy.
    #[must_use]
    pub fn effective_min_length(&self) -> u32 {
        self.min_length.unwrap_or(Self::DEFAULT_MIN_LENGTH)
    }
}

// ============================================================================
// SECTION: Username Policy
// ============================================================================

/// Username format flags declared by the connection configuration.
///
/// # Invariants
/// - Absent flags mean the format is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedFormats {
    /// Whether an email-shaped username is allowed.
    pub email: Option<bool>,
    /// Whether a phone-shaped username is allowed.
    pub phone: Option<bool>,
}

impl AllowedFormats {
    /// Returns whether email-shaped usernames are allowed (default `true`).
    #[must_use]
    pub fn email_allowed(self) -> bool {
        self.email.unwrap_or(true)
    }

    /// Returns whether phone-shaped usernames are allowed (default `true`).
    #[must_use]
    pub fn phone_allowed(self) -> bool {
        self.phone.unwrap_or(true)
    }
}

/// Server-declared username policy snapshot.
///
/// # Invariants
/// - Immutable once constructed; the engine never mutates a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernamePolicy {
    /// Minimum username length; defaults to 1 when absent.
    pub min_length: Option<u32>,
    /// Maximum username length; defaults to 30 when absent.
    pub max_length: Option<u32>,
    /// Allowed username format flags; absent flags default to allowed.
    pub allowed_formats: Option<AllowedFormats>,
}

impl UsernamePolicy {
    /// Default minimum length applied when the policy omits one.
    pub const DEFAULT_MIN_LENGTH: u32 = 1;
    /// Default maximum length applied when the policy omits one.
    pub const DEFAULT_MAX_LENGTH: u32 = 30;

    /// Returns the effective minimum length for the policy.
    #[must_use]
    pub fn effective_min_length(&self) -> u32 {
        self.min_length.unwrap_or(Self::DEFAULT_MIN_LENGTH)
    }

    /// Returns the effective maximum length for the policy.
    #[must_use]
    pub fn effective_max_length(&self) -> u32 {
        self.max_length.unwrap_or(Self::DEFAULT_MAX_LENGTH)
    }

    /// Returns the effective format flags for the policy.
    #[must_use]
    pub fn effective_formats(&self) -> AllowedFormats {
        self.allowed_formats.unwrap_or_default()
    }
}
