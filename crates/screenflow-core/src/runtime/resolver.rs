// crates/screenflow-core/src/runtime/resolver.rs
// ============================================================================
// Module: Screenflow Identifier Resolver
// Description: Reduction of the nested connection configuration into
//              identifier sets and policy snapshots.
// Purpose: Derive screen-facing facts from the host transaction snapshot.
// Dependencies: crate::core::{identifiers, policy, transaction}
// ============================================================================

//! ## Overview
//! The resolver is a family of pure projections over the transaction
//! snapshot. Absent configuration collapses to `None` (or `false` for
//! boolean projections), never to an error and never to an empty vector;
//! callers branch on the null-vs-empty distinction. The passwordless
//! strategy override is a post-processing step applied uniformly on top of
//! the generic attribute scan, never duplicated per caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ConnectionStrategy;
use crate::core::identifiers::IdentifierSets;
use crate::core::identifiers::IdentifierType;
use crate::core::policy::AllowedFormats;
use crate::core::policy::PasswordPolicy;
use crate::core::policy::UsernamePolicy;
use crate::core::transaction::PasswordMethod;
use crate::core::transaction::SignupStatus;
use crate::core::transaction::TransactionContext;

// ============================================================================
// SECTION: Boolean Projections
// ============================================================================

/// Returns whether signup is enabled for the connection.
#[must_use]
pub fn is_signup_enabled(tx: &TransactionContext) -> bool {
    tx.options()
        .and_then(|options| options.signup_enabled)
        .unwrap_or(false)
}

/// Returns whether the forgot-password flow is enabled.
#[must_use]
pub fn is_forgot_password_enabled(tx: &TransactionContext) -> bool {
    tx.options()
        .and_then(|options| options.forgot_password_enabled)
        .unwrap_or(false)
}

/// Returns whether passkey authentication is enabled.
#[must_use]
pub fn is_passkey_enabled(tx: &TransactionContext) -> bool {
    tx.options()
        .and_then(|options| options.authentication_methods.as_ref())
        .and_then(|methods| methods.passkey.as_ref())
        .and_then(|passkey| passkey.enabled)
        .unwrap_or(false)
}

/// Returns whether a username is required for authentication.
#[must_use]
pub fn is_username_required(tx: &TransactionContext) -> bool {
    tx.options()
        .and_then(|options| options.username_required)
        .unwrap_or(false)
}

// ============================================================================
// SECTION: Policy Projections
// ============================================================================

/// Maps the username attribute validation block into a policy snapshot.
///
/// Returns `None` when no username validation is configured. Absent allowed
/// type flags project to "not allowed".
#[must_use]
pub fn username_policy(tx: &TransactionContext) -> Option<UsernamePolicy> {
    let validation = tx
        .options()?
        .attributes
        .as_ref()?
        .username
        .as_ref()?
        .validation
        .as_ref()?;
    let allowed = validation.allowed_types.unwrap_or_default();
    Some(UsernamePolicy {
        min_length: validation.min_length,
        max_length: validation.max_length,
        allowed_formats: Some(AllowedFormats {
            email: Some(allowed.email.unwrap_or(false)),
            phone: Some(allowed.phone_number.unwrap_or(false)),
        }),
    })
}

/// Maps the password authentication method into a policy snapshot.
///
/// Returns `None` when no password block exists, and also when the block
/// carries neither an explicit policy tier nor a minimum length; a
/// configured-but-empty block means "no policy", not "default policy".
#[must_use]
pub fn password_policy(tx: &TransactionContext) -> Option<PasswordPolicy> {
    let method: &PasswordMethod = tx
        .options()?
        .authentication_methods
        .as_ref()?
        .password
        .as_ref()?;
    if method.policy.is_none() && method.min_length.is_none() {
        return None;
    }
    Some(PasswordPolicy {
        level: method.policy.unwrap_or_default(),
        min_length: method.min_length,
        security_info: method.password_security_info.clone().unwrap_or_default(),
    })
}

// ============================================================================
// SECTION: Identifier Projections
// ============================================================================

/// Scans the attribute blocks for identifiers matching the predicate.
///
/// Returns `None` when no attributes are configured or when the filter
/// matches nothing; an empty vector is never produced.
fn identifiers_matching(
    tx: &TransactionContext,
    include: impl Fn(SignupStatus) -> bool,
) -> Option<Vec<IdentifierType>> {
    let attributes = tx.options()?.attributes.as_ref()?;
    let matched: Vec<IdentifierType> = attributes
        .entries()
        .into_iter()
        .filter_map(|(kind, config)| {
            let status = config?.signup_status?;
            include(status).then_some(kind)
        })
        .collect();
    if matched.is_empty() { None } else { Some(matched) }
}

/// Returns the identifiers permitted for login or signup.
#[must_use]
pub fn allowed_identifiers(tx: &TransactionContext) -> Option<Vec<IdentifierType>> {
    identifiers_matching(tx, |status| {
        matches!(status, SignupStatus::Required | SignupStatus::Optional)
    })
}

/// Returns the identifiers that must be provided at signup.
#[must_use]
pub fn required_identifiers(tx: &TransactionContext) -> Option<Vec<IdentifierType>> {
    identifiers_matching(tx, |status| matches!(status, SignupStatus::Required))
}

/// Returns the identifiers that may be provided at signup.
#[must_use]
pub fn optional_identifiers(tx: &TransactionContext) -> Option<Vec<IdentifierType>> {
    identifiers_matching(tx, |status| matches!(status, SignupStatus::Optional))
}

/// Bundles the three identifier projections without any strategy override.
#[must_use]
pub fn identifier_sets(tx: &TransactionContext) -> IdentifierSets {
    IdentifierSets {
        allowed: allowed_identifiers(tx),
        required: required_identifiers(tx),
        optional: optional_identifiers(tx),
    }
}

// ============================================================================
// SECTION: Strategy Override
// ============================================================================

/// Applies the passwordless strategy override to resolved identifier sets.
///
/// Strategy `sms` collapses allowed and required identifiers to `[phone]`;
/// `email` collapses them to `[email]`. Any other strategy, including an
/// absent one, falls through to the generic attribute-scan result.
#[must_use]
pub fn with_strategy_override(
    strategy: Option<&ConnectionStrategy>,
    sets: IdentifierSets,
) -> IdentifierSets {
    let forced = match strategy {
        Some(ConnectionStrategy::Sms) => IdentifierType::Phone,
        Some(ConnectionStrategy::Email) => IdentifierType::Email,
        _ => return sets,
    };
    IdentifierSets {
        allowed: Some(vec![forced]),
        required: Some(vec![forced]),
        optional: None,
    }
}

/// Resolves identifier sets with the transaction's own strategy applied.
#[must_use]
pub fn resolved_identifier_sets(tx: &TransactionContext) -> IdentifierSets {
    with_strategy_override(tx.strategy(), identifier_sets(tx))
}

// ============================================================================
// SECTION: Enabled Identifiers
// ============================================================================

/// Identifier entry for display lists, with its mandatory flag.
///
/// # Invariants
/// - Passwordless strategies always yield a single required entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledIdentifier {
    /// Identifier type to collect.
    pub kind: IdentifierType,
    /// Whether the identifier is mandatory for signup.
    pub required: bool,
}

/// Merges required and optional identifiers into one display list.
///
/// Passwordless strategies (`sms`, `email`) yield the single mandatory
/// identifier for the strategy; otherwise required identifiers are listed
/// first, followed by optional ones.
#[must_use]
pub fn enabled_identifiers(
    required: Option<&[IdentifierType]>,
    optional: Option<&[IdentifierType]>,
    strategy: Option<&ConnectionStrategy>,
) -> Vec<EnabledIdentifier> {
    let forced = match strategy {
        Some(ConnectionStrategy::Sms) => Some(IdentifierType::Phone),
        Some(ConnectionStrategy::Email) => Some(IdentifierType::Email),
        _ => None,
    };
    if let Some(kind) = forced {
        return vec![EnabledIdentifier {
            kind,
            required: true,
        }];
    }

    let mut merged = Vec::new();
    for kind in required.unwrap_or_default() {
        merged.push(EnabledIdentifier {
            kind: *kind,
            required: true,
        });
    }
    for kind in optional.unwrap_or_default() {
        merged.push(EnabledIdentifier {
            kind: *kind,
            required: false,
        });
    }
    merged
}
