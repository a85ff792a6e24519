// crates/screenflow-core/src/core/identifiers.rs
// ============================================================================
// Module: Screenflow Identifiers
// Description: Credential identifier types and connection strategies.
// Purpose: Provide strongly typed identifier classifications with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the credential identifier types a login or signup
//! screen may collect, and the connection strategy backing a transaction.
//! Identifier sets distinguish "no configuration present" (`None`) from a
//! configured, non-empty selection; an empty vector is never produced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Credential identifier type collected by identity screens.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierType {
    /// Email address identifier.
    Email,
    /// Username identifier.
    Username,
    /// Phone number identifier.
    Phone,
}

impl IdentifierType {
    /// Returns the stable wire label for the identifier type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Identifier Sets
// ============================================================================

/// Resolved identifier classification for a connection configuration.
///
/// # Invariants
/// - `None` means "no configuration present"; it is never collapsed to an
///   empty vector, and populated vectors are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierSets {
    /// Identifiers permitted for login or signup (required plus optional).
    pub allowed: Option<Vec<IdentifierType>>,
    /// Identifiers that must be provided at signup.
    pub required: Option<Vec<IdentifierType>>,
    /// Identifiers that may be provided at signup.
    pub optional: Option<Vec<IdentifierType>>,
}

impl IdentifierSets {
    /// Returns an identifier set with no configuration present.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            allowed: None,
            required: None,
            optional: None,
        }
    }
}

// ============================================================================
// SECTION: Connection Strategy
// ============================================================================

/// Identity-source strategy backing a transaction.
///
/// # Invariants
/// - Unknown strategies are preserved verbatim and never fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionStrategy {
    /// Database-backed username/password connection.
    Auth0,
    /// Passwordless SMS connection.
    Sms,
    /// Passwordless email connection.
    Email,
    /// Any other strategy, preserved verbatim.
    Other(String),
}

impl ConnectionStrategy {
    /// Returns the stable wire label for the strategy.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auth0 => "auth0",
            Self::Sms => "sms",
            Self::Email => "email",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for ConnectionStrategy {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "auth0" => Self::Auth0,
            "sms" => Self::Sms,
            "email" => Self::Email,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for ConnectionStrategy {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<ConnectionStrategy> for String {
    fn from(strategy: ConnectionStrategy) -> Self {
        strategy.as_str().to_owned()
    }
}

impl fmt::Display for ConnectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
