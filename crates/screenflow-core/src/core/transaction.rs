// crates/screenflow-core/src/core/transaction.rs
// ============================================================================
// Module: Screenflow Transaction Context
// Description: Read-only snapshot of the host transaction configuration.
// Purpose: Model the nested connection-configuration schema the resolver reduces.
// Dependencies: crate::core::{identifiers, policy}, serde
// ============================================================================

//! ## Overview
//! The transaction context is a read-only projection of the host-supplied
//! `transaction` section. Every level of nesting is optional; absence of
//! data deserializes to `None` and never fails. The engine only ever reads
//! the `connection` subtree and never writes back to the host.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ConnectionStrategy;
use crate::core::identifiers::IdentifierType;
use crate::core::policy::ComplexityRule;
use crate::core::policy::PolicyLevel;

// ============================================================================
// SECTION: Transaction Context
// ============================================================================

/// Host-supplied transaction snapshot.
///
/// # Invariants
/// - Read-only; the engine never mutates the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContext {
    /// Opaque transaction state token.
    pub state: Option<String>,
    /// Connection backing the transaction.
    pub connection: Option<Connection>,
}

impl TransactionContext {
    /// Returns the connection options when present.
    #[must_use]
    pub fn options(&self) -> Option<&ConnectionOptions> {
        self.connection.as_ref()?.options.as_ref()
    }

    /// Returns the connection strategy when present.
    #[must_use]
    pub fn strategy(&self) -> Option<&ConnectionStrategy> {
        self.connection.as_ref()?.strategy.as_ref()
    }
}

/// Connection record inside the transaction snapshot.
///
/// # Invariants
/// - `strategy` preserves unknown values verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Connection name.
    pub name: Option<String>,
    /// Identity-source strategy for the connection.
    pub strategy: Option<ConnectionStrategy>,
    /// Nested connection options.
    pub options: Option<ConnectionOptions>,
}

/// Nested connection options.
///
/// # Invariants
/// - Absent fields mean "not configured", not "disabled by policy".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Whether signup is enabled for the connection.
    pub signup_enabled: Option<bool>,
    /// Whether the forgot-password flow is enabled.
    pub forgot_password_enabled: Option<bool>,
    /// Whether a username is required for authentication.
    pub username_required: Option<bool>,
    /// Identifier attribute configuration.
    pub attributes: Option<AttributeSet>,
    /// Authentication method configuration.
    pub authentication_methods: Option<AuthenticationMethods>,
}

// ============================================================================
// SECTION: Identifier Attributes
// ============================================================================

/// Identifier attribute blocks keyed by identifier type.
///
/// # Invariants
/// - Entry order (email, username, phone) is the resolver scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Email attribute configuration.
    pub email: Option<AttributeConfig>,
    /// Username attribute configuration.
    pub username: Option<AttributeConfig>,
    /// Phone attribute configuration.
    pub phone: Option<AttributeConfig>,
}

impl AttributeSet {
    /// Returns attribute entries in stable scan order.
    #[must_use]
    pub fn entries(&self) -> [(IdentifierType, Option<&AttributeConfig>); 3] {
        [
            (IdentifierType::Email, self.email.as_ref()),
            (IdentifierType::Username, self.username.as_ref()),
            (IdentifierType::Phone, self.phone.as_ref()),
        ]
    }
}

/// Declared signup status for an identifier attribute.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStatus {
    /// Identifier must be provided at signup.
    Required,
    /// Identifier may be provided at signup.
    Optional,
    /// Identifier is not collected at signup.
    Inactive,
}

/// Configuration for a single identifier attribute.
///
/// # Invariants
/// - An absent `signup_status` is treated as inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConfig {
    /// Declared signup status.
    pub signup_status: Option<SignupStatus>,
    /// Validation configuration for the attribute.
    pub validation: Option<AttributeValidation>,
}

/// Validation configuration nested inside an attribute block.
///
/// # Invariants
/// - Absent bounds fall back to evaluator defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValidation {
    /// Minimum accepted length.
    pub min_length: Option<u32>,
    /// Maximum accepted length.
    pub max_length: Option<u32>,
    /// Allowed value shapes for the attribute.
    pub allowed_types: Option<AllowedTypes>,
}

/// Allowed value shapes declared for an attribute.
///
/// # Invariants
/// - Absent flags map to "not allowed" when projected into a policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedTypes {
    /// Whether email-shaped values are allowed.
    pub email: Option<bool>,
    /// Whether phone-shaped values are allowed.
    pub phone_number: Option<bool>,
}

// ============================================================================
// SECTION: Authentication Methods
// ============================================================================

/// Authentication method configuration for the connection.
///
/// # Invariants
/// - Absent methods mean the method is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationMethods {
    /// Password method configuration.
    pub password: Option<PasswordMethod>,
    /// Passkey method configuration.
    pub passkey: Option<PasskeyMethod>,
}

/// Password method block carrying the declared policy.
///
/// # Invariants
/// - A block with neither `policy` nor `min_length` resolves to "no policy".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordMethod {
    /// Whether password authentication is enabled.
    pub enabled: Option<bool>,
    /// Declared policy tier.
    pub policy: Option<PolicyLevel>,
    /// Declared minimum password length.
    pub min_length: Option<u32>,
    /// Declared complexity rules.
    pub password_security_info: Option<Vec<ComplexityRule>>,
}

/// Passkey method block.
///
/// # Invariants
/// - An absent `enabled` flag means passkeys are disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasskeyMethod {
    /// Whether passkey authentication is enabled.
    pub enabled: Option<bool>,
}
