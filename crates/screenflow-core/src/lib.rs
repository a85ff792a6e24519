// crates/screenflow-core/src/lib.rs
// ============================================================================
// Module: Screenflow Core
// Description: Policy-driven validation engine for identity-verification screens.
// Purpose: Provide the pure data model, rule evaluators, identifier resolver,
//          and backend-agnostic interfaces consumed by screen adapters.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Screenflow Core derives screen-specific facts from a host-supplied
//! transaction snapshot and validates user-entered credentials against
//! server-declared policies. Everything in this crate is pure and
//! synchronous: validation failures are structured data, configuration
//! absence is `None`, and no function here performs I/O or reads ambient
//! state. The polling controller and error store build on this crate from
//! their own crates.

/// Core data model: policies, identifiers, transaction snapshot, results.
pub mod core;
/// Backend-agnostic submission and approval-check interfaces.
pub mod interfaces;
/// Pure rule evaluators and the identifier resolver.
pub mod runtime;

pub use core::AllowedFormats;
pub use core::AllowedTypes;
pub use core::AttributeConfig;
pub use core::AttributeSet;
pub use core::AttributeValidation;
pub use core::AuthenticationMethods;
pub use core::ComplexityRule;
pub use core::Connection;
pub use core::ConnectionOptions;
pub use core::ConnectionStrategy;
pub use core::EvaluatedRule;
pub use core::IdentifierSets;
pub use core::IdentifierType;
pub use core::PasskeyMethod;
pub use core::PasswordMethod;
pub use core::PasswordPolicy;
pub use core::PasswordValidation;
pub use core::PolicyLevel;
pub use core::RuleArgs;
pub use core::RuleCode;
pub use core::RuleStatus;
pub use core::SignupStatus;
pub use core::TransactionContext;
pub use core::USERNAME_FIELD;
pub use core::UsernameError;
pub use core::UsernamePolicy;
pub use core::UsernameValidation;
pub use core::username_codes;
pub use interfaces::ChallengeProbe;
pub use interfaces::FormSubmitter;
pub use interfaces::ProbeFailure;
pub use interfaces::ProbeOutcome;
pub use interfaces::SubmitError;
pub use runtime::EnabledIdentifier;
pub use runtime::validate_password;
pub use runtime::validate_username;
