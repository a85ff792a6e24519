// crates/screenflow-core/src/runtime/mod.rs
// ============================================================================
// Module: Screenflow Runtime Evaluators
// Description: Pure evaluation functions over the core data model.
// Purpose: Expose the rule evaluator and identifier resolver contracts.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Runtime evaluators are synchronous, side-effect-free functions. They
//! never block, never throw for well-formed inputs, and require no locking;
//! concurrent callers get independent computations over their own inputs.

/// Password rule evaluation.
pub mod password;
/// Identifier and policy resolution over the transaction snapshot.
pub mod resolver;
/// Username rule evaluation.
pub mod username;

pub use password::validate_password;
pub use resolver::EnabledIdentifier;
pub use resolver::allowed_identifiers;
pub use resolver::enabled_identifiers;
pub use resolver::identifier_sets;
pub use resolver::is_forgot_password_enabled;
pub use resolver::is_passkey_enabled;
pub use resolver::is_signup_enabled;
pub use resolver::is_username_required;
pub use resolver::optional_identifiers;
pub use resolver::password_policy;
pub use resolver::required_identifiers;
pub use resolver::resolved_identifier_sets;
pub use resolver::username_policy;
pub use resolver::with_strategy_override;
pub use username::validate_username;
