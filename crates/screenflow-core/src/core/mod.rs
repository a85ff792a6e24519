// crates/screenflow-core/src/core/mod.rs
// ============================================================================
// Module: Screenflow Core Data Model
// Description: Policy, identifier, transaction, and validation types.
// Purpose: Provide the immutable data model shared by the runtime evaluators.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The core data model is pure data: policy snapshots, identifier
//! classifications, the host transaction projection, and the structured
//! validation reports the evaluators produce. No module here performs I/O.

/// Credential identifier types and connection strategies.
pub mod identifiers;
/// Server-declared password and username policies.
pub mod policy;
/// Read-only host transaction snapshot.
pub mod transaction;
/// Structured validation reports.
pub mod validation;

pub use identifiers::ConnectionStrategy;
pub use identifiers::IdentifierSets;
pub use identifiers::IdentifierType;
pub use policy::AllowedFormats;
pub use policy::ComplexityRule;
pub use policy::PasswordPolicy;
pub use policy::PolicyLevel;
pub use policy::RuleArgs;
pub use policy::RuleCode;
pub use policy::UsernamePolicy;
pub use transaction::AttributeConfig;
pub use transaction::AttributeSet;
pub use transaction::AttributeValidation;
pub use transaction::AllowedTypes;
pub use transaction::AuthenticationMethods;
pub use transaction::Connection;
pub use transaction::ConnectionOptions;
pub use transaction::PasskeyMethod;
pub use transaction::PasswordMethod;
pub use transaction::SignupStatus;
pub use transaction::TransactionContext;
pub use validation::EvaluatedRule;
pub use validation::PasswordValidation;
pub use validation::RuleStatus;
pub use validation::USERNAME_FIELD;
pub use validation::UsernameError;
pub use validation::UsernameValidation;
pub use validation::username_codes;
