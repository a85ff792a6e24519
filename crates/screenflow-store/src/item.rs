// crates/screenflow-store/src/item.rs
// ============================================================================
// Module: Error Items
// Description: Classified error records and producer-side reports.
// Purpose: Model stored errors with stable identifiers and wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`ErrorItem`] is an immutable stored record; an [`ErrorReport`] is the
//! producer-side input that may omit the identifier. The store assigns ids
//! to reports lacking one and preserves ids that are already present, so
//! producers can re-submit identical lists without triggering notifications.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Error Kind
// ============================================================================

/// Classification of a reported error by origin.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Error returned by the server or backend.
    Server,
    /// Error from client-side validation.
    Client,
    /// Error caused by integration misuse.
    Developer,
}

impl ErrorKind {
    /// All kinds in bucket order.
    pub const ALL: [Self; 3] = [Self::Server, Self::Client, Self::Developer];

    /// Returns the stable wire label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Client => "client",
            Self::Developer => "developer",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Error Id
// ============================================================================

/// Process-unique error identifier.
///
/// # Invariants
/// - Generated ids are never reused within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorId(String);

impl ErrorId {
    /// Creates an error identifier from a wire string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ErrorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ErrorId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Stored Items
// ============================================================================

/// Immutable stored error record.
///
/// # Invariants
/// - Never mutated after insertion; replacement installs new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    /// Process-unique identifier.
    pub id: ErrorId,
    /// Stable error code.
    pub code: String,
    /// Human-readable message for display.
    pub message: String,
    /// Optional field the error is scoped to.
    pub field: Option<String>,
    /// Optional origin classification tag.
    pub kind: Option<ErrorKind>,
}

// ============================================================================
// SECTION: Producer Reports
// ============================================================================

/// Producer-side error input; the store assigns a missing id.
///
/// # Invariants
/// - A present `id` is preserved verbatim by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Optional pre-assigned identifier.
    pub id: Option<ErrorId>,
    /// Stable error code.
    pub code: String,
    /// Human-readable message for display.
    pub message: String,
    /// Optional field the error is scoped to.
    pub field: Option<String>,
    /// Optional origin classification tag.
    pub kind: Option<ErrorKind>,
}

impl ErrorReport {
    /// Creates a report with the provided code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
            message: message.into(),
            field: None,
            kind: None,
        }
    }

    /// Pre-assigns an identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ErrorId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Scopes the report to a field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Tags the report with an origin classification.
    #[must_use]
    pub const fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }
}
