//! Page-audit error types.
//!
//! Scoring never fails; the only hard failure boundary is the external page
//! auditor. These errors let callers tell a failed audit apart from a page
//! with zero violations.

use thiserror::Error;

/// Errors reported by a [`PageAuditor`](crate::audit::PageAuditor).
#[derive(Debug, Error)]
pub enum AuditError {
    /// The page could not be fetched.
    #[error("failed to load {source_label}: {message}")]
    Fetch {
        source_label: String,
        message: String,
    },

    /// The fetched content could not be parsed as HTML.
    #[error("failed to parse {source_label}: {message}")]
    Parse {
        source_label: String,
        message: String,
    },

    /// The rule engine itself failed.
    #[error("accessibility check failed: {0}")]
    Engine(String),
}

impl AuditError {
    /// Returns `true` if the page itself was unreachable or unreadable, as
    /// opposed to a failure inside the rule engine.
    pub fn is_source_error(&self) -> bool {
        matches!(self, AuditError::Fetch { .. } | AuditError::Parse { .. })
    }
}
