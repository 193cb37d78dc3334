//! Error types for the session layer.

use ragdesk_store::StoreError;

/// Errors that can occur in the session layer.
///
/// None of these reach shell selection: reconciliation and login-state
/// derivation log failures and carry on. They surface only from the
/// collaborator-facing operations (profile refresh, tenant listing) whose
/// callers decide what to show.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Writing to the credential store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A collaborator (profile or tenant source) failed to answer.
    #[error("{source_name} unavailable: {reason}")]
    SourceUnavailable {
        source_name: &'static str,
        reason: String,
    },
}
