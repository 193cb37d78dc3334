//! Unified error type for the ragdesk console.

use ragdesk_route::RouteError;
use ragdesk_session::SessionError;
use ragdesk_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` variants let `?` convert sub-crate errors automatically.
/// None of these are raised while rendering: they come from building the
/// console, loading configuration, and the collaborator-facing calls.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A store-level error (file backend, encoding).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A route-level error (invalid base path).
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A session-level error (profile or tenant source).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The configuration document couldn't be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
}
