//! Error types for the route layer.

/// Errors that can occur while configuring routing.
///
/// Navigation itself never fails: the router primitive is fire-and-forget,
/// so the only thing that can be wrong is the configuration.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The base path must be absolute and not just `/`.
    #[error("invalid base path: {0:?}")]
    InvalidBasePath(String),
}
