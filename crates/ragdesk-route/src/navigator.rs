//! The navigator: base-path-aware wrapper over the router primitive.

use std::sync::Arc;

use crate::{BasePath, Location, NavigateOptions, QueryParams, Router};

/// Navigation handle used by everything above the route layer.
///
/// Every path handed to [`navigate`](Self::navigate) is normalized
/// against the base path before it reaches the [`Router`]. Cheap to clone.
#[derive(Clone)]
pub struct Navigator {
    router: Arc<dyn Router>,
    base: BasePath,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Wraps `router`, rooting navigations under `base`.
    pub fn new(router: impl Router, base: BasePath) -> Self {
        Self::from_shared(Arc::new(router), base)
    }

    pub fn from_shared(router: Arc<dyn Router>, base: BasePath) -> Self {
        Self { router, base }
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Pushes a navigation to `path`.
    pub fn navigate(&self, path: &str) {
        self.navigate_with(path, NavigateOptions::default());
    }

    /// Replaces the current history entry with `path`.
    pub fn replace(&self, path: &str) {
        self.navigate_with(path, NavigateOptions::replace());
    }

    /// Navigates to `path` with explicit options.
    pub fn navigate_with(&self, path: &str, options: NavigateOptions) {
        let target = self.base.normalize(path);
        tracing::debug!(requested = path, %target, replace = options.replace, "navigate");
        self.router.navigate(&target, options);
    }

    /// The current location.
    pub fn location(&self) -> Location {
        self.router.location()
    }

    /// The current query parameters.
    pub fn query(&self) -> QueryParams {
        self.router.location().query
    }

    /// Rewrites the current location's query in place.
    pub fn set_query(&self, query: &QueryParams) {
        self.router.set_query(query);
    }
}
