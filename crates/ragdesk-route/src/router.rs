//! The router seam and an in-memory history router.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Location, QueryParams};

/// Options for a navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    /// Options for a history-replacing navigation.
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// The underlying router.
///
/// [`navigate`](Self::navigate) is the single navigation primitive. Code
/// outside this crate never calls it directly: it goes through
/// [`Navigator`](crate::Navigator), which roots every path under the base.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because deferred redirects hold the router
/// inside a spawned timer task.
pub trait Router: Send + Sync + 'static {
    /// Goes to `path` (already normalized by the caller).
    fn navigate(&self, path: &str, options: NavigateOptions);

    /// The current location.
    fn location(&self) -> Location;

    /// Rewrites the query parameters of the current location in place,
    /// without changing the path.
    fn set_query(&self, query: &QueryParams);
}

/// One entry in a [`MemoryRouter`]'s history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub location: Location,
    pub replace: bool,
}

#[derive(Debug, Default)]
struct MemoryRouterState {
    current: Location,
    history: Vec<HistoryEntry>,
    navigations: usize,
}

/// A [`Router`] that keeps its history in memory.
///
/// Used by the demo and the tests. Clones share state, so a test can hand
/// one clone to the console and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    state: Arc<Mutex<MemoryRouterState>>,
}

impl MemoryRouter {
    /// A router sitting at `initial` (e.g. `"/rag/?auth=abc"`).
    pub fn at(initial: &str) -> Self {
        let location = Location::parse(initial);
        Self {
            state: Arc::new(Mutex::new(MemoryRouterState {
                current: location.clone(),
                history: vec![HistoryEntry {
                    location,
                    replace: false,
                }],
                navigations: 0,
            })),
        }
    }

    /// Every location visited, oldest first, including the initial one.
    /// Query rewrites via [`Router::set_query`] update the latest entry.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.clone()
    }

    /// How many times [`Router::navigate`] has been called.
    pub fn navigation_count(&self) -> usize {
        self.lock().navigations
    }

    /// Paths passed to `navigate`, in call order.
    pub fn navigated_paths(&self) -> Vec<String> {
        let state = self.lock();
        state
            .history
            .iter()
            .skip(1)
            .map(|e| e.location.path.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryRouterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Router for MemoryRouter {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        let mut state = self.lock();
        let next = state.current.resolve(path);
        state.current = next.clone();
        state.navigations += 1;
        state.history.push(HistoryEntry {
            location: next,
            replace: options.replace,
        });
    }

    fn location(&self) -> Location {
        self.lock().current.clone()
    }

    fn set_query(&self, query: &QueryParams) {
        let mut state = self.lock();
        state.current.query = query.clone();
        let current = state.current.clone();
        if let Some(last) = state.history.last_mut() {
            last.location = current;
        }
    }
}
