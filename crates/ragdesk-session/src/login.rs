//! Login-state derivation.
//!
//! "Is the user logged in?" is answered from two inputs:
//!
//! - a non-empty authorization value in the [`CredentialStore`]
//! - the handoff value the OAuth callback just reported
//!
//! `logged_in = stored_authorization || handoff_present`.
//!
//! # The bounded re-check
//!
//! A store write made by the callback may not be visible to a read made
//! in the same turn (the storage backend can lag, and another tab may be
//! clearing keys at the same moment). So every evaluation runs twice:
//! once immediately and once after a short fixed delay, and the later
//! result wins. That second read is scheduled exactly once per
//! evaluation, superseded by the next evaluation, and cancelled on
//! teardown. It is never repeated.
//!
//! ```text
//! on_handoff(auth) ──→ evaluate now ──→ publish
//!                  └─→ (50 ms) evaluate again ──→ publish if changed
//! ```

use std::sync::Arc;
use std::time::Duration;

use ragdesk_defer::DeferredSlot;
use ragdesk_store::CredentialStore;
use tokio::sync::watch;

/// Tri-state login signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginState {
    /// Not evaluated yet. The shell shows nothing rather than guessing.
    #[default]
    Unknown,
    LoggedIn,
    LoggedOut,
}

impl LoginState {
    pub fn from_bool(logged_in: bool) -> Self {
        if logged_in {
            Self::LoggedIn
        } else {
            Self::LoggedOut
        }
    }

    /// `None` while unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::LoggedIn => Some(true),
            Self::LoggedOut => Some(false),
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl std::fmt::Display for LoginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::LoggedIn => write!(f, "LoggedIn"),
            Self::LoggedOut => write!(f, "LoggedOut"),
        }
    }
}

/// Derives and publishes [`LoginState`].
///
/// Observers either poll [`state`](Self::state) or hold a
/// [`subscribe`](Self::subscribe) receiver and wait for changes.
pub struct LoginWatch {
    store: CredentialStore,
    state: Arc<watch::Sender<LoginState>>,
    /// Handoff value of the last evaluation; `None` until the first one.
    last_handoff: Option<Option<String>>,
    recheck: DeferredSlot,
    recheck_delay: Duration,
}

impl LoginWatch {
    /// A watch in the [`LoginState::Unknown`] state.
    pub fn new(store: CredentialStore, recheck_delay: Duration) -> Self {
        let (state, _) = watch::channel(LoginState::Unknown);
        Self {
            store,
            state: Arc::new(state),
            last_handoff: None,
            recheck: DeferredSlot::new("login-recheck"),
            recheck_delay,
        }
    }

    /// The latest published state.
    pub fn state(&self) -> LoginState {
        *self.state.borrow()
    }

    /// A receiver that sees every published change.
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    /// Feeds the callback's latest handoff value.
    ///
    /// Re-evaluates only when the value differs from the previous call,
    /// so calling this on every render is cheap and schedules nothing new.
    ///
    /// # Panics
    /// Panics if a re-evaluation is needed outside a Tokio runtime.
    pub fn on_handoff(&mut self, handoff: Option<&str>) -> LoginState {
        let handoff = handoff.map(str::to_string);
        if self.last_handoff.as_ref() == Some(&handoff) {
            return self.state();
        }
        self.last_handoff = Some(handoff);
        self.refresh()
    }

    /// Re-evaluates with the current handoff value (immediate read plus
    /// one delayed re-check). Used after the store is changed directly,
    /// e.g. by logout.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime (the re-check is spawned
    /// on the Tokio timer).
    pub fn refresh(&mut self) -> LoginState {
        let handoff_present = self
            .last_handoff
            .as_ref()
            .is_some_and(|h| h.as_deref().is_some_and(|v| !v.is_empty()));

        let now = evaluate(&self.store, handoff_present);
        publish(&self.state, now);

        let store = self.store.clone();
        let state = Arc::clone(&self.state);
        self.recheck.schedule(self.recheck_delay, move || {
            let later = evaluate(&store, handoff_present);
            if publish(&state, later) {
                tracing::debug!(state = %later, "login state changed on re-check");
            }
        });

        now
    }

    /// `true` while the re-check hasn't run.
    pub fn has_pending_recheck(&self) -> bool {
        self.recheck.is_pending()
    }

    /// Cancels the pending re-check. Called when the owner unmounts.
    pub fn teardown(&mut self) {
        self.recheck.cancel();
    }
}

fn evaluate(store: &CredentialStore, handoff_present: bool) -> LoginState {
    LoginState::from_bool(store.has_authorization() || handoff_present)
}

/// Publishes `next`; returns `true` if it differed from the current value.
fn publish(state: &watch::Sender<LoginState>, next: LoginState) -> bool {
    state.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            tracing::trace!(from = %current, to = %next, "login state");
            *current = next;
            true
        }
    })
}

#[cfg(test)]
mod tests {
    use ragdesk_store::MemoryStore;

    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    fn watch_over(store: &CredentialStore) -> LoginWatch {
        LoginWatch::new(store.clone(), DELAY)
    }

    #[test]
    fn test_login_state_as_bool() {
        assert_eq!(LoginState::Unknown.as_bool(), None);
        assert_eq!(LoginState::LoggedIn.as_bool(), Some(true));
        assert_eq!(LoginState::LoggedOut.as_bool(), Some(false));
        assert!(!LoginState::default().is_known());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state_is_unknown() {
        let store = CredentialStore::new(MemoryStore::new());
        let watch = watch_over(&store);
        assert_eq!(watch.state(), LoginState::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stored_authorization_is_logged_in() {
        let store = CredentialStore::new(MemoryStore::new());
        store.set_authorization("abc").unwrap();
        let mut watch = watch_over(&store);
        assert_eq!(watch.on_handoff(None), LoginState::LoggedIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handoff_alone_is_logged_in() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        assert_eq!(watch.on_handoff(Some("abc")), LoginState::LoggedIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_logged_out() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        assert_eq!(watch.on_handoff(None), LoginState::LoggedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recheck_picks_up_later_write() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        assert_eq!(watch.on_handoff(None), LoginState::LoggedOut);

        // A write lands between the two reads.
        store.set_authorization("abc").unwrap();
        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
        assert_eq!(watch.state(), LoginState::LoggedIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_handoff_does_not_reschedule() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        watch.on_handoff(None);
        tokio::time::sleep(DELAY * 2).await;
        assert!(!watch.has_pending_recheck());

        watch.on_handoff(None);
        assert!(!watch.has_pending_recheck(), "unchanged input schedules nothing");
    }

    #[tokio::test(start_paused = true)]
    async fn test_recheck_runs_once_not_polling() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        watch.on_handoff(None);
        tokio::time::sleep(DELAY * 2).await;

        // Writes after the single re-check aren't picked up until the
        // next evaluation.
        store.set_authorization("abc").unwrap();
        tokio::time::sleep(DELAY * 10).await;
        assert_eq!(watch.state(), LoginState::LoggedOut);
        assert_eq!(watch.refresh(), LoginState::LoggedIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_recheck() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        watch.on_handoff(None);
        watch.teardown();

        store.set_authorization("abc").unwrap();
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(watch.state(), LoginState::LoggedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_change() {
        let store = CredentialStore::new(MemoryStore::new());
        let mut watch = watch_over(&store);
        let mut rx = watch.subscribe();
        watch.on_handoff(Some("abc"));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), LoginState::LoggedIn);
    }
}
