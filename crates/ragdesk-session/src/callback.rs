//! OAuth callback reconciliation.
//!
//! The identity provider sends the browser back to the console with the
//! outcome in the query string:
//!
//! - `?auth=<value>`: success; `value` is the authorization to store
//! - `?error=<message>`: failure; `message` is shown to the user
//!
//! [`OAuthCallback::reconcile`] turns that transient query state into
//! durable session state and removes the consumed keys from the URL, so
//! the same callback can't be processed twice.
//!
//! # Re-entry
//!
//! `reconcile` is called on every location change and may be called
//! again with a location it has already seen (a re-render). It keeps no
//! "already ran" flag: the action is derived from the query alone, and
//! because consumed keys are stripped, the follow-up call sees a clean
//! query and does nothing.
//!
//! The pending error redirect is tied to the whole location. Arriving at
//! the location our own strip produced keeps it; arriving anywhere else
//! (another path, even with an equally empty query) means the user moved
//! on, and the redirect is dropped.
//!
//! ```text
//!   ?auth=X ──reconcile──→ store Authorization=X → strip auth → navigate /knowledge
//!   ?error=Y ─reconcile──→ notify Y → strip error → (1 s) → navigate /login
//!   (clean) ──reconcile──→ nothing
//! ```

use std::sync::Arc;

use ragdesk_defer::DeferredSlot;
use ragdesk_route::{Location, Navigator, QueryParams};
use ragdesk_store::CredentialStore;

use crate::{Notifier, SessionConfig};

/// Query key carrying a successful handoff.
pub const AUTH_PARAM: &str = "auth";
/// Query key carrying a failed handoff.
pub const ERROR_PARAM: &str = "error";

/// What a call to [`OAuthCallback::reconcile`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Neither `auth` nor `error` was present.
    Idle,
    /// The exact same location was reconciled on the previous call.
    AlreadyHandled,
    /// `error` was present: notified, stripped, login redirect scheduled.
    RedirectScheduled { message: String },
    /// `auth` was present: stored, stripped, navigated to the landing route.
    Authorized,
}

/// Result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub action: CallbackAction,
    /// The handoff value carried by the reconciled query, if any. Login
    /// state derivation treats its presence as "logged in" while the
    /// store write becomes visible.
    pub auth: Option<String>,
}

/// Converts identity-provider redirects into session state.
///
/// Owns the pending error redirect: dropping the reconciler (or calling
/// [`teardown`](Self::teardown)) cancels it.
pub struct OAuthCallback {
    store: CredentialStore,
    navigator: Navigator,
    notifier: Arc<dyn Notifier>,
    config: SessionConfig,
    /// The location reconciled most recently.
    last_seen: Option<Location>,
    /// The location this reconciler left behind after stripping. Arriving
    /// at it is the echo of our own rewrite, not a newer navigation.
    own_rewrite: Option<Location>,
    redirect: DeferredSlot,
}

impl OAuthCallback {
    pub fn new(
        store: CredentialStore,
        navigator: Navigator,
        notifier: Arc<dyn Notifier>,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
            config,
            last_seen: None,
            own_rewrite: None,
            redirect: DeferredSlot::new("oauth-error-redirect"),
        }
    }

    /// Reconciles the router's current location.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime when an error redirect has to be
    /// scheduled.
    pub fn reconcile_current(&mut self) -> Reconciliation {
        let location = self.navigator.location();
        self.reconcile(&location)
    }

    /// Reconciles `location`. See the module docs for the rules.
    ///
    /// Within one call the store write happens before the query rewrite,
    /// which happens before any navigation.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime when an error redirect has to be
    /// scheduled.
    pub fn reconcile(&mut self, location: &Location) -> Reconciliation {
        if self.last_seen.as_ref() == Some(location) {
            return Reconciliation {
                action: CallbackAction::AlreadyHandled,
                auth: handoff_value(&location.query),
            };
        }

        let is_own_rewrite = self.own_rewrite.as_ref() == Some(location);
        self.last_seen = Some(location.clone());
        self.own_rewrite = None;

        // A different location arriving before the delay elapsed means the
        // user went somewhere else; the stale redirect must not fire.
        if !is_own_rewrite && self.redirect.cancel() {
            tracing::debug!(path = %location.path, "pending login redirect superseded by navigation");
        }

        let query = &location.query;
        if let Some(message) = query.get_non_empty(ERROR_PARAM) {
            return self.handle_error(location, message.to_string());
        }

        if let Some(auth) = query.get_non_empty(AUTH_PARAM) {
            return self.handle_auth(location, auth.to_string());
        }

        Reconciliation {
            action: CallbackAction::Idle,
            auth: None,
        }
    }

    fn handle_error(&mut self, location: &Location, message: String) -> Reconciliation {
        tracing::info!(%message, "identity provider reported an error");
        self.notifier.error(&message);

        // A handoff value riding along with an error is not trusted.
        let mut stripped = location.query.without(ERROR_PARAM);
        stripped.remove(AUTH_PARAM);
        self.rewrite_query(location, stripped);

        let navigator = self.navigator.clone();
        let login = self.config.login_route.clone();
        self.redirect
            .schedule(self.config.error_redirect_delay, move || {
                navigator.navigate(&login);
            });

        Reconciliation {
            action: CallbackAction::RedirectScheduled { message },
            auth: None,
        }
    }

    fn handle_auth(&mut self, location: &Location, auth: String) -> Reconciliation {
        tracing::info!(len = auth.len(), "storing authorization from OAuth handoff");
        if let Err(e) = self.store.set_authorization(&auth) {
            tracing::warn!(error = %e, "failed to persist authorization");
        }

        self.rewrite_query(location, location.query.without(AUTH_PARAM));
        self.navigator.navigate(&self.config.landing_route);

        Reconciliation {
            action: CallbackAction::Authorized,
            auth: Some(auth),
        }
    }

    fn rewrite_query(&mut self, location: &Location, stripped: QueryParams) {
        self.navigator.set_query(&stripped);
        self.own_rewrite = Some(location.with_query(stripped));
    }

    /// `true` while a login redirect is waiting to fire.
    pub fn has_pending_redirect(&self) -> bool {
        self.redirect.is_pending()
    }

    /// Cancels any pending redirect. Called when the owning shell unmounts.
    pub fn teardown(&mut self) {
        if self.redirect.cancel() {
            tracing::debug!("pending login redirect cancelled on teardown");
        }
    }
}

fn handoff_value(query: &QueryParams) -> Option<String> {
    if query.get_non_empty(ERROR_PARAM).is_some() {
        return None;
    }
    query.get_non_empty(AUTH_PARAM).map(str::to_string)
}
