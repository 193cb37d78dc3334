//! Logout and the request authorization header.

use ragdesk_route::{Navigator, QueryParams};
use ragdesk_store::CredentialStore;

use crate::AUTH_PARAM;

/// The `Authorization` header value for outgoing requests.
///
/// A handoff still sitting in the URL wins (its store write may not be
/// visible yet); otherwise the stored value is used as-is. Empty when
/// neither exists.
pub fn authorization_header(query: &QueryParams, store: &CredentialStore) -> String {
    match query.get_non_empty(AUTH_PARAM) {
        Some(auth) => format!("Bearer {auth}"),
        None => store.authorization().unwrap_or_default(),
    }
}

/// Clears the session and sends the user to the login route.
///
/// The language preference survives. A store failure is logged and the
/// redirect still happens: a user who asked to log out must not stay on
/// an authenticated page.
pub fn logout(store: &CredentialStore, navigator: &Navigator, login_route: &str) {
    if let Err(e) = store.clear_all() {
        tracing::warn!(error = %e, "logout could not clear every session key");
    }
    tracing::info!("logged out");
    navigator.navigate(login_route);
}
