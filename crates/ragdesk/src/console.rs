//! `Console` builder and the per-navigation render pass.
//!
//! This ties the layers together: store → session → shell. The host (a
//! UI runtime, the demo binary, a test) calls [`Console::render`] on mount
//! and after every location change; everything else is derived.

use std::sync::Arc;

use ragdesk_route::{BasePath, Location, Navigator, Router};
use ragdesk_session::{
    CallbackAction, LogNotifier, LoginState, LoginWatch, Mode, Notifier, OAuthCallback,
    ProfileSummary, TenantSource, UserInfoSource, has_pending_invite,
};
use ragdesk_store::{CredentialStore, KeyValueStore, UserInfo};
use tokio::sync::watch;

use crate::settings::{self, SettingsAction, SettingsKey};
use crate::{ConsoleConfig, ConsoleError, Shell};

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The location the pass ran against.
    pub location: Location,
    /// What the OAuth reconciler did.
    pub callback: CallbackAction,
    pub login: LoginState,
    pub mode: Mode,
    pub shell: Shell,
}

/// Builder for a [`Console`].
///
/// # Example
///
/// ```rust,ignore
/// let console = Console::builder()
///     .config(ConsoleConfig::default())
///     .notifier(MyToasts)
///     .build(FileStore::open("session.json")?, my_router)?;
/// ```
pub struct ConsoleBuilder {
    config: ConsoleConfig,
    notifier: Arc<dyn Notifier>,
}

impl ConsoleBuilder {
    /// A builder with the default config and a log-only notifier.
    pub fn new() -> Self {
        Self {
            config: ConsoleConfig::default(),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets where user-facing errors are shown.
    pub fn notifier(mut self, notifier: impl Notifier) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Builds a console over a storage backend and a router.
    ///
    /// # Errors
    /// [`ConsoleError::Route`] if the configured base path is invalid.
    pub fn build(
        self,
        backend: impl KeyValueStore,
        router: impl Router,
    ) -> Result<Console, ConsoleError> {
        let config = self.config.validated();
        let base: BasePath = config.base()?;
        let store = CredentialStore::new(backend).with_restricted_role(&config.restricted_role);
        let navigator = Navigator::new(router, base);

        let callback = OAuthCallback::new(
            store.clone(),
            navigator.clone(),
            self.notifier,
            config.session_config(),
        );
        let login = LoginWatch::new(store.clone(), config.login_recheck_delay());

        tracing::info!(base = %navigator.base(), "console ready");
        Ok(Console {
            config,
            store,
            navigator,
            callback,
            login,
        })
    }
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The session/authorization core of the console.
///
/// Owns the reconciler and the login watch, and with them every pending
/// timer. Dropping the console (or calling [`teardown`](Self::teardown))
/// cancels them, so nothing fires against a console that is gone.
pub struct Console {
    config: ConsoleConfig,
    store: CredentialStore,
    navigator: Navigator,
    callback: OAuthCallback,
    login: LoginWatch,
}

impl Console {
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::new()
    }

    /// Runs one render pass against the router's current location.
    ///
    /// 1. reconcile the OAuth callback parameters
    /// 2. feed the handoff value to the login watch
    /// 3. resolve the mode from the store and the query
    /// 4. pick the shell, and apply the index redirects (bare settings
    ///    route → profile page, simple home → chat)
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime: the login re-check and
    /// the error redirect are scheduled on the Tokio timer.
    pub fn render(&mut self) -> Frame {
        let reconciliation = self.callback.reconcile_current();
        let login = self.login.on_handoff(reconciliation.auth.as_deref());

        let location = self.navigator.location();
        let mode = Mode::resolve(&self.store, &location.query);
        let shell = Shell::select(login, mode);

        self.apply_index_redirects(&location, shell, mode);

        tracing::debug!(
            path = %location.path,
            %login,
            simple = mode.is_simple(),
            %shell,
            "render"
        );
        Frame {
            location,
            callback: reconciliation.action,
            login,
            mode,
            shell,
        }
    }

    fn apply_index_redirects(&self, location: &Location, shell: Shell, mode: Mode) {
        let base = self.navigator.base();
        if location.path == base.normalize(&self.config.settings_route) {
            // Bare settings route: show the first page, keeping the query.
            let mut target = settings::default_page(&self.config.settings_route);
            if !location.query.is_empty() {
                target = format!("{target}?{}", location.query);
            }
            self.navigator.replace(&target);
        } else if shell == Shell::ChatOnly
            && (location.path == base.as_str() || location.path == base.normalize("/"))
        {
            self.navigator.replace(&mode.carry(&self.config.simple_home_route));
        }
    }

    /// The current login state.
    pub fn login_state(&self) -> LoginState {
        self.login.state()
    }

    /// A receiver that sees every login-state change, including the one
    /// published by the delayed re-check.
    pub fn subscribe_login(&self) -> watch::Receiver<LoginState> {
        self.login.subscribe()
    }

    /// The mode for the current location.
    pub fn mode(&self) -> Mode {
        Mode::resolve(&self.store, &self.navigator.query())
    }

    /// Header avatar click: open the settings area, keeping simple mode.
    pub fn open_settings(&self) {
        let path = settings::entry_path(&self.config.settings_route, self.mode());
        self.navigator.navigate(&path);
    }

    /// Sidebar entries for the current mode.
    pub fn settings_menu(&self) -> &'static [SettingsKey] {
        SettingsKey::menu(self.mode())
    }

    /// Sidebar click.
    ///
    /// # Panics
    /// Panics outside a Tokio runtime when the key is
    /// [`SettingsKey::Logout`], like [`logout`](Self::logout).
    pub fn select_setting(&mut self, key: SettingsKey) {
        match settings::select(&self.config.settings_route, key, self.mode()) {
            SettingsAction::Logout => self.logout(),
            SettingsAction::Navigate(path) => self.navigator.navigate(&path),
        }
    }

    /// Clears the session, re-derives login state and goes to the login page.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime (schedules the re-check).
    pub fn logout(&mut self) {
        ragdesk_session::logout(&self.store, &self.navigator, &self.config.login_route);
        // Any handoff value was consumed by the callback long before.
        self.login.on_handoff(None);
        self.login.refresh();
    }

    /// `Authorization` header value for outgoing requests.
    pub fn authorization_header(&self) -> String {
        ragdesk_session::authorization_header(&self.navigator.query(), &self.store)
    }

    /// Fetches and persists the profile, returning what the header shows.
    ///
    /// # Errors
    /// The source's error, or a store write failure. The stored profile is
    /// left untouched on failure.
    pub async fn refresh_profile<S: UserInfoSource>(
        &self,
        source: &S,
    ) -> Result<ProfileSummary, ConsoleError> {
        let fetched = ragdesk_session::refresh_profile(source, &self.store).await?;
        Ok(ProfileSummary::resolve(Some(&fetched), &self.store.user_info_object()))
    }

    /// What the header shows before (or without) a profile fetch.
    pub fn stored_profile(&self) -> ProfileSummary {
        ProfileSummary::resolve(None, &self.store.user_info_object())
    }

    /// Whether the header shows the invitation indicator.
    ///
    /// # Errors
    /// The tenant source's error.
    pub async fn has_pending_invite<T: TenantSource>(
        &self,
        source: &T,
    ) -> Result<bool, ConsoleError> {
        let tenants = source.list_tenants().await?;
        Ok(has_pending_invite(&tenants))
    }

    /// Stores the UI language.
    ///
    /// # Errors
    /// The store's write error.
    pub fn set_language(&self, code: &str) -> Result<(), ConsoleError> {
        self.store.set_language(code)?;
        Ok(())
    }

    pub fn language(&self) -> Option<String> {
        self.store.language()
    }

    /// The stored user info (empty if absent or corrupt).
    pub fn user_info(&self) -> UserInfo {
        self.store.user_info_object()
    }

    /// The credential store, for profile and language flows elsewhere in
    /// the application.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Cancels every pending timer. Called when the host unmounts.
    pub fn teardown(&mut self) {
        self.callback.teardown();
        self.login.teardown();
        tracing::debug!("console torn down");
    }
}
