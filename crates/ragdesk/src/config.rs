//! Console configuration.

use std::time::Duration;

use ragdesk_route::{BasePath, DEFAULT_BASE_PATH, RouteError};
use ragdesk_session::SessionConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ConsoleError;

// ---------------------------------------------------------------------------
// ConsoleConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Console`](crate::Console).
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```rust
/// use ragdesk::ConsoleConfig;
///
/// let config = ConsoleConfig::from_json(r#"{ "base_path": "/kb" }"#).unwrap();
/// assert_eq!(config.base_path, "/kb");
/// assert_eq!(config.login_route, "/login");
/// ```
///
/// Routes are relative to the base path; the navigator roots them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prefix every programmatic navigation is rooted under.
    pub base_path: String,

    /// Login page. Failed handoffs and logouts end up here.
    pub login_route: String,

    /// Landing page after a successful handoff.
    pub landing_route: String,

    /// User settings root; sub-pages are `{settings_route}/{key}`.
    pub settings_route: String,

    /// Where simple mode's home page sends the user.
    pub simple_home_route: String,

    /// Role that switches the console to simple mode.
    pub restricted_role: String,

    /// Delay between the OAuth error toast and the login redirect.
    pub error_redirect_delay_ms: u64,

    /// Delay before the single login-state re-check.
    pub login_recheck_delay_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            login_route: "/login".to_string(),
            landing_route: "/knowledge".to_string(),
            settings_route: "/user-setting".to_string(),
            simple_home_route: "/chat".to_string(),
            restricted_role: "query".to_string(),
            error_redirect_delay_ms: 1_000,
            login_recheck_delay_ms: 50,
        }
    }
}

impl ConsoleConfig {
    /// Upper bound for either delay. Both are "a short moment", never a
    /// long wait.
    pub const MAX_DELAY_MS: u64 = 5_000;

    /// Parses a JSON document. Missing fields take their defaults; the
    /// result is [`validated`](Self::validated).
    ///
    /// # Errors
    /// [`ConsoleError::Config`] if the document isn't valid JSON or has a
    /// field of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, ConsoleError> {
        let config: Self = serde_json::from_str(json).map_err(ConsoleError::Config)?;
        Ok(config.validated())
    }

    /// Fixes out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`ConsoleBuilder::build`](crate::ConsoleBuilder::build). Rules:
    /// - delays capped to [`Self::MAX_DELAY_MS`]
    /// - routes without a leading `/` get one
    /// - an empty restricted role falls back to the default
    pub fn validated(mut self) -> Self {
        for (name, delay) in [
            ("error_redirect_delay_ms", &mut self.error_redirect_delay_ms),
            ("login_recheck_delay_ms", &mut self.login_recheck_delay_ms),
        ] {
            if *delay > Self::MAX_DELAY_MS {
                warn!(field = name, value = *delay, max = Self::MAX_DELAY_MS, "delay too long; clamping");
                *delay = Self::MAX_DELAY_MS;
            }
        }
        for route in [
            &mut self.login_route,
            &mut self.landing_route,
            &mut self.settings_route,
            &mut self.simple_home_route,
        ] {
            if !route.starts_with('/') {
                warn!(route = %route, "route is not absolute; prefixing '/'");
                route.insert(0, '/');
            }
        }
        if self.restricted_role.is_empty() {
            warn!("empty restricted_role; using default");
            self.restricted_role = Self::default().restricted_role;
        }
        self
    }

    /// The base path, validated.
    ///
    /// # Errors
    /// [`RouteError::InvalidBasePath`] for an empty or relative base.
    pub fn base(&self) -> Result<BasePath, RouteError> {
        BasePath::new(&self.base_path)
    }

    pub fn error_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.error_redirect_delay_ms)
    }

    pub fn login_recheck_delay(&self) -> Duration {
        Duration::from_millis(self.login_recheck_delay_ms)
    }

    /// The subset the session layer needs.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            login_route: self.login_route.clone(),
            landing_route: self.landing_route.clone(),
            error_redirect_delay: self.error_redirect_delay(),
            login_recheck_delay: self.login_recheck_delay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_default() {
        let config = ConsoleConfig::default();
        assert_eq!(config.base_path, "/rag");
        assert_eq!(config.restricted_role, "query");
        assert_eq!(config.error_redirect_delay(), Duration::from_secs(1));
        assert_eq!(config.login_recheck_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_default_matches_session_default() {
        assert_eq!(ConsoleConfig::default().session_config(), SessionConfig::default());
    }

    #[test]
    fn test_validated_clamps_delays() {
        let config = ConsoleConfig {
            error_redirect_delay_ms: 60_000,
            login_recheck_delay_ms: u64::MAX,
            ..Default::default()
        }
        .validated();
        assert_eq!(config.error_redirect_delay_ms, ConsoleConfig::MAX_DELAY_MS);
        assert_eq!(config.login_recheck_delay_ms, ConsoleConfig::MAX_DELAY_MS);
    }

    #[test]
    fn test_validated_roots_relative_routes() {
        let config = ConsoleConfig {
            login_route: "login".into(),
            ..Default::default()
        }
        .validated();
        assert_eq!(config.login_route, "/login");
    }

    #[test]
    fn test_validated_restores_empty_role() {
        let config = ConsoleConfig {
            restricted_role: String::new(),
            ..Default::default()
        }
        .validated();
        assert_eq!(config.restricted_role, "query");
    }

    #[test]
    fn test_from_json_partial_document() {
        let config =
            ConsoleConfig::from_json(r#"{"landing_route":"/datasets","login_recheck_delay_ms":80}"#)
                .unwrap();
        assert_eq!(config.landing_route, "/datasets");
        assert_eq!(config.login_recheck_delay_ms, 80);
        assert_eq!(config.login_route, "/login");
    }

    #[test]
    fn test_from_json_rejects_wrong_type() {
        let err = ConsoleConfig::from_json(r#"{"login_recheck_delay_ms":"soon"}"#).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_base_rejects_relative() {
        let config = ConsoleConfig {
            base_path: "rag".into(),
            ..Default::default()
        };
        assert!(config.base().is_err());
    }
}
