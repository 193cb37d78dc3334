//! Session-layer settings.

use std::time::Duration;

/// Routes and timings used by the session layer.
///
/// Routes are written relative to the base path (`"/login"`, not
/// `"/rag/login"`); the navigator roots them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Where a failed handoff ends up. Default `/login`.
    pub login_route: String,

    /// Where a successful handoff lands. Default `/knowledge`.
    pub landing_route: String,

    /// How long the error notification stays up before the redirect to
    /// the login route. Default 1 s.
    pub error_redirect_delay: Duration,

    /// Delay before the single login-state re-check. Default 50 ms.
    pub login_recheck_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
            landing_route: "/knowledge".to_string(),
            error_redirect_delay: Duration::from_secs(1),
            login_recheck_delay: Duration::from_millis(50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.login_route, "/login");
        assert_eq!(config.landing_route, "/knowledge");
        assert_eq!(config.error_redirect_delay, Duration::from_secs(1));
        assert_eq!(config.login_recheck_delay, Duration::from_millis(50));
    }
}
