//! Shell selection: which chrome wraps the current page.

use ragdesk_session::{LoginState, Mode};

/// The chrome variant to render.
///
/// ```text
/// LoginState::Unknown    → Pending   (render nothing yet)
/// LoginState::LoggedOut  → Login
/// LoggedIn + simple mode → ChatOnly
/// LoggedIn + full mode   → Admin
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Pending,
    Login,
    /// Minimal chat chrome for restricted users or `simple=1`.
    ChatOnly,
    /// Full administrative chrome.
    Admin,
}

impl Shell {
    pub fn select(login: LoginState, mode: Mode) -> Self {
        match login {
            LoginState::Unknown => Self::Pending,
            LoginState::LoggedOut => Self::Login,
            LoginState::LoggedIn if mode.is_simple() => Self::ChatOnly,
            LoginState::LoggedIn => Self::Admin,
        }
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Login => write!(f, "Login"),
            Self::ChatOnly => write!(f, "ChatOnly"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: Mode = Mode {
        by_role: false,
        by_flag: false,
    };
    const SIMPLE: Mode = Mode {
        by_role: true,
        by_flag: false,
    };

    #[test]
    fn test_select_unknown_is_pending_regardless_of_mode() {
        assert_eq!(Shell::select(LoginState::Unknown, FULL), Shell::Pending);
        assert_eq!(Shell::select(LoginState::Unknown, SIMPLE), Shell::Pending);
    }

    #[test]
    fn test_select_logged_out_is_login() {
        assert_eq!(Shell::select(LoginState::LoggedOut, SIMPLE), Shell::Login);
    }

    #[test]
    fn test_select_logged_in_follows_mode() {
        assert_eq!(Shell::select(LoginState::LoggedIn, SIMPLE), Shell::ChatOnly);
        assert_eq!(Shell::select(LoginState::LoggedIn, FULL), Shell::Admin);
    }

    #[test]
    fn test_shell_display() {
        assert_eq!(Shell::ChatOnly.to_string(), "ChatOnly");
    }
}
