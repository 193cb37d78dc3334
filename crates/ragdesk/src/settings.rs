//! User-settings navigation.
//!
//! The settings area is a sidebar of pages under the settings route.
//! In simple mode only the pages a restricted user may touch are offered,
//! and every navigation inside the area carries the `simple=1` flag
//! forward when that is how simple mode was entered.

use std::fmt;

use ragdesk_session::Mode;

/// A page (or action) in the settings sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    Profile,
    Password,
    Model,
    System,
    Api,
    Team,
    Logout,
}

impl SettingsKey {
    /// Full menu, in display order.
    pub const ALL: [Self; 7] = [
        Self::Profile,
        Self::Password,
        Self::Model,
        Self::System,
        Self::Api,
        Self::Team,
        Self::Logout,
    ];

    /// Menu offered in simple mode.
    pub const SIMPLE: [Self; 3] = [Self::Profile, Self::Password, Self::Logout];

    /// The path segment under the settings route.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Password => "password",
            Self::Model => "model",
            Self::System => "system",
            Self::Api => "api",
            Self::Team => "team",
            Self::Logout => "logout",
        }
    }

    pub fn parse(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == segment)
    }

    /// The menu for `mode`.
    pub fn menu(mode: Mode) -> &'static [Self] {
        if mode.is_simple() {
            &Self::SIMPLE
        } else {
            &Self::ALL
        }
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What selecting a sidebar entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Run the logout operation.
    Logout,
    /// Navigate to this path (relative to the base path).
    Navigate(String),
}

/// Resolves a sidebar selection.
///
/// Paths are built from the *flag* trigger only: a role-driven simple
/// mode is re-derived from the store on the next page anyway.
pub fn select(settings_route: &str, key: SettingsKey, mode: Mode) -> SettingsAction {
    match key {
        SettingsKey::Logout => SettingsAction::Logout,
        page => SettingsAction::Navigate(mode.carry(&format!("{settings_route}/{page}"))),
    }
}

/// The path the header's avatar opens.
pub fn entry_path(settings_route: &str, mode: Mode) -> String {
    mode.carry(settings_route)
}

/// The first settings page, used when the bare settings route is visited.
pub fn default_page(settings_route: &str) -> String {
    format!("{settings_route}/{}", SettingsKey::Profile)
}
