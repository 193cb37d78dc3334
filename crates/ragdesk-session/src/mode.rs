//! Simple-mode resolution.
//!
//! The console renders either its full admin chrome or a restricted
//! chat-only chrome ("simple mode"). Two independent triggers open simple
//! mode, combined with a plain OR and no precedence:
//!
//! - the stored user role is the restricted role
//! - the current location carries `simple=1`
//!
//! The resolution is recomputed from the store and the query on every
//! navigation; nothing caches it across route changes. The flag trigger
//! is kept as explicit state so navigations inside simple mode can carry
//! it forward with [`Mode::carry`] instead of silently dropping back to
//! full mode.

use ragdesk_route::QueryParams;
use ragdesk_store::CredentialStore;

/// Query key requesting simple mode.
pub const SIMPLE_PARAM: &str = "simple";
/// The only value of [`SIMPLE_PARAM`] that counts.
pub const SIMPLE_ON: &str = "1";

/// `true` if `query` carries `simple=1`.
pub fn has_simple_flag(query: &QueryParams) -> bool {
    query.get(SIMPLE_PARAM) == Some(SIMPLE_ON)
}

/// Which triggers are active for the current render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mode {
    /// The stored role is the restricted role.
    pub by_role: bool,
    /// The location carries `simple=1`.
    pub by_flag: bool,
}

impl Mode {
    /// Resolves the mode from the current session and query.
    pub fn resolve(store: &CredentialStore, query: &QueryParams) -> Self {
        Self {
            by_role: store.is_simple_role(),
            by_flag: has_simple_flag(query),
        }
    }

    /// Simple mode is on if either trigger is.
    pub fn is_simple(self) -> bool {
        self.by_role || self.by_flag
    }

    /// Appends `simple=1` to `path` when simple mode came from the flag.
    ///
    /// A role-driven simple mode needs no flag: the role is still stored
    /// on the next page. Paths that already carry the flag are returned
    /// unchanged.
    pub fn carry(self, path: &str) -> String {
        if !self.by_flag {
            return path.to_string();
        }
        match path.split_once('?') {
            Some((_, query)) if has_simple_flag(&QueryParams::parse(query)) => path.to_string(),
            Some((_, "")) => format!("{path}{SIMPLE_PARAM}={SIMPLE_ON}"),
            Some(_) => format!("{path}&{SIMPLE_PARAM}={SIMPLE_ON}"),
            None => format!("{path}?{SIMPLE_PARAM}={SIMPLE_ON}"),
        }
    }
}
