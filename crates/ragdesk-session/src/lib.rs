//! Session and authorization logic for ragdesk.
//!
//! This crate turns URL and storage state into the few signals the shell
//! needs:
//!
//! 1. **Reconciliation**: [`OAuthCallback`] consumes `auth` / `error`
//!    query parameters left by the identity provider.
//! 2. **Login state**: [`LoginWatch`] derives the tri-state
//!    [`LoginState`], re-checking once to absorb storage-write lag.
//! 3. **Mode**: [`Mode`] decides between full and simple chrome, and
//!    carries the `simple=1` flag across navigations.
//! 4. **Logout** and the request authorization header.
//!
//! # How it fits in the stack
//!
//! ```text
//! Shell (above)  ← picks chrome from LoginState + Mode
//!     ↕
//! Session Layer (this crate)
//!     ↕
//! Store (credentials) · Route (navigator) · Defer (timers)
//! ```

#![allow(async_fn_in_trait)]

mod callback;
mod config;
mod error;
mod login;
mod logout;
mod mode;
mod notify;
mod profile;

pub use callback::{AUTH_PARAM, CallbackAction, ERROR_PARAM, OAuthCallback, Reconciliation};
pub use config::SessionConfig;
pub use error::SessionError;
pub use login::{LoginState, LoginWatch};
pub use logout::{authorization_header, logout};
pub use mode::{Mode, SIMPLE_ON, SIMPLE_PARAM, has_simple_flag};
pub use notify::{LogNotifier, Notifier};
pub use profile::{
    DEFAULT_LANGUAGE, ProfileSummary, TenantEntry, TenantRole, TenantSource, UserInfoSource,
    has_pending_invite, refresh_profile,
};
