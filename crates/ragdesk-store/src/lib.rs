//! Durable session storage for ragdesk.
//!
//! This crate is the only place that touches persisted session state:
//!
//! 1. **Backends**: the [`KeyValueStore`] trait abstracts over where the
//!    strings live ([`MemoryStore`], [`FileStore`], [`DisabledStore`]).
//! 2. **Credentials**: [`CredentialStore`] is the constrained method set
//!    the rest of the console uses: token, authorization value, user info
//!    and language. Nothing outside this crate reads storage keys directly.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← reconciles OAuth callbacks, derives login state
//!     ↕
//! Store Layer (this crate)  ← persisted token / authorization / userInfo / lng
//! ```
//!
//! # Feature Flags
//!
//! - `file` (default): [`FileStore`], a JSON document on disk.

mod credentials;
mod error;
#[cfg(feature = "file")]
mod file;
mod memory;
mod user_info;

pub use credentials::CredentialStore;
pub use error::StoreError;
#[cfg(feature = "file")]
pub use file::FileStore;
pub use memory::{DisabledStore, MemoryStore};
pub use user_info::{UserInfo, UserInfoBlob};

/// Storage key names.
///
/// These are an external contract: the identity provider's redirect and
/// older builds of the console read and write the same keys, so they must
/// never change.
pub mod keys {
    /// Raw authorization value presented to the backend.
    pub const AUTHORIZATION: &str = "Authorization";
    /// Bearer token.
    pub const TOKEN: &str = "token";
    /// Serialized user-info object.
    pub const USER_INFO: &str = "userInfo";
    /// UI language code. Survives logout.
    pub const LANGUAGE: &str = "lng";

    /// Keys removed by a full logout.
    pub const SESSION_KEYS: [&str; 3] = [AUTHORIZATION, TOKEN, USER_INFO];
}

/// A synchronous string key-value backend.
///
/// Modelled on browser local storage: reads and writes are synchronous,
/// and other holders of the same backend (other tabs, other processes for
/// a file) may observe or change the same keys at any time.
///
/// # Contract
///
/// - [`get`](Self::get) never fails. A backend that can't read reports
///   `None`, so the console degrades to "logged out" instead of crashing.
/// - Writes return `Result` and are visible to a subsequent `get` on the
///   same thread. Visibility to other observers in the same turn is not
///   guaranteed.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
