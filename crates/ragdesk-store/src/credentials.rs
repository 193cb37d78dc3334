//! The credential store: the one interface to persisted session state.
//!
//! The session is a loose aggregate of four independently nullable keys
//! (token, authorization value, user info, language). [`CredentialStore`]
//! owns the rules for reading them:
//!
//! - reads never fail; absent and unreadable look the same
//! - the user-info blob is parsed leniently (corrupt → empty object)
//! - a full logout clears the credential keys but keeps the language

use std::sync::Arc;

use crate::{KeyValueStore, StoreError, UserInfo, UserInfoBlob, keys};

/// Role that puts the console into simple (chat-only) mode.
pub const DEFAULT_RESTRICTED_ROLE: &str = "query";

/// Shared handle to the persisted session.
///
/// Cheap to clone: clones share the same backend, so a write through one
/// handle is visible through every other.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
    restricted_role: Arc<str>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("restricted_role", &self.restricted_role)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Wraps a backend. The restricted role defaults to `"query"`.
    pub fn new(backend: impl KeyValueStore) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Wraps a backend that is already shared.
    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            restricted_role: Arc::from(DEFAULT_RESTRICTED_ROLE),
        }
    }

    /// Overrides the role treated as restricted by [`is_simple_role`](Self::is_simple_role).
    pub fn with_restricted_role(mut self, role: &str) -> Self {
        self.restricted_role = Arc::from(role);
        self
    }

    /// The role treated as restricted.
    pub fn restricted_role(&self) -> &str {
        &self.restricted_role
    }

    // -- Reads ------------------------------------------------------------

    pub fn token(&self) -> Option<String> {
        self.backend.get(keys::TOKEN)
    }

    pub fn authorization(&self) -> Option<String> {
        self.backend.get(keys::AUTHORIZATION)
    }

    /// The user-info blob exactly as stored.
    pub fn user_info_raw(&self) -> Option<String> {
        self.backend.get(keys::USER_INFO)
    }

    pub fn language(&self) -> Option<String> {
        self.backend.get(keys::LANGUAGE)
    }

    /// `true` if a non-empty authorization value is stored.
    pub fn has_authorization(&self) -> bool {
        self.authorization().is_some_and(|v| !v.is_empty())
    }

    /// Parses the stored user info. Absent or corrupt yields the empty object.
    pub fn user_info_object(&self) -> UserInfo {
        self.user_info_raw()
            .map(|raw| UserInfo::parse_lenient(&raw))
            .unwrap_or_default()
    }

    /// The stored user's role, if the blob parses and carries one.
    pub fn user_role(&self) -> Option<String> {
        self.user_info_object().role
    }

    /// `true` iff the stored role equals the restricted role.
    pub fn is_simple_role(&self) -> bool {
        self.user_role().as_deref() == Some(&*self.restricted_role)
    }

    // -- Writes -----------------------------------------------------------

    pub fn set_authorization(&self, value: &str) -> Result<(), StoreError> {
        self.backend.set(keys::AUTHORIZATION, value)
    }

    pub fn set_token(&self, value: &str) -> Result<(), StoreError> {
        self.backend.set(keys::TOKEN, value)
    }

    /// Stores user info. Text is stored verbatim; structured values are
    /// serialized first.
    ///
    /// # Errors
    /// [`StoreError::Encode`] if a structured value can't be serialized,
    /// or whatever the backend reports for the write.
    pub fn set_user_info(&self, value: impl Into<UserInfoBlob>) -> Result<(), StoreError> {
        let text = match value.into() {
            UserInfoBlob::Raw(text) => text,
            UserInfoBlob::Json(value) => {
                serde_json::to_string(&value).map_err(StoreError::Encode)?
            }
            UserInfoBlob::Info(info) => {
                serde_json::to_string(&info).map_err(StoreError::Encode)?
            }
        };
        self.backend.set(keys::USER_INFO, &text)
    }

    /// Writes arbitrary key/value pairs in order, stopping at the first failure.
    pub fn set_items<'a>(
        &self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), StoreError> {
        for (key, value) in pairs {
            self.backend.set(key, value)?;
        }
        Ok(())
    }

    pub fn set_language(&self, code: &str) -> Result<(), StoreError> {
        self.backend.set(keys::LANGUAGE, code)
    }

    /// Clears only the authorization value.
    pub fn remove_authorization(&self) -> Result<(), StoreError> {
        self.backend.remove(keys::AUTHORIZATION)
    }

    /// Full logout: removes token, authorization and user info. The
    /// language preference is kept.
    ///
    /// Every key is attempted even if an earlier removal fails; the first
    /// failure is returned.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let mut first_err = None;
        for key in keys::SESSION_KEYS {
            if let Err(e) = self.backend.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear session key");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => {
                tracing::debug!("session keys cleared");
                Ok(())
            }
        }
    }
}
