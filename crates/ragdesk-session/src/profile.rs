//! Collaborator hooks for profile and tenant data.
//!
//! The console doesn't know how the backend serves the current user or
//! the tenant list. It defines the [`UserInfoSource`] and
//! [`TenantSource`] traits, and the application plugs in whatever client
//! it has (HTTP, a cache, a mock in tests).

use std::future::Future;

use ragdesk_store::{CredentialStore, UserInfo};
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Language shown when neither the profile nor the store has one.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Fetches the current user's profile.
///
/// # Example
///
/// ```rust
/// use ragdesk_session::{SessionError, UserInfoSource};
/// use ragdesk_store::UserInfo;
///
/// /// Always answers with the same profile. Handy for demos.
/// struct FixedProfile(UserInfo);
///
/// impl UserInfoSource for FixedProfile {
///     async fn fetch_user_info(&self) -> Result<UserInfo, SessionError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait UserInfoSource: Send + Sync + 'static {
    /// Returns the profile of the user the stored authorization belongs to.
    fn fetch_user_info(&self) -> impl Future<Output = Result<UserInfo, SessionError>> + Send;
}

/// Role of the current user within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantRole {
    Owner,
    Normal,
    /// An invitation the user hasn't answered yet.
    Invite,
    #[serde(other)]
    Other,
}

/// One entry of the tenant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantEntry {
    pub tenant_id: String,
    pub role: TenantRole,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Lists the tenants the current user belongs to or is invited to.
pub trait TenantSource: Send + Sync + 'static {
    fn list_tenants(&self) -> impl Future<Output = Result<Vec<TenantEntry>, SessionError>> + Send;
}

/// `true` if any tenant entry is an unanswered invitation.
pub fn has_pending_invite(tenants: &[TenantEntry]) -> bool {
    tenants.iter().any(|t| t.role == TenantRole::Invite)
}

/// What the header shows for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub avatar: Option<String>,
    pub name: Option<String>,
    pub language: String,
}

impl ProfileSummary {
    /// Prefers the fetched profile and falls back to the stored blob, so
    /// the header has something to show before the fetch completes.
    pub fn resolve(fetched: Option<&UserInfo>, stored: &UserInfo) -> Self {
        let avatar = fetched
            .and_then(|f| f.avatar.clone())
            .or_else(|| stored.avatar.clone());
        let name = fetched
            .and_then(|f| f.nickname.clone())
            .or_else(|| stored.name.clone());
        let language = fetched
            .and_then(|f| f.language.clone())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        Self {
            avatar,
            name,
            language,
        }
    }
}

/// Fetches the profile and persists it (user info and language).
///
/// # Errors
/// Whatever the source reports, or a store write failure.
pub async fn refresh_profile<S: UserInfoSource>(
    source: &S,
    store: &CredentialStore,
) -> Result<UserInfo, SessionError> {
    let info = source.fetch_user_info().await?;
    store.set_user_info(info.clone())?;
    if let Some(language) = info.language.as_deref() {
        store.set_language(language)?;
    }
    tracing::debug!(role = ?info.role, "profile refreshed");
    Ok(info)
}

#[cfg(test)]
mod tests {
    use ragdesk_store::MemoryStore;

    use super::*;

    struct FixedProfile(UserInfo);

    impl UserInfoSource for FixedProfile {
        async fn fetch_user_info(&self) -> Result<UserInfo, SessionError> {
            Ok(self.0.clone())
        }
    }

    struct DownProfile;

    impl UserInfoSource for DownProfile {
        async fn fetch_user_info(&self) -> Result<UserInfo, SessionError> {
            Err(SessionError::SourceUnavailable {
                source_name: "profile",
                reason: "503".into(),
            })
        }
    }

    fn tenant(role: TenantRole) -> TenantEntry {
        TenantEntry {
            tenant_id: "t".into(),
            role,
            nickname: None,
        }
    }

    #[test]
    fn test_has_pending_invite() {
        assert!(!has_pending_invite(&[]));
        assert!(!has_pending_invite(&[tenant(TenantRole::Owner), tenant(TenantRole::Normal)]));
        assert!(has_pending_invite(&[tenant(TenantRole::Owner), tenant(TenantRole::Invite)]));
    }

    #[test]
    fn test_tenant_role_deserializes_unknown_as_other() {
        let entry: TenantEntry =
            serde_json::from_str(r#"{"tenant_id":"t","role":"auditor"}"#).unwrap();
        assert_eq!(entry.role, TenantRole::Other);
        let entry: TenantEntry =
            serde_json::from_str(r#"{"tenant_id":"t","role":"invite"}"#).unwrap();
        assert_eq!(entry.role, TenantRole::Invite);
    }

    #[test]
    fn test_profile_summary_falls_back_to_stored() {
        let stored = UserInfo {
            avatar: Some("stored.png".into()),
            name: Some("Stored".into()),
            ..Default::default()
        };
        let summary = ProfileSummary::resolve(None, &stored);
        assert_eq!(summary.avatar.as_deref(), Some("stored.png"));
        assert_eq!(summary.name.as_deref(), Some("Stored"));
        assert_eq!(summary.language, DEFAULT_LANGUAGE);

        let fetched = UserInfo {
            nickname: Some("Fetched".into()),
            language: Some("Chinese".into()),
            ..Default::default()
        };
        let summary = ProfileSummary::resolve(Some(&fetched), &stored);
        assert_eq!(summary.avatar.as_deref(), Some("stored.png"));
        assert_eq!(summary.name.as_deref(), Some("Fetched"));
        assert_eq!(summary.language, "Chinese");
    }

    #[tokio::test]
    async fn test_refresh_profile_persists_info_and_language() {
        let store = CredentialStore::new(MemoryStore::new());
        let source = FixedProfile(UserInfo {
            role: Some("query".into()),
            language: Some("English".into()),
            ..Default::default()
        });
        let info = refresh_profile(&source, &store).await.unwrap();
        assert_eq!(info.role.as_deref(), Some("query"));
        assert!(store.is_simple_role());
        assert_eq!(store.language().as_deref(), Some("English"));
    }

    #[tokio::test]
    async fn test_refresh_profile_source_error_leaves_store() {
        let store = CredentialStore::new(MemoryStore::new());
        store.set_user_info(UserInfo::with_role("admin")).unwrap();
        let err = refresh_profile(&DownProfile, &store).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert_eq!(store.user_role().as_deref(), Some("admin"));
    }
}
