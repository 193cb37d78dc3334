//! The user-info blob stored under [`keys::USER_INFO`](crate::keys::USER_INFO).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured view of the stored user-info object.
///
/// Only `role` drives behavior in the console. The display fields are
/// read by the header as a fallback when the profile source hasn't
/// answered yet. Anything else the backend sent is kept in `extra` so a
/// read-modify-write doesn't drop it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInfo {
    /// Creates a user info carrying only a role.
    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Default::default()
        }
    }

    /// Parses a stored blob. Anything that isn't a JSON object with the
    /// expected field types yields the empty object.
    pub fn parse_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => {
                serde_json::from_value(Value::Object(map)).unwrap_or_default()
            }
            Ok(other) => {
                tracing::debug!(kind = json_kind(&other), "user info is not an object");
                Self::default()
            }
            Err(e) => {
                tracing::debug!(error = %e, "user info is not valid JSON");
                Self::default()
            }
        }
    }

    /// `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A value accepted by [`CredentialStore::set_user_info`](crate::CredentialStore::set_user_info).
///
/// Callers either hand over text that is already serialized (it is stored
/// verbatim) or a structured value that the store serializes itself.
#[derive(Debug, Clone)]
pub enum UserInfoBlob {
    /// Pre-serialized text, stored as-is.
    Raw(String),
    /// Arbitrary JSON.
    Json(Value),
    /// The typed view.
    Info(UserInfo),
}

impl From<&str> for UserInfoBlob {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for UserInfoBlob {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<Value> for UserInfoBlob {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<UserInfo> for UserInfoBlob {
    fn from(info: UserInfo) -> Self {
        Self::Info(info)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_lenient_object_reads_fields() {
        let info = UserInfo::parse_lenient(
            r#"{"role":"query","avatar":"a.png","name":"Ada","tenant":"t1"}"#,
        );
        assert_eq!(info.role.as_deref(), Some("query"));
        assert_eq!(info.avatar.as_deref(), Some("a.png"));
        assert_eq!(info.name.as_deref(), Some("Ada"));
        assert_eq!(info.extra.get("tenant"), Some(&json!("t1")));
    }

    #[test]
    fn test_parse_lenient_garbage_is_empty() {
        assert!(UserInfo::parse_lenient("{oops").is_empty());
        assert!(UserInfo::parse_lenient("").is_empty());
    }

    #[test]
    fn test_parse_lenient_non_object_is_empty() {
        assert!(UserInfo::parse_lenient("42").is_empty());
        assert!(UserInfo::parse_lenient("\"query\"").is_empty());
        assert!(UserInfo::parse_lenient("null").is_empty());
    }

    #[test]
    fn test_parse_lenient_wrong_field_type_is_empty() {
        // `role` must be a string; a number makes the whole blob unusable.
        assert!(UserInfo::parse_lenient(r#"{"role":7}"#).is_empty());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let text = serde_json::to_string(&UserInfo::with_role("admin")).unwrap();
        assert_eq!(text, r#"{"role":"admin"}"#);
    }
}
