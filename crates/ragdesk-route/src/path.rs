//! Base-path normalization.
//!
//! The console is served under a fixed prefix (`/rag` by default). Every
//! programmatic navigation goes through [`BasePath::normalize`] so that
//! callers can write `"/login"` and land on `"/rag/login"`.
//!
//! The rule, in order:
//!
//! | input                              | output              |
//! |------------------------------------|---------------------|
//! | `base` or starts with `base + "/"` | unchanged           |
//! | `"/"`                              | `base + "/"`        |
//! | any other absolute path            | `base + path`       |
//! | relative path                      | unchanged           |
//!
//! Every output is either relative or already under the base, so the
//! function is idempotent: `normalize(normalize(p)) == normalize(p)`.

use std::fmt;

use crate::RouteError;

/// Prefix the console is served under.
pub const DEFAULT_BASE_PATH: &str = "/rag";

/// A validated base path: starts with `/`, no trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    /// Validates and stores a base path. A trailing `/` is trimmed, so
    /// `"/rag/"` and `"/rag"` are the same base.
    ///
    /// # Errors
    /// [`RouteError::InvalidBasePath`] if the path is empty, relative, or
    /// consists only of slashes.
    pub fn new(base: &str) -> Result<Self, RouteError> {
        if !base.starts_with('/') {
            return Err(RouteError::InvalidBasePath(base.to_string()));
        }
        let trimmed = base.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(RouteError::InvalidBasePath(base.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` if `path` is already rooted under this base.
    pub fn contains(&self, path: &str) -> bool {
        path == self.0
            || path
                .strip_prefix(self.0.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Roots `path` under the base. See the module docs for the rule.
    pub fn normalize(&self, path: &str) -> String {
        if self.contains(path) {
            path.to_string()
        } else if path == "/" {
            format!("{}/", self.0)
        } else if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            path.to_string()
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self(DEFAULT_BASE_PATH.to_string())
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes `path` against [`DEFAULT_BASE_PATH`].
pub fn normalize(path: &str) -> String {
    BasePath::default().normalize(path)
}

/// Builds a full path for places that need the URL rather than a
/// navigation (links, redirects handed to the backend). Same rule as
/// [`normalize`].
pub fn build_path(path: &str) -> String {
    normalize(path)
}

/// The default base path.
pub fn base_path() -> &'static str {
    DEFAULT_BASE_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absolute_path_gets_prefix() {
        assert_eq!(normalize("/login"), "/rag/login");
        assert_eq!(normalize("/user-setting/profile"), "/rag/user-setting/profile");
    }

    #[test]
    fn test_normalize_prefixed_path_unchanged() {
        assert_eq!(normalize("/rag/login"), "/rag/login");
        assert_eq!(normalize("/rag"), "/rag");
        assert_eq!(normalize("/rag/"), "/rag/");
    }

    #[test]
    fn test_normalize_root_becomes_base_with_slash() {
        assert_eq!(normalize("/"), "/rag/");
    }

    #[test]
    fn test_normalize_relative_path_unchanged() {
        assert_eq!(normalize("settings"), "settings");
        assert_eq!(normalize("../up"), "../up");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_lookalike_prefix_is_not_under_base() {
        // `/ragflow` merely shares characters with `/rag`.
        assert_eq!(normalize("/ragflow"), "/rag/ragflow");
    }

    #[test]
    fn test_normalize_keeps_query_string() {
        assert_eq!(normalize("/user-setting?simple=1"), "/rag/user-setting?simple=1");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "/", "", "/rag", "/rag/", "/rag/x", "/ragflow", "/login", "x", "./x",
            "//double", "/rag?simple=1", "/a/b/c?d=e",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_build_path_matches_normalize() {
        assert_eq!(build_path("/knowledge"), normalize("/knowledge"));
        assert_eq!(base_path(), "/rag");
    }

    #[test]
    fn test_base_path_new_trims_trailing_slash() {
        let base = BasePath::new("/console/").unwrap();
        assert_eq!(base.as_str(), "/console");
        assert_eq!(base.normalize("/"), "/console/");
    }

    #[test]
    fn test_base_path_new_rejects_invalid() {
        assert!(BasePath::new("").is_err());
        assert!(BasePath::new("rag").is_err());
        assert!(BasePath::new("/").is_err());
        assert!(BasePath::new("///").is_err());
    }
}
