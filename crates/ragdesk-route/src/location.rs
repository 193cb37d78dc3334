//! A location: path plus query parameters.

use std::fmt;

use crate::QueryParams;

/// Where the console currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// The path, always absolute for locations produced by a router.
    pub path: String,
    /// Decoded query parameters.
    pub query: QueryParams,
}

impl Location {
    pub fn new(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Splits `"/path?query#fragment"`. The fragment is dropped; the
    /// console never routes on it.
    pub fn parse(target: &str) -> Self {
        let without_fragment = target.split_once('#').map_or(target, |(head, _)| head);
        match without_fragment.split_once('?') {
            Some((path, query)) => Self::new(path, QueryParams::parse(query)),
            None => Self::new(without_fragment, QueryParams::new()),
        }
    }

    /// A copy with the query replaced.
    pub fn with_query(&self, query: QueryParams) -> Self {
        Self::new(self.path.clone(), query)
    }

    /// Resolves `target` against this location. Absolute targets replace
    /// the path; relative ones are joined onto the current directory
    /// (`.` and `..` segments are honored).
    pub fn resolve(&self, target: &str) -> Self {
        let parsed = Self::parse(target);
        if parsed.path.starts_with('/') {
            return parsed;
        }
        if parsed.path.is_empty() {
            // Query-only target: stay on the current path.
            return self.with_query(parsed.query);
        }

        let mut segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        // Drop the last segment: relative paths resolve against the directory.
        if !self.path.ends_with('/') {
            segments.pop();
        }
        for segment in parsed.path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        let mut path = format!("/{}", segments.join("/"));
        if parsed.path.ends_with('/') && path != "/" {
            path.push('/');
        }
        Self::new(path, parsed.query)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}
