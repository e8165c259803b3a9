//! Route value object
//!
//! A route is a `/`-separated directory path relative to the destination
//! root. Every route renders to exactly one `<route>/index.html`.

use std::fmt;
use std::path::{Path, PathBuf};

/// File written for every route
pub const ROUTE_FILE: &str = "index.html";

/// A resolved route plus the suffix handed to the props-provider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    path: String,
    suffix: String,
}

impl Route {
    /// Create a route; `path` is normalized and can never escape the root
    pub fn new(path: &str, suffix: impl Into<String>) -> Self {
        Self {
            path: normalize_route(path),
            suffix: suffix.into(),
        }
    }

    /// Normalized route path (`""` is the destination root)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The value passed to `getProps` for this route
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// `<destination>/<route>/index.html`
    pub fn output_file(&self, destination: &Path) -> PathBuf {
        let mut file = destination.to_path_buf();
        for segment in self.segments() {
            file.push(segment);
        }
        file.push(ROUTE_FILE);
        file
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path)
    }
}

/// Normalize a route: drop empty and `.` segments, fold `..`, accept `\` as a separator.
pub fn normalize_route(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Join a route suffix under a logical directory
pub fn join_route(dir: &str, suffix: &str) -> String {
    normalize_route(&format!("{}/{}", dir, suffix))
}
