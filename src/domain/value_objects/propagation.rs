//! How far a dependency change propagates per build

use serde::{Deserialize, Serialize};

/// Propagation depth for dependency-triggered rebuilds.
///
/// `Shallow` performs one sweep over the incoming changes: a page is rebuilt
/// when one of its direct imports changed. Pages that depend on *that* page
/// are picked up by later builds only. `Transitive` keeps sweeping until no
/// new dependents appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Propagation {
    #[default]
    Shallow,
    Transitive,
}

impl Propagation {
    /// Parse a user-provided value (config, env var); unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "shallow" | "single" => Some(Propagation::Shallow),
            "transitive" | "deep" | "full" => Some(Propagation::Transitive),
            _ => None,
        }
    }
}
