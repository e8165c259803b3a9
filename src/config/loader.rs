//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{ConfigWarning, Propagation};
use crate::error::{DhowError, DhowResult};

use super::types::Config;

/// Config file looked up at the project root
pub const CONFIG_FILE: &str = "dhow.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DhowResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse `content` as if it were read from `path`
pub fn parse_with_warnings(content: &str, path: &Path) -> DhowResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DhowError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `dhow.toml` from the project root, or defaults when there is none
pub fn load_or_default(project_root: &Path) -> DhowResult<(Config, Vec<ConfigWarning>)> {
    let path = project_root.join(CONFIG_FILE);
    let (config, warnings) = if path.is_file() {
        load_with_warnings(&path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        (Config::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (DHOW_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides from any variable source
pub(super) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

    if let Some(pages) = non_empty("DHOW_PAGES") {
        config.paths.pages = PathBuf::from(pages);
    }
    if let Some(out) = non_empty("DHOW_OUT") {
        config.paths.out = PathBuf::from(out);
    }
    if let Some(public) = non_empty("DHOW_PUBLIC") {
        config.paths.public = PathBuf::from(public);
    }

    if let Some(value) = non_empty("DHOW_PROPAGATION") {
        match Propagation::parse(&value) {
            Some(propagation) => config.build.propagation = propagation,
            None => tracing::warn!(value = %value, "ignoring unknown DHOW_PROPAGATION"),
        }
    }

    if let Some(node) = non_empty("DHOW_NODE") {
        config.tools.node = node;
    }
    if let Some(esbuild) = non_empty("DHOW_ESBUILD") {
        config.tools.esbuild = esbuild;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "pages",
        "out",
        "public",
        "build",
        "propagation",
        "clean",
        "tools",
        "node",
        "esbuild",
        "postcss",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
