//! Local dependency extraction
//!
//! Finds the local files a page imports by scanning its text line by line.
//! This is a heuristic, not a parser. Only the single-line form
//!
//! ```text
//! import Thing from '../components/thing'
//! ```
//!
//! is recognized. Multi-line import statements, dynamic `import()`,
//! `require` calls and re-exports (`export ... from`) are not detected, so
//! changes to files reached only through them do not trigger rebuilds.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{normalize_lexically, MODULE_EXTENSION};

const IMPORT_KEYWORD: &str = "import";
const QUOTE: char = '\'';

/// Absolute paths of the local modules `file` imports, deduplicated in
/// first-seen order.
pub fn extract_local_dependencies(file: &Path, content: &str) -> Vec<PathBuf> {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let mut dependencies: Vec<PathBuf> = Vec::new();

    for line in content.lines() {
        let Some(specifier) = import_specifier(line) else {
            continue;
        };
        if !specifier.starts_with('.') {
            continue;
        }

        let resolved = normalize_lexically(&dir.join(with_module_extension(&specifier)));
        if !dependencies.contains(&resolved) {
            dependencies.push(resolved);
        }
    }

    dependencies
}

/// The quoted specifier of an `import` line, if the line is one
fn import_specifier(line: &str) -> Option<String> {
    if !line.trim_start().starts_with(IMPORT_KEYWORD) {
        return None;
    }

    let normalized = line.replace(['"', '`'], "'");
    let first = normalized.find(QUOTE)?;
    let last = normalized.rfind(QUOTE)?;
    if last <= first {
        return None;
    }

    Some(normalized[first + 1..last].to_string())
}

fn with_module_extension(specifier: &str) -> String {
    let suffix = format!(".{}", MODULE_EXTENSION);
    if specifier.ends_with(&suffix) {
        specifier.to_string()
    } else {
        format!("{}{}", specifier, suffix)
    }
}
