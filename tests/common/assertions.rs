//! Custom assertion macros for scenario tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that the destination contains a file, relative to `out/`.
///
/// # Example
/// ```ignore
/// assert_output!(env, "blog/hello/index.html");
/// ```
#[macro_export]
macro_rules! assert_output {
    ($env:expr, $path:expr) => {
        assert!(
            $env.out_path($path).exists(),
            "Expected '{}' in the destination, but it doesn't exist.\n\
             Files found:\n  {}",
            $path,
            $env.output_files().join("\n  ")
        );
    };
}

/// Assert that the destination does NOT contain a file or directory.
///
/// # Example
/// ```ignore
/// assert_no_output!(env, "drafts/");
/// ```
#[macro_export]
macro_rules! assert_no_output {
    ($env:expr, $path:expr) => {
        assert!(
            !$env.out_path($path).exists(),
            "Expected '{}' to NOT exist in the destination, but it does.\n\
             Files found:\n  {}",
            $path,
            $env.output_files().join("\n  ")
        );
    };
}
