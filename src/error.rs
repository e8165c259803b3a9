//! Error types for dhow
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dhow operations
pub type DhowResult<T> = Result<T, DhowError>;

/// Main error type for dhow operations
#[derive(Error, Debug)]
pub enum DhowError {
    /// A page module does not satisfy the render/paths/props contract
    #[error("malformed page ({}): {reason}", file.display())]
    MalformedPage { file: PathBuf, reason: String },

    /// `_app.js` or `_document.js` does not export a component
    #[error("malformed component ({}): {reason}", file.display())]
    MalformedComponent { file: PathBuf, reason: String },

    /// The document shell lacks an insertion point or a head element
    #[error("invalid document, no {missing} found")]
    MissingDocumentStructure { missing: &'static str },

    /// Input and output directories overlap
    #[error("the pages directory '{}' and the output directory '{}' must not overlap", pages.display(), out.display())]
    OverlappingDirectories { pages: PathBuf, out: PathBuf },

    /// The transpiler failed for a source file
    #[error("failed to transpile {}: {message}", file.display())]
    Transpile { file: PathBuf, message: String },

    /// The page runtime failed while evaluating a module
    #[error("page runtime failed for {}: {message}", module.display())]
    Runtime { module: PathBuf, message: String },

    /// The stylesheet processor failed for a file
    #[error("failed to process stylesheet {}: {message}", file.display())]
    Stylesheet { file: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// File watcher failure
    #[error("watcher error: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON exchanged with the page runtime could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<notify::Error> for DhowError {
    fn from(err: notify::Error) -> Self {
        DhowError::Watch(err.to_string())
    }
}
