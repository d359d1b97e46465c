//! Error types for sceneprep-scenes.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while interpreting a scene table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required timestamp column could not be resolved from the CSV headers.
    #[error("no usable {field} column in scene table (headers: {headers})")]
    Schema { field: &'static str, headers: String },

    /// The scene table contained a header row but no scenes.
    #[error("scene table has no scenes: {}", path.display())]
    EmptyTable { path: PathBuf },

    /// The CSV could not be opened after the configured number of attempts.
    #[error(
        "could not open scene table {} after {attempts} attempts; \
         close any program holding the file open and retry",
        path.display()
    )]
    FileLock { path: PathBuf, attempts: u32 },

    /// A data row did not have the shape the resolved schema requires.
    #[error("malformed scene row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// The scene table file does not exist.
    #[error("scene table not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a schema resolution error.
    pub fn schema(field: &'static str, headers: &[String]) -> Self {
        Self::Schema {
            field,
            headers: headers.join(", "),
        }
    }

    /// Create an empty table error.
    pub fn empty_table(path: impl Into<PathBuf>) -> Self {
        Self::EmptyTable { path: path.into() }
    }

    /// Create a malformed row error.
    pub fn malformed_row(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            reason: reason.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
