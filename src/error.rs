//! Error types for the anchor-edit crate.
//!
//! Every operator failure maps to exactly one variant; the dispatcher
//! recovers them into structured responses, so no error escapes the server
//! loop and a failed request never touches the target file.

use std::path::PathBuf;

/// Operator-level failures, each rendered verbatim into the response
/// `message`.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// File does not exist at the specified path.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File failed the binary-content guard and cannot be edited as text.
    #[error("binary file cannot be edited as text: {path}")]
    BinaryFile { path: PathBuf },

    /// Replace called with searchText equal to replacementText.
    #[error("searchText and replacementText are identical")]
    IdenticalText,

    /// The searched string was not found; carries up to three fuzzy
    /// candidate slices as retry suggestions.
    #[error("no match found for {param}")]
    NoMatch {
        param: &'static str,
        suggestions: Vec<String>,
    },

    /// A single match was required but several were found; carries
    /// disambiguated context slices as retry suggestions.
    #[error("multiple matches found for {param}; pick one of the suggested values")]
    MultipleMatches {
        param: &'static str,
        suggestions: Vec<String>,
    },

    /// Move whose insertion point falls inside the span being removed.
    #[error("insertion point overlaps the text being moved")]
    OverlappingMove,

    /// Parent directory of the target is missing and auto-creation was not
    /// requested.
    #[error("parent directory does not exist: {path} (set createMissingDirectories to create it)")]
    DirectoryMissing { path: PathBuf },

    /// Refusing to overwrite an existing file on create/rename.
    #[error("target already exists: {path}")]
    TargetExists { path: PathBuf },

    /// Parameter-schema violation (missing, empty, or wrongly typed).
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Any other I/O failure, wrapped with its path.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for anchor-edit operations.
pub type EditResult<T> = Result<T, EditError>;

impl EditError {
    /// Parameter-keyed retry suggestions, when this failure carries any.
    pub fn suggestions(&self) -> Option<(&'static str, &[String])> {
        match self {
            Self::NoMatch {
                param,
                suggestions,
            }
            | Self::MultipleMatches {
                param,
                suggestions,
            } => Some((param, suggestions.as_slice())),
            _ => None,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
