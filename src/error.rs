//! Library error types.
//!
//! Reference parsing failures are user-input problems and are reported as
//! values (see [`ReferenceError`]); archive and configuration problems carry
//! enough context to act on.

use std::path::PathBuf;

use thiserror::Error;

/// Library result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Library error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Scripture archive could not be opened or read
    #[error("Archive error in {path:?}: {message}")]
    Archive {
        /// Archive that failed.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Passage reference rejected by the parser
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create an archive error for the given path
    pub fn archive(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Archive { path: path.into(), message: message.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

/// Reasons a passage reference is rejected.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Input was empty or whitespace only.
    #[error("Please enter a passage reference.")]
    Empty,

    /// Start and end name different books.
    #[error("Cross-book ranges are not supported. Please select passages within a single book at a time.")]
    CrossBook,

    /// Book token matched nothing in the registry.
    #[error("Unknown book '{0}'. Please check the spelling and try again.")]
    UnknownBook(String),

    /// Book token matched several books.
    #[error("Ambiguous book name '{token}'. Did you mean: {}?", candidates.join(", "))]
    AmbiguousBook {
        /// The token as typed.
        token: String,
        /// Canonical names of the matching books (at most five).
        candidates: Vec<String>,
    },

    /// A chapter or verse did not fit in a number.
    #[error("Invalid chapter or verse numbers.")]
    InvalidNumbers,

    /// A chapter or verse was zero.
    #[error("Chapter and verse numbers must be positive.")]
    NonPositive,

    /// A chapter beyond the end of the book.
    #[error("{book} only has {max} chapters.")]
    ChapterOutOfRange {
        /// Canonical book name.
        book: &'static str,
        /// Number of chapters in the book.
        max: u32,
    },

    /// Range end precedes its start.
    #[error("Start reference must come before end reference.")]
    StartAfterEnd,
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
