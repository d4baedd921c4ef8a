//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Book registry constants.
pub mod registry {
    /// Verse count reported when a chapter is missing from the table.
    pub const DEFAULT_VERSE_COUNT: u32 = 50;

    /// Maximum number of book names listed for an ambiguous token.
    pub const MAX_SUGGESTIONS: usize = 5;

    /// Shortest alias allowed to match as the start of a longer token.
    pub const MIN_EMBEDDED_ALIAS_LEN: usize = 3;
}

/// Scripture archive constants.
pub mod archive {
    /// File extension of translation archives.
    pub const ARCHIVE_EXTENSION: &str = "zip";

    /// Archive entry suffixes that hold marked-up book text.
    pub const ENTRY_SUFFIXES: &[&str] = &[".usfm", ".sfm"];

    /// Bundled archive directory, relative to the working directory.
    pub const BUNDLED_DIR: &str = "versions";

    /// Application directory name under the platform data directory.
    pub const APP_DIR: &str = "spoken";

    /// User-installed archive directory under [`APP_DIR`].
    pub const INSTALLED_DIR: &str = "translations";

    /// Translation used when none is configured.
    pub const DEFAULT_TRANSLATION: &str = "KJV";
}

/// Markup scanning constants.
pub mod scan {
    /// Deepest poetry indentation level.
    pub const MAX_POETRY_LEVEL: u8 = 4;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size between the scanning task and the verse stream.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}
