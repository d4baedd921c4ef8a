//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::archive::{APP_DIR, BUNDLED_DIR, DEFAULT_TRANSLATION, INSTALLED_DIR};
use crate::error::{Error, Result};
use crate::types::TranslationCode;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of archives shipped with the application
    pub versions_dir: PathBuf,
    /// Directory of user-installed archives
    pub translations_dir: PathBuf,
    /// Translation used when the caller names none
    pub default_translation: TranslationCode,
}

impl Default for Config {
    fn default() -> Self {
        let versions_dir = env::current_dir()
            .map(|dir| dir.join(BUNDLED_DIR))
            .unwrap_or_else(|_| PathBuf::from(BUNDLED_DIR));
        let translations_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(INSTALLED_DIR);

        Self {
            versions_dir,
            translations_dir,
            default_translation: TranslationCode::new(DEFAULT_TRANSLATION),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("SPOKEN_VERSIONS_DIR") {
            config.versions_dir = expand_path(&path);
        }

        if let Ok(path) = env::var("SPOKEN_TRANSLATIONS_DIR") {
            config.translations_dir = expand_path(&path);
        }

        if let Ok(code) = env::var("SPOKEN_TRANSLATION") {
            if code.trim().is_empty() {
                return Err(Error::config(
                    "SPOKEN_TRANSLATION is set but empty",
                    "Set it to a translation code such as KJV, or unset it",
                ));
            }
            config.default_translation = TranslationCode::new(code);
        }

        Ok(config)
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.default_translation.as_str(), "KJV");
        assert!(config.versions_dir.ends_with("versions"));
        assert!(config.translations_dir.ends_with("spoken/translations"));
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/bibles"), home.join("bibles"));
        }
        assert_eq!(expand_path(" /srv/versions "), PathBuf::from("/srv/versions"));
    }
}
