//! Translation archive lookup.
//!
//! Archives live in two directories: the bundled `versions` directory and
//! the user-installed translations directory. File stems are the primary
//! key (`KJV` -> `kjv.zip`), with a few name heuristics for archives that
//! ship under longer names.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::Config;
use crate::constants::archive::ARCHIVE_EXTENSION;

/// Preferred archive name fragments, best first, for codes containing the key.
const PREFERRED_VARIANTS: &[(&str, &[&str])] = &[("kjv", &["engkjvcpb", "kjv2006", "kjv"])];

/// Resolves translation codes to archive files.
#[derive(Debug, Clone)]
pub struct ArchiveLocator {
    bundled_dir: PathBuf,
    installed_dir: PathBuf,
}

impl ArchiveLocator {
    /// Locator over the given bundled and user-installed directories.
    pub fn new(bundled_dir: impl Into<PathBuf>, installed_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundled_dir: bundled_dir.into(),
            installed_dir: installed_dir.into(),
        }
    }

    /// Locator over the configured directories.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.versions_dir, &config.translations_dir)
    }

    /// Find the archive backing `translation`.
    ///
    /// Directories are searched bundled first. Within a directory an exact
    /// stem match wins, then the name heuristics, then the directory's first
    /// archive by name; only a directory without archives passes the search
    /// on to the next one. `None` only when neither directory holds an
    /// archive.
    pub fn locate(&self, translation: &str) -> Option<PathBuf> {
        let code = translation.trim().to_lowercase();
        [&self.bundled_dir, &self.installed_dir]
            .into_iter()
            .find_map(|dir| locate_in(&list_archives(dir), &code, translation))
    }

    /// Upper-cased stems of the archives in the user-installed directory.
    pub fn installed_translations(&self) -> Vec<String> {
        archive_stems(&self.installed_dir)
    }

    /// Stems from both directories, sorted and deduplicated.
    pub fn available_translations(&self) -> Vec<String> {
        let mut codes: Vec<String> = [&self.bundled_dir, &self.installed_dir]
            .into_iter()
            .flat_map(|dir| archive_stems(dir.as_path()))
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

fn locate_in(files: &[PathBuf], code: &str, translation: &str) -> Option<PathBuf> {
    if let Some(found) = match_translation(files, code) {
        info!(translation, path = %found.display(), "Found translation archive");
        return Some(found.clone());
    }
    let fallback = files.first()?;
    info!(
        translation,
        path = %fallback.display(),
        "No archive named for translation, using first available"
    );
    Some(fallback.clone())
}

fn archive_stems(dir: &Path) -> Vec<String> {
    list_archives(dir)
        .iter()
        .filter_map(|path| path.file_stem()?.to_str())
        .map(str::to_uppercase)
        .collect()
}

/// Archives directly inside `dir`, sorted by file name. Missing directories
/// are empty.
fn list_archives(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Archive directory not present");
        return Vec::new();
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn file_name_lower(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Exact stem, then preferred variants, then any name containing `code`.
fn match_translation<'a>(files: &'a [PathBuf], code: &str) -> Option<&'a PathBuf> {
    if code.is_empty() {
        return None;
    }
    if let Some(exact) = files.iter().find(|f| {
        f.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().to_lowercase() == code)
    }) {
        return Some(exact);
    }

    let preferred = PREFERRED_VARIANTS
        .iter()
        .filter(|(key, _)| code.contains(*key))
        .flat_map(|(_, fragments)| fragments.iter());
    for fragment in preferred {
        if let Some(found) = find_containing(files, fragment) {
            debug!(code, fragment, "Matched preferred archive variant");
            return Some(found);
        }
    }
    find_containing(files, code)
}

fn find_containing<'a>(files: &'a [PathBuf], fragment: &str) -> Option<&'a PathBuf> {
    files.iter().find(|f| file_name_lower(f).contains(fragment))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs_err::write(&path, b"").unwrap();
        path
    }

    fn dirs() -> (TempDir, TempDir) {
        (TempDir::new().unwrap(), TempDir::new().unwrap())
    }

    #[test]
    fn exact_stem_match_is_case_insensitive() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "asv.zip");
        let kjv = touch(bundled.path(), "KJV.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("kjv"), Some(kjv));
    }

    #[test]
    fn kjv_prefers_cleanest_variant() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "eng-kjv_usfm.zip");
        touch(bundled.path(), "eng-kjv2006_usfm.zip");
        let best = touch(bundled.path(), "engkjvcpb_usfm.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("KJV"), Some(best));
    }

    #[test]
    fn kjv_falls_back_through_variants() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "aaa.zip");
        let any_kjv = touch(bundled.path(), "eng-kjv_usfm.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("kjv"), Some(any_kjv));

        let v2006 = touch(bundled.path(), "eng-kjv2006_usfm.zip");
        assert_eq!(locator.locate("kjv"), Some(v2006));
    }

    #[test]
    fn other_codes_match_by_substring() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "aaa.zip");
        let asv = touch(bundled.path(), "eng-asv_usfm.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("ASV"), Some(asv));
    }

    #[test]
    fn bundled_directory_is_exhausted_first() {
        let (bundled, installed) = dirs();
        let kjv = touch(bundled.path(), "kjv.zip");
        touch(installed.path(), "web.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("web"), Some(kjv));
    }

    #[test]
    fn installed_directory_is_searched_when_bundled_is_empty() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "readme.txt");
        touch(installed.path(), "asv.zip");
        let web = touch(installed.path(), "web.zip");
        let locator = ArchiveLocator::new(bundled.path().join("missing"), installed.path());
        assert_eq!(locator.locate("WEB"), Some(web));
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("web"), Some(installed.path().join("web.zip")));
    }

    #[test]
    fn falls_back_to_first_archive() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "notes.txt");
        let first = touch(bundled.path(), "b.zip");
        touch(bundled.path(), "c.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.locate("xyz"), Some(first));
    }

    #[test]
    fn none_without_archives() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "readme.txt");
        let locator = ArchiveLocator::new(bundled.path(), installed.path().join("missing"));
        assert_eq!(locator.locate("kjv"), None);
    }

    #[test]
    fn lists_installed_translations() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "kjv.zip");
        touch(installed.path(), "web.zip");
        touch(installed.path(), "Asv.ZIP");
        touch(installed.path(), "notes.txt");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.installed_translations(), vec!["ASV", "WEB"]);
    }

    #[test]
    fn lists_all_translations_once() {
        let (bundled, installed) = dirs();
        touch(bundled.path(), "kjv.zip");
        touch(bundled.path(), "asv.zip");
        touch(installed.path(), "KJV.zip");
        touch(installed.path(), "web.zip");
        let locator = ArchiveLocator::new(bundled.path(), installed.path());
        assert_eq!(locator.available_translations(), vec!["ASV", "KJV", "WEB"]);
    }
}
