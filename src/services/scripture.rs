//! Scripture text service.
//!
//! Ties the archive locator to the extraction engine behind a small trait so
//! callers can fetch a passage by translation code without caring where the
//! text lives.

use tracing::warn;

use crate::bible::PassageReference;
use crate::error::Result;
use crate::locator::ArchiveLocator;
use crate::types::{TranslationCode, Verse};
use crate::usfm::{extract_verses, CancelToken, VerseIter, VerseRange};

/// Boxed verse sequence returned by a [`TextSource`].
pub type Verses = Box<dyn Iterator<Item = Verse> + Send>;

/// Trait for scripture text providers.
///
/// Different implementations can provide scripture from various sources
/// (zipped USFM archives, fixtures in tests).
pub trait TextSource {
    /// Verses of `reference` in `translation`, in source order.
    ///
    /// Never fails: an unavailable translation produces a single
    /// placeholder verse.
    fn verses(&self, translation: &str, reference: &PassageReference, cancel: CancelToken) -> Verses;

    /// Translation codes this source can serve.
    fn available_translations(&self) -> Vec<String>;

    /// Check if a specific translation is available.
    fn has_translation(&self, code: &str) -> bool {
        self.available_translations()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(code.trim()))
    }

    /// Parse `input` and collect its verses.
    fn passage(&self, translation: &str, input: &str) -> Result<(PassageReference, Vec<Verse>)> {
        let reference: PassageReference = input.parse()?;
        let verses = self.verses(translation, &reference, CancelToken::new()).collect();
        Ok((reference, verses))
    }
}

/// Selection window for `reference`.
///
/// Whole-book references cover every chapter of the book.
pub fn range_for(reference: &PassageReference) -> VerseRange {
    if reference.is_whole_book() {
        VerseRange::whole_chapters(1, reference.book().max_chapters)
    } else {
        VerseRange::from(reference)
    }
}

/// [`TextSource`] over zipped USFM archives found by an [`ArchiveLocator`].
#[derive(Debug, Clone)]
pub struct UsfmZipSource {
    locator: ArchiveLocator,
}

impl UsfmZipSource {
    /// Create a source over `locator`'s directories.
    pub const fn new(locator: ArchiveLocator) -> Self {
        Self { locator }
    }
}

impl TextSource for UsfmZipSource {
    fn verses(&self, translation: &str, reference: &PassageReference, cancel: CancelToken) -> Verses {
        let range = range_for(reference);
        let Some(path) = self.locator.locate(translation) else {
            let code = TranslationCode::new(translation);
            warn!(translation = %code, "No archive available for translation");
            return Box::new(VerseIter::placeholder(Verse::placeholder(
                reference.code(),
                range.chapter_start.unwrap_or(1),
                range.verse_start.unwrap_or(1),
                format!("[Missing translation: {code}]"),
            )));
        };
        Box::new(extract_verses(path, reference.code(), range, cancel))
    }

    fn available_translations(&self) -> Vec<String> {
        self.locator.available_translations()
    }
}
