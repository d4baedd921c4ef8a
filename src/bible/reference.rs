//! Validated passage references and parse outcomes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::books::BookEntry;
use crate::error::ReferenceError;

/// A validated book/chapter/verse range within a single book.
///
/// Only the parser builds these, so the following always hold:
/// - no chapter means a whole-book reference (every other bound is absent);
/// - no start verse means a whole-chapter or chapter-range reference;
/// - when both ends are present, start <= end (chapter, then verse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PassageReference {
    book: &'static BookEntry,
    chapter_start: Option<u32>,
    verse_start: Option<u32>,
    chapter_end: Option<u32>,
    verse_end: Option<u32>,
}

impl PassageReference {
    pub(crate) const fn whole_book(book: &'static BookEntry) -> Self {
        Self { book, chapter_start: None, verse_start: None, chapter_end: None, verse_end: None }
    }

    pub(crate) const fn chapters(book: &'static BookEntry, start: u32, end: u32) -> Self {
        Self {
            book,
            chapter_start: Some(start),
            verse_start: None,
            chapter_end: Some(end),
            verse_end: None,
        }
    }

    pub(crate) const fn verses(
        book: &'static BookEntry,
        chapter_start: u32,
        verse_start: u32,
        chapter_end: u32,
        verse_end: u32,
    ) -> Self {
        Self {
            book,
            chapter_start: Some(chapter_start),
            verse_start: Some(verse_start),
            chapter_end: Some(chapter_end),
            verse_end: Some(verse_end),
        }
    }

    /// The referenced book.
    pub const fn book(&self) -> &'static BookEntry {
        self.book
    }

    /// Canonical book name.
    pub const fn book_name(&self) -> &'static str {
        self.book.name
    }

    /// USFM book code.
    pub const fn code(&self) -> &'static str {
        self.book.code
    }

    /// First chapter, absent for a whole-book reference.
    pub const fn chapter_start(&self) -> Option<u32> {
        self.chapter_start
    }

    /// First verse, absent for whole chapters.
    pub const fn verse_start(&self) -> Option<u32> {
        self.verse_start
    }

    /// Last chapter.
    pub const fn chapter_end(&self) -> Option<u32> {
        self.chapter_end
    }

    /// Last verse.
    pub const fn verse_end(&self) -> Option<u32> {
        self.verse_end
    }

    /// True when no chapter was given.
    pub const fn is_whole_book(&self) -> bool {
        self.chapter_start.is_none()
    }

    /// True for chapter-only references spanning more than one chapter.
    pub fn is_chapter_range(&self) -> bool {
        self.verse_start.is_none()
            && self.chapter_start.is_some()
            && self.chapter_start != self.chapter_end
    }
}

impl fmt::Display for PassageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let book = self.book.name;
        let Some(cs) = self.chapter_start else {
            return write!(f, "{book}");
        };
        let ce = self.chapter_end.unwrap_or(cs);
        let Some(vs) = self.verse_start else {
            return if cs == ce {
                write!(f, "{book} {cs}")
            } else {
                write!(f, "{book} {cs}-{ce}")
            };
        };
        let ve = self.verse_end.unwrap_or(vs);
        if cs != ce {
            write!(f, "{book} {cs}:{vs}-{ce}:{ve}")
        } else if vs == ve {
            write!(f, "{book} {cs}:{vs}")
        } else {
            write!(f, "{book} {cs}:{vs}-{ve}")
        }
    }
}

impl FromStr for PassageReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parser::parse(s).into_result()
    }
}

/// Result of parsing free-form reference text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The text named a valid passage.
    Success(PassageReference),
    /// The text was rejected; the error's `Display` is the user-facing message.
    Failure(ReferenceError),
}

impl ParseOutcome {
    /// True for [`ParseOutcome::Success`].
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The parsed reference, if any.
    pub const fn reference(&self) -> Option<&PassageReference> {
        match self {
            Self::Success(r) => Some(r),
            Self::Failure(_) => None,
        }
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e.to_string()),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<PassageReference, ReferenceError> {
        self.into()
    }
}

impl From<Result<PassageReference, ReferenceError>> for ParseOutcome {
    fn from(result: Result<PassageReference, ReferenceError>) -> Self {
        match result {
            Ok(r) => Self::Success(r),
            Err(e) => Self::Failure(e),
        }
    }
}

impl From<ParseOutcome> for Result<PassageReference, ReferenceError> {
    fn from(outcome: ParseOutcome) -> Self {
        match outcome {
            ParseOutcome::Success(r) => Ok(r),
            ParseOutcome::Failure(e) => Err(e),
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(r) => write!(f, "{r}"),
            Self::Failure(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::books::lookup_code;

    fn book(code: &str) -> &'static BookEntry {
        lookup_code(code).unwrap()
    }

    #[test]
    fn renders_each_shape() {
        assert_eq!(PassageReference::whole_book(book("ROM")).to_string(), "Romans");
        assert_eq!(PassageReference::chapters(book("PSA"), 23, 23).to_string(), "Psalms 23");
        assert_eq!(PassageReference::chapters(book("GEN"), 1, 3).to_string(), "Genesis 1-3");
        assert_eq!(PassageReference::verses(book("JHN"), 3, 16, 3, 16).to_string(), "John 3:16");
        assert_eq!(
            PassageReference::verses(book("GEN"), 1, 1, 1, 10).to_string(),
            "Genesis 1:1-10"
        );
        assert_eq!(
            PassageReference::verses(book("JHN"), 3, 16, 4, 2).to_string(),
            "John 3:16-4:2"
        );
    }

    #[test]
    fn shape_predicates() {
        assert!(PassageReference::whole_book(book("ROM")).is_whole_book());
        assert!(PassageReference::chapters(book("GEN"), 1, 3).is_chapter_range());
        assert!(!PassageReference::chapters(book("GEN"), 2, 2).is_chapter_range());
        assert!(!PassageReference::verses(book("JHN"), 3, 16, 4, 2).is_chapter_range());
    }

    #[test]
    fn outcome_conversions() {
        let ok = ParseOutcome::Success(PassageReference::whole_book(book("JUD")));
        assert!(ok.is_success());
        assert_eq!(ok.message(), None);
        assert_eq!(ok.to_string(), "Jude");

        let failed = ParseOutcome::Failure(ReferenceError::Empty);
        assert!(failed.reference().is_none());
        assert_eq!(failed.message().as_deref(), Some("Please enter a passage reference."));
        assert_eq!(failed.into_result(), Err(ReferenceError::Empty));
    }
}
