//! Passage reference parser.
//!
//! Turns text like `"1 Cor 13:4-7"` into a validated [`PassageReference`].
//! Rules are tried from most to least specific and the first match wins:
//!
//! 1. `Book C:V-C:V`
//! 2. `Book C:V-V`
//! 3. `Book C-C`
//! 4. `Book C:V`
//! 5. `Book C`
//! 6. `Book`
//!
//! Ranges that start in one book and end in another are rejected before any
//! rule is tried.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::books::{self, BookEntry};
use super::reference::{ParseOutcome, PassageReference};
use crate::error::ReferenceError;

/// `Book C:V - Book C:V`, with or without spaces around the dash.
#[allow(clippy::expect_used)]
static RE_TWO_BOOKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+):(\d+)\s*[-–]\s*(.+?)\s+(\d+):(\d+)$")
        .expect("valid regex: RE_TWO_BOOKS")
});

/// A range dash between two numbers, with optional spacing.
#[allow(clippy::expect_used)]
static RE_RANGE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*[-–]\s*(\d)").expect("valid regex: RE_RANGE_DASH"));

#[allow(clippy::expect_used)]
static RE_CHAPTER_VERSE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+):(\d+)-(\d+):(\d+)$").expect("valid regex: RE_CHAPTER_VERSE_RANGE")
});

#[allow(clippy::expect_used)]
static RE_VERSE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+):(\d+)-(\d+)$").expect("valid regex: RE_VERSE_RANGE")
});

#[allow(clippy::expect_used)]
static RE_CHAPTER_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+)-(\d+)$").expect("valid regex: RE_CHAPTER_RANGE")
});

#[allow(clippy::expect_used)]
static RE_SINGLE_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+):(\d+)$").expect("valid regex: RE_SINGLE_VERSE")
});

#[allow(clippy::expect_used)]
static RE_SINGLE_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d+)$").expect("valid regex: RE_SINGLE_CHAPTER"));

/// Parse free-form reference text.
///
/// Never panics; every rejection is reported as [`ParseOutcome::Failure`].
pub fn parse(input: &str) -> ParseOutcome {
    parse_reference(input).into()
}

fn parse_reference(input: &str) -> Result<PassageReference, ReferenceError> {
    if input.trim().is_empty() {
        return Err(ReferenceError::Empty);
    }
    let input = input
        .trim()
        .trim_end_matches([',', '.', ';', '!', '?'])
        .trim_end();

    let text = match same_book_range(input)? {
        Some(rewritten) => Cow::Owned(rewritten),
        None => RE_RANGE_DASH.replace_all(input, "$1-$2"),
    };

    if let Some(c) = RE_CHAPTER_VERSE_RANGE.captures(&text) {
        let book = books::resolve(&c[1])?;
        let [cs, vs, ce, ve] = numbers(&c, [2, 3, 4, 5])?;
        check_chapters(book, &[cs, ce])?;
        if (cs, vs) > (ce, ve) {
            return Err(ReferenceError::StartAfterEnd);
        }
        return Ok(PassageReference::verses(book, cs, vs, ce, ve));
    }

    if let Some(c) = RE_VERSE_RANGE.captures(&text) {
        let book = books::resolve(&c[1])?;
        let [chapter, vs, ve] = numbers(&c, [2, 3, 4])?;
        check_chapters(book, &[chapter])?;
        if vs > ve {
            return Err(ReferenceError::StartAfterEnd);
        }
        return Ok(PassageReference::verses(book, chapter, vs, chapter, ve));
    }

    if let Some(c) = RE_CHAPTER_RANGE.captures(&text) {
        let book = books::resolve(&c[1])?;
        let [cs, ce] = numbers(&c, [2, 3])?;
        check_chapters(book, &[cs, ce])?;
        if cs > ce {
            return Err(ReferenceError::StartAfterEnd);
        }
        return Ok(PassageReference::chapters(book, cs, ce));
    }

    if let Some(c) = RE_SINGLE_VERSE.captures(&text) {
        let book = books::resolve(&c[1])?;
        let [chapter, verse] = numbers(&c, [2, 3])?;
        check_chapters(book, &[chapter])?;
        return Ok(PassageReference::verses(book, chapter, verse, chapter, verse));
    }

    if let Some(c) = RE_SINGLE_CHAPTER.captures(&text) {
        let book = books::resolve(&c[1])?;
        let [chapter] = numbers(&c, [2])?;
        check_chapters(book, &[chapter])?;
        return Ok(PassageReference::chapters(book, chapter, chapter));
    }

    Ok(PassageReference::whole_book(books::resolve(&text)?))
}

/// Detect `Book C:V - Book C:V`.
///
/// Different books on each side is an error. The same book on both sides
/// is rewritten to the plain `Book C:V-C:V` form. Anything else (including
/// sides that do not resolve) is left for the regular rules.
fn same_book_range(input: &str) -> Result<Option<String>, ReferenceError> {
    let Some(c) = RE_TWO_BOOKS.captures(input) else {
        return Ok(None);
    };
    let (Ok(first), Ok(second)) = (books::resolve(&c[1]), books::resolve(&c[4])) else {
        return Ok(None);
    };
    if first.code != second.code {
        tracing::debug!("Rejected cross-book range {} -> {}", first.code, second.code);
        return Err(ReferenceError::CrossBook);
    }
    Ok(Some(format!("{} {}:{}-{}:{}", c[1].trim(), &c[2], &c[3], &c[5], &c[6])))
}

/// Parse the given capture groups as positive integers.
fn numbers<const N: usize>(caps: &Captures<'_>, groups: [usize; N]) -> Result<[u32; N], ReferenceError> {
    let mut out = [0u32; N];
    for (slot, group) in out.iter_mut().zip(groups) {
        let text = caps.get(group).map_or("", |m| m.as_str());
        *slot = text.parse().map_err(|_| ReferenceError::InvalidNumbers)?;
    }
    if out.contains(&0) {
        return Err(ReferenceError::NonPositive);
    }
    Ok(out)
}

fn check_chapters(book: &BookEntry, chapters: &[u32]) -> Result<(), ReferenceError> {
    if chapters.iter().any(|&c| c > book.max_chapters) {
        return Err(ReferenceError::ChapterOutOfRange { book: book.name, max: book.max_chapters });
    }
    Ok(())
}
