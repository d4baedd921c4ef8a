//! Line classification for USFM-style markup.
//!
//! Each trimmed source line maps to exactly one [`Line`]. Inline verse
//! markers are split out first by [`split_verses`] so a line such as
//! `\q1 \v 1 Blessed is the man` is seen as a poetry marker followed by a
//! verse start.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::scan::MAX_POETRY_LEVEL;

/// `\id CODE ...`
#[allow(clippy::expect_used)]
static RE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\id\s+(\S+)").expect("valid regex: RE_ID"));

/// Section headings, introductions, titles and header metadata.
#[allow(clippy::expect_used)]
static RE_SKIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\(?:s\d?|is\d?|ip\d?|mt\d?|h\d?|toc\d?|ide|rem|cp|ca|va|vp)(?:\s|$)")
        .expect("valid regex: RE_SKIP")
});

/// `\q`, `\q1`..`\q4`, optionally followed by text.
#[allow(clippy::expect_used)]
static RE_POETRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\q(\d)?(?:\s+(.*))?$").expect("valid regex: RE_POETRY")
});

/// `\p` or `\m`, optionally followed by text.
#[allow(clippy::expect_used)]
static RE_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\[pm](?:\s+(.*))?$").expect("valid regex: RE_PARAGRAPH")
});

#[allow(clippy::expect_used)]
static RE_CHAPTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\c\s+(\d+)").expect("valid regex: RE_CHAPTER"));

/// `\v N text`; verse bridges like `\v 1-2` keep the first number.
#[allow(clippy::expect_used)]
static RE_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\v\s+(\d+)[^\s]*(?:\s+(.*))?$").expect("valid regex: RE_VERSE")
});

/// A verse marker anywhere in a line.
#[allow(clippy::expect_used)]
static RE_INLINE_VERSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\v\s+\d").expect("valid regex: RE_INLINE_VERSE"));

/// What a single line of markup means to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `\id` with the book code.
    BookId(&'a str),
    /// Heading, introduction, title or header metadata.
    Skip,
    /// Poetry marker with its level (1-4) and any trailing text.
    Poetry {
        /// Indentation level.
        level: u8,
        /// Inline text after the marker, possibly empty.
        text: &'a str,
    },
    /// Paragraph marker with any trailing text.
    Paragraph(&'a str),
    /// Chapter marker.
    Chapter(u32),
    /// Verse start.
    Verse {
        /// Verse number.
        number: u32,
        /// Text after the number, possibly empty.
        text: &'a str,
    },
    /// Anything else.
    Continuation(&'a str),
}

fn group<'a>(caps: &regex::Captures<'a>, i: usize) -> &'a str {
    caps.get(i).map_or("", |m| m.as_str().trim())
}

/// Classify one trimmed, non-empty line.
pub fn classify(line: &str) -> Line<'_> {
    if let Some(c) = RE_ID.captures(line) {
        return Line::BookId(group(&c, 1));
    }
    if RE_SKIP.is_match(line) {
        return Line::Skip;
    }
    if let Some(c) = RE_POETRY.captures(line) {
        let level = group(&c, 1)
            .parse::<u8>()
            .map_or(1, |l| l.clamp(1, MAX_POETRY_LEVEL));
        return Line::Poetry { level, text: group(&c, 2) };
    }
    if let Some(c) = RE_PARAGRAPH.captures(line) {
        return Line::Paragraph(group(&c, 1));
    }
    if let Some(c) = RE_CHAPTER.captures(line) {
        return match group(&c, 1).parse() {
            Ok(n) => Line::Chapter(n),
            Err(_) => Line::Skip,
        };
    }
    if let Some(c) = RE_VERSE.captures(line) {
        return match group(&c, 1).parse() {
            Ok(number) => Line::Verse { number, text: group(&c, 2) },
            Err(_) => Line::Continuation(line),
        };
    }
    Line::Continuation(line)
}

/// Split a line before every verse marker that is not at its start.
///
/// Returns trimmed, non-empty segments in order.
pub fn split_verses(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for m in RE_INLINE_VERSE.find_iter(line) {
        if m.start() > start {
            segments.push(line[start..m.start()].trim());
        }
        start = m.start();
    }
    segments.push(line[start..].trim());
    segments.retain(|s| !s.is_empty());
    segments
}
