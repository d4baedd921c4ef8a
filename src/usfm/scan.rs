//! Scan state machine: turns classified lines into verses.

use std::collections::VecDeque;
use std::mem;

use tracing::debug;

use super::clean::clean_text;
use super::line::{classify, split_verses, Line};
use super::range::VerseRange;
use crate::types::Verse;

/// A verse whose lines are still being collected.
#[derive(Debug)]
struct PendingVerse {
    chapter: u32,
    number: u32,
    lines: Vec<String>,
    poetry_level: u8,
    is_new_paragraph: bool,
}

/// Per-call scan state.
///
/// Owned by one extraction; nothing here is shared between calls.
#[derive(Debug)]
pub struct Scanner {
    target: String,
    range: VerseRange,
    in_target: bool,
    chapter: u32,
    poetry_level: u8,
    next_is_paragraph: bool,
    pending: Option<PendingVerse>,
}

impl Scanner {
    /// Scanner for book `target` (matched as a case-insensitive prefix of
    /// each `\id`), emitting verses inside `range`.
    pub fn new(target: &str, range: VerseRange) -> Self {
        Self {
            target: target.trim().to_uppercase(),
            range,
            in_target: false,
            chapter: 0,
            poetry_level: 0,
            next_is_paragraph: false,
            pending: None,
        }
    }

    /// Feed one raw source line. Completed in-range verses are pushed to `out`.
    pub fn feed(&mut self, line: &str, out: &mut VecDeque<Verse>) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        for segment in split_verses(line) {
            self.apply(classify(segment), out);
        }
    }

    /// End of entry: flush the in-progress verse and reset all state.
    pub fn finish(&mut self, out: &mut VecDeque<Verse>) {
        self.flush(out);
        self.reset();
    }

    /// Drop the in-progress verse without emitting it.
    pub fn abandon(&mut self) {
        self.pending = None;
        self.reset();
    }

    fn reset(&mut self) {
        self.in_target = false;
        self.chapter = 0;
        self.poetry_level = 0;
        self.next_is_paragraph = false;
    }

    fn apply(&mut self, line: Line<'_>, out: &mut VecDeque<Verse>) {
        match line {
            Line::BookId(code) => {
                self.flush(out);
                self.reset();
                self.in_target = code.to_uppercase().starts_with(&self.target);
                debug!(book = code, in_target = self.in_target, "book id");
            }
            Line::Skip => {}
            Line::Poetry { level, text } => {
                self.poetry_level = level;
                self.append(text);
            }
            Line::Paragraph(text) => {
                self.poetry_level = 0;
                if self.append(text) {
                    if let Some(pending) = self.pending.as_mut() {
                        pending.is_new_paragraph = true;
                    }
                } else {
                    self.next_is_paragraph = true;
                }
            }
            Line::Chapter(number) => {
                self.flush(out);
                self.chapter = number;
            }
            Line::Verse { number, text } => {
                self.flush(out);
                let is_new_paragraph = mem::take(&mut self.next_is_paragraph);
                if self.in_target {
                    let mut lines = Vec::new();
                    if !text.is_empty() {
                        lines.push(text.to_string());
                    }
                    self.pending = Some(PendingVerse {
                        chapter: self.chapter,
                        number,
                        lines,
                        poetry_level: self.poetry_level,
                        is_new_paragraph,
                    });
                }
            }
            Line::Continuation(text) => {
                self.append(text);
            }
        }
    }

    /// Append inline text to the in-progress verse. Returns whether it was kept.
    fn append(&mut self, text: &str) -> bool {
        match self.pending.as_mut() {
            Some(pending) if !text.is_empty() => {
                pending.lines.push(text.to_string());
                true
            }
            _ => false,
        }
    }

    fn flush(&mut self, out: &mut VecDeque<Verse>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.lines.is_empty() || !self.range.contains(pending.chapter, pending.number) {
            return;
        }
        out.push_back(Verse {
            book: self.target.clone(),
            chapter: pending.chapter,
            number: pending.number,
            text: clean_text(&pending.lines),
            is_poetry: pending.poetry_level > 0,
            poetry_level: pending.poetry_level,
            is_new_paragraph: pending.is_new_paragraph,
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn scan(target: &str, range: VerseRange, source: &str) -> Vec<Verse> {
        let mut scanner = Scanner::new(target, range);
        let mut out = VecDeque::new();
        for line in source.lines() {
            scanner.feed(line, &mut out);
        }
        scanner.finish(&mut out);
        out.into_iter().collect()
    }

    const GENESIS: &str = r"\id GEN
\h Genesis
\mt1 The First Book of Moses
\c 1
\s1 The Creation
\p
\v 1 In the beginning God created the heaven and the earth.
\v 2 And the earth was without form,
and void.
\v 3 And God said, Let there be light: and there was light.
\c 2
\p
\v 1 Thus the heavens and the earth were finished.";

    #[test]
    fn emits_verses_in_range() {
        let verses = scan("GEN", VerseRange::new(Some(1), Some(2), None, Some(3)), GENESIS);
        let numbers: Vec<_> = verses.iter().map(|v| (v.chapter, v.number)).collect();
        assert_eq!(numbers, vec![(1, 2), (1, 3)]);
        assert_eq!(verses[0].text, "And the earth was without form, and void.");
        assert_eq!(verses[0].book, "GEN");
    }

    #[test]
    fn range_crosses_chapters() {
        let verses = scan("gen", VerseRange::new(Some(1), Some(3), Some(2), Some(1)), GENESIS);
        let numbers: Vec<_> = verses.iter().map(|v| (v.chapter, v.number)).collect();
        assert_eq!(numbers, vec![(1, 3), (2, 1)]);
        assert!(verses[1].is_new_paragraph);
    }

    #[test]
    fn no_start_chapter_emits_nothing() {
        assert!(scan("GEN", VerseRange::default(), GENESIS).is_empty());
    }

    #[test]
    fn other_books_are_ignored() {
        assert!(scan("EXO", VerseRange::whole_chapters(1, 2), GENESIS).is_empty());
    }

    #[test]
    fn paragraph_flag_applies_to_following_verse() {
        let verses = scan("GEN", VerseRange::whole_chapters(1, 1), GENESIS);
        assert!(verses[0].is_new_paragraph);
        assert!(!verses[1].is_new_paragraph);
        assert_eq!(verses[0].poetry_level, 0);
    }

    #[test]
    fn poetry_levels_are_captured_at_verse_start() {
        let source = r"\id PSA
\c 1
\q1
\v 1 Blessed is the man
\q2 that walketh not in the counsel of the ungodly,
\q1 \v 2 But his delight is in the law of the LORD;
\p
\v 3 And he shall be like a tree";
        let verses = scan("PSA", VerseRange::whole_chapters(1, 1), source);
        assert_eq!(verses.len(), 3);
        assert!(verses[0].is_poetry);
        assert_eq!(verses[0].poetry_level, 1);
        assert_eq!(
            verses[0].text,
            "Blessed is the man that walketh not in the counsel of the ungodly,"
        );
        assert_eq!(verses[1].poetry_level, 1);
        assert!(!verses[2].is_poetry);
        assert_eq!(verses[2].poetry_level, 0);
        assert!(verses[2].is_new_paragraph);
    }

    #[test]
    fn paragraph_with_text_marks_the_verse_in_progress() {
        let source = "\\id GEN\n\\c 1\n\\v 1 one\n\\p and so it continued\n\\v 2 two";
        let verses = scan("GEN", VerseRange::whole_chapters(1, 1), source);
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].text, "one and so it continued");
        assert!(verses[0].is_new_paragraph);
        assert!(!verses[1].is_new_paragraph);
    }

    #[test]
    fn book_id_resets_state() {
        let source = r"\id GEN
\c 1
\v 1 First.
\id EXO
\c 1
\v 1 Exodus first.
\id GEN
\v 1 Orphan with no chapter.";
        let verses = scan("GEN", VerseRange::whole_chapters(1, 1), source);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].text, "First.");
    }

    #[test]
    fn empty_verses_are_not_emitted() {
        let source = "\\id GEN\n\\c 1\n\\v 1\n\\v 2 Two.";
        let verses = scan("GEN", VerseRange::whole_chapters(1, 1), source);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 2);
    }

    #[test]
    fn abandon_discards_pending_verse() {
        let mut scanner = Scanner::new("GEN", VerseRange::whole_chapters(1, 1));
        let mut out = VecDeque::new();
        for line in ["\\id GEN", "\\c 1", "\\v 1 Partial"] {
            scanner.feed(line, &mut out);
        }
        scanner.abandon();
        scanner.finish(&mut out);
        assert!(out.is_empty());
    }
}
