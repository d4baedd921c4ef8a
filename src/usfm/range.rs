//! Inclusive chapter/verse window used to filter extracted verses.

use crate::bible::PassageReference;

/// Selection window, bounds inclusive.
///
/// A missing `chapter_start` selects nothing. Missing end bounds default
/// to the start point. Without a `verse_start` the window covers whole
/// chapters: it starts at verse 1 and, absent a `verse_end`, runs to the
/// end of the last chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerseRange {
    /// First chapter.
    pub chapter_start: Option<u32>,
    /// First verse within `chapter_start`.
    pub verse_start: Option<u32>,
    /// Last chapter, defaults to `chapter_start`.
    pub chapter_end: Option<u32>,
    /// Last verse within the end chapter.
    pub verse_end: Option<u32>,
}

impl VerseRange {
    /// Build a window from raw bounds.
    pub const fn new(
        chapter_start: Option<u32>,
        verse_start: Option<u32>,
        chapter_end: Option<u32>,
        verse_end: Option<u32>,
    ) -> Self {
        Self { chapter_start, verse_start, chapter_end, verse_end }
    }

    /// Whole chapters `start..=end`.
    pub const fn whole_chapters(start: u32, end: u32) -> Self {
        Self::new(Some(start), None, Some(end), None)
    }

    /// Resolved `((chapter, verse), (chapter, verse))` bounds, start before end.
    ///
    /// A reversed window is swapped. Returns `None` when no start chapter
    /// was given.
    pub fn bounds(&self) -> Option<((u32, u32), (u32, u32))> {
        let cs = self.chapter_start?;
        let vs = self.verse_start.unwrap_or(1);
        let ce = self.chapter_end.unwrap_or(cs);
        let ve = self.verse_end.or(self.verse_start).unwrap_or(u32::MAX);
        let (start, end) = ((cs, vs), (ce, ve));
        Some(if start > end { (end, start) } else { (start, end) })
    }

    /// Whether `chapter:verse` falls inside the window.
    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| (start..=end).contains(&(chapter, verse)))
    }
}

impl From<&PassageReference> for VerseRange {
    fn from(reference: &PassageReference) -> Self {
        Self::new(
            reference.chapter_start(),
            reference.verse_start(),
            reference.chapter_end(),
            reference.verse_end(),
        )
    }
}
