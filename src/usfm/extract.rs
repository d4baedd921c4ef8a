//! Lazy verse extraction over a zipped USFM archive.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zip::ZipArchive;

use super::cancel::CancelToken;
use super::range::VerseRange;
use super::scan::Scanner;
use crate::constants::archive::ENTRY_SUFFIXES;
use crate::error::{Error, Result};
use crate::types::Verse;

/// Pull-based verse sequence for one extraction call.
///
/// The archive handle lives only as long as there are entries left to
/// scan; it is dropped on exhaustion, on cancellation, or with the
/// iterator itself.
pub struct VerseIter {
    path: PathBuf,
    archive: Option<ZipArchive<fs_err::File>>,
    next_entry: usize,
    lines: Option<io::Lines<Cursor<String>>>,
    scanner: Scanner,
    ready: VecDeque<Verse>,
    cancel: CancelToken,
    done: bool,
}

impl fmt::Debug for VerseIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerseIter")
            .field("path", &self.path)
            .field("next_entry", &self.next_entry)
            .field("ready", &self.ready.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl VerseIter {
    fn new(
        path: PathBuf,
        archive: ZipArchive<fs_err::File>,
        scanner: Scanner,
        cancel: CancelToken,
    ) -> Self {
        Self {
            path,
            archive: Some(archive),
            next_entry: 0,
            lines: None,
            scanner,
            ready: VecDeque::new(),
            cancel,
            done: false,
        }
    }

    /// A sequence holding just `verse`.
    pub fn placeholder(verse: Verse) -> Self {
        Self {
            path: PathBuf::new(),
            archive: None,
            next_entry: 0,
            lines: None,
            scanner: Scanner::new(&verse.book, VerseRange::default()),
            ready: VecDeque::from([verse]),
            cancel: CancelToken::new(),
            done: true,
        }
    }

    fn stop(&mut self) {
        self.ready.clear();
        self.lines = None;
        self.archive = None;
        self.scanner.abandon();
        self.done = true;
    }

    /// Text of the next scannable entry, or `None` once entries run out.
    fn next_entry_text(&mut self) -> Option<String> {
        let archive = self.archive.as_mut()?;
        while self.next_entry < archive.len() {
            let index = self.next_entry;
            self.next_entry += 1;
            match read_entry(archive, index, &self.path) {
                Ok(Some(text)) => return Some(text),
                Ok(None) => {}
                Err(e) => warn!(index, "Skipping unreadable entry: {e}"),
            }
        }
        None
    }
}

impl Iterator for VerseIter {
    type Item = Verse;

    fn next(&mut self) -> Option<Verse> {
        loop {
            if self.cancel.is_cancelled() {
                if !self.done || !self.ready.is_empty() {
                    debug!(path = %self.path.display(), "Extraction cancelled");
                }
                self.stop();
                return None;
            }
            if let Some(verse) = self.ready.pop_front() {
                return Some(verse);
            }
            if self.done {
                return None;
            }
            if let Some(lines) = self.lines.as_mut() {
                if let Some(Ok(line)) = lines.next() {
                    self.scanner.feed(&line, &mut self.ready);
                } else {
                    self.lines = None;
                    self.scanner.finish(&mut self.ready);
                }
                continue;
            }
            match self.next_entry_text() {
                Some(text) => self.lines = Some(Cursor::new(text).lines()),
                None => {
                    self.archive = None;
                    self.done = true;
                }
            }
        }
    }
}

fn is_text_entry(name: &str) -> bool {
    let name = name.to_lowercase();
    ENTRY_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Read entry `index` as text, or `None` when it is not a markup file.
fn read_entry(
    archive: &mut ZipArchive<fs_err::File>,
    index: usize,
    path: &Path,
) -> Result<Option<String>> {
    let mut entry = archive
        .by_index(index)
        .map_err(|e| Error::archive(path, e.to_string()))?;
    if entry.is_dir() || !is_text_entry(entry.name()) {
        return Ok(None);
    }
    debug!(entry = entry.name(), "Scanning entry");

    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(e, path.to_path_buf()))?;

    let text = String::from_utf8_lossy(&bytes);
    let text: &str = &text;
    Ok(Some(text.strip_prefix('\u{feff}').unwrap_or(text).to_string()))
}

fn open_archive(path: &Path) -> Result<ZipArchive<fs_err::File>> {
    let file = fs_err::File::open(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    ZipArchive::new(file).map_err(|e| Error::archive(path, e.to_string()))
}

/// Extract verses of book `target` within `range` from the archive at `path`.
///
/// Each call opens the archive afresh. An archive that cannot be opened
/// yields a single placeholder verse describing the problem.
pub fn extract_verses(
    path: impl AsRef<Path>,
    target: &str,
    range: VerseRange,
    cancel: CancelToken,
) -> VerseIter {
    let path = path.as_ref();
    let scanner = Scanner::new(target, range);
    match open_archive(path) {
        Ok(archive) => {
            info!(path = %path.display(), book = target, "Opened scripture archive");
            VerseIter::new(path.to_path_buf(), archive, scanner, cancel)
        }
        Err(e) => {
            warn!("Cannot read scripture archive: {e}");
            VerseIter::placeholder(Verse::placeholder(
                target.trim().to_uppercase(),
                range.chapter_start.unwrap_or(1),
                range.verse_start.unwrap_or(1),
                format!("[Unable to open archive: {}]", path.display()),
            ))
        }
    }
}
