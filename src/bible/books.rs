//! Book registry: canonical names, USFM codes, chapter counts and aliases.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::constants::registry::{DEFAULT_VERSE_COUNT, MAX_SUGGESTIONS, MIN_EMBEDDED_ALIAS_LEN};
use crate::error::ReferenceError;

/// Which half of the canon a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Testament {
    /// Genesis through Malachi.
    Old,
    /// Matthew through Revelation.
    New,
}

/// A canonical book of the Bible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BookEntry {
    /// Canonical display name (e.g. "1 Corinthians").
    pub name: &'static str,
    /// USFM book code (e.g. "1CO").
    pub code: &'static str,
    /// Number of chapters in the book.
    pub max_chapters: u32,
    /// 1-based position in canonical order.
    pub order: u8,
    /// Old or New Testament.
    pub testament: Testament,
}

const fn ot(order: u8, name: &'static str, code: &'static str, max_chapters: u32) -> BookEntry {
    BookEntry { name, code, max_chapters, order, testament: Testament::Old }
}

const fn nt(order: u8, name: &'static str, code: &'static str, max_chapters: u32) -> BookEntry {
    BookEntry { name, code, max_chapters, order, testament: Testament::New }
}

/// All 66 books in canonical order.
static BOOKS: [BookEntry; 66] = [
    ot(1, "Genesis", "GEN", 50),
    ot(2, "Exodus", "EXO", 40),
    ot(3, "Leviticus", "LEV", 27),
    ot(4, "Numbers", "NUM", 36),
    ot(5, "Deuteronomy", "DEU", 34),
    ot(6, "Joshua", "JOS", 24),
    ot(7, "Judges", "JDG", 21),
    ot(8, "Ruth", "RUT", 4),
    ot(9, "1 Samuel", "1SA", 31),
    ot(10, "2 Samuel", "2SA", 24),
    ot(11, "1 Kings", "1KI", 22),
    ot(12, "2 Kings", "2KI", 25),
    ot(13, "1 Chronicles", "1CH", 29),
    ot(14, "2 Chronicles", "2CH", 36),
    ot(15, "Ezra", "EZR", 10),
    ot(16, "Nehemiah", "NEH", 13),
    ot(17, "Esther", "EST", 10),
    ot(18, "Job", "JOB", 42),
    ot(19, "Psalms", "PSA", 150),
    ot(20, "Proverbs", "PRO", 31),
    ot(21, "Ecclesiastes", "ECC", 12),
    ot(22, "Song of Solomon", "SNG", 8),
    ot(23, "Isaiah", "ISA", 66),
    ot(24, "Jeremiah", "JER", 52),
    ot(25, "Lamentations", "LAM", 5),
    ot(26, "Ezekiel", "EZK", 48),
    ot(27, "Daniel", "DAN", 12),
    ot(28, "Hosea", "HOS", 14),
    ot(29, "Joel", "JOL", 3),
    ot(30, "Amos", "AMO", 9),
    ot(31, "Obadiah", "OBA", 1),
    ot(32, "Jonah", "JON", 4),
    ot(33, "Micah", "MIC", 7),
    ot(34, "Nahum", "NAM", 3),
    ot(35, "Habakkuk", "HAB", 3),
    ot(36, "Zephaniah", "ZEP", 3),
    ot(37, "Haggai", "HAG", 2),
    ot(38, "Zechariah", "ZEC", 14),
    ot(39, "Malachi", "MAL", 4),
    nt(40, "Matthew", "MAT", 28),
    nt(41, "Mark", "MRK", 16),
    nt(42, "Luke", "LUK", 24),
    nt(43, "John", "JHN", 21),
    nt(44, "Acts", "ACT", 28),
    nt(45, "Romans", "ROM", 16),
    nt(46, "1 Corinthians", "1CO", 16),
    nt(47, "2 Corinthians", "2CO", 13),
    nt(48, "Galatians", "GAL", 6),
    nt(49, "Ephesians", "EPH", 6),
    nt(50, "Philippians", "PHP", 4),
    nt(51, "Colossians", "COL", 4),
    nt(52, "1 Thessalonians", "1TH", 5),
    nt(53, "2 Thessalonians", "2TH", 3),
    nt(54, "1 Timothy", "1TI", 6),
    nt(55, "2 Timothy", "2TI", 4),
    nt(56, "Titus", "TIT", 3),
    nt(57, "Philemon", "PHM", 1),
    nt(58, "Hebrews", "HEB", 13),
    nt(59, "James", "JAS", 5),
    nt(60, "1 Peter", "1PE", 5),
    nt(61, "2 Peter", "2PE", 3),
    nt(62, "1 John", "1JN", 5),
    nt(63, "2 John", "2JN", 1),
    nt(64, "3 John", "3JN", 1),
    nt(65, "Jude", "JUD", 1),
    nt(66, "Revelation", "REV", 22),
];

/// Alias -> book code. Canonical names come first for each book.
const ALIASES: &[(&str, &str)] = &[
    // Old Testament
    ("Genesis", "GEN"), ("Gen", "GEN"), ("Ge", "GEN"), ("Gn", "GEN"),
    ("Exodus", "EXO"), ("Exo", "EXO"), ("Exod", "EXO"), ("Ex", "EXO"),
    ("Leviticus", "LEV"), ("Lev", "LEV"), ("Le", "LEV"), ("Lv", "LEV"),
    ("Numbers", "NUM"), ("Num", "NUM"), ("Nu", "NUM"), ("Nm", "NUM"),
    ("Deuteronomy", "DEU"), ("Deut", "DEU"), ("Deu", "DEU"), ("Dt", "DEU"),
    ("Joshua", "JOS"), ("Josh", "JOS"), ("Jos", "JOS"),
    ("Judges", "JDG"), ("Judg", "JDG"), ("Jg", "JDG"),
    ("Ruth", "RUT"), ("Ru", "RUT"),
    ("1 Samuel", "1SA"), ("1Sam", "1SA"), ("1Sa", "1SA"), ("1 S", "1SA"), ("I Samuel", "1SA"),
    ("2 Samuel", "2SA"), ("2Sam", "2SA"), ("2Sa", "2SA"), ("2 S", "2SA"), ("II Samuel", "2SA"),
    ("1 Kings", "1KI"), ("1Kgs", "1KI"), ("1Ki", "1KI"), ("1 K", "1KI"), ("I Kings", "1KI"),
    ("2 Kings", "2KI"), ("2Kgs", "2KI"), ("2Ki", "2KI"), ("2 K", "2KI"), ("II Kings", "2KI"),
    ("1 Chronicles", "1CH"), ("1Chr", "1CH"), ("1Ch", "1CH"),
    ("2 Chronicles", "2CH"), ("2Chr", "2CH"), ("2Ch", "2CH"),
    ("Ezra", "EZR"), ("Ezr", "EZR"),
    ("Nehemiah", "NEH"), ("Neh", "NEH"), ("Ne", "NEH"),
    ("Esther", "EST"), ("Esth", "EST"), ("Est", "EST"), ("Es", "EST"),
    ("Job", "JOB"),
    ("Psalms", "PSA"), ("Psalm", "PSA"), ("Psa", "PSA"), ("Ps", "PSA"),
    ("Proverbs", "PRO"), ("Prov", "PRO"), ("Pro", "PRO"), ("Pr", "PRO"),
    ("Ecclesiastes", "ECC"), ("Eccl", "ECC"), ("Ecc", "ECC"), ("Ec", "ECC"),
    ("Song of Solomon", "SNG"), ("Song of Songs", "SNG"), ("Song", "SNG"),
    ("Canticles", "SNG"), ("SOS", "SNG"), ("SS", "SNG"),
    ("Isaiah", "ISA"), ("Isa", "ISA"), ("Is", "ISA"),
    ("Jeremiah", "JER"), ("Jer", "JER"), ("Je", "JER"),
    ("Lamentations", "LAM"), ("Lam", "LAM"), ("La", "LAM"),
    ("Ezekiel", "EZK"), ("Ezek", "EZK"), ("Eze", "EZK"), ("Ez", "EZK"),
    ("Daniel", "DAN"), ("Dan", "DAN"), ("Da", "DAN"),
    ("Hosea", "HOS"), ("Hos", "HOS"), ("Ho", "HOS"),
    ("Joel", "JOL"), ("Joe", "JOL"), ("Jl", "JOL"),
    ("Amos", "AMO"), ("Am", "AMO"),
    ("Obadiah", "OBA"), ("Obad", "OBA"), ("Ob", "OBA"),
    ("Jonah", "JON"), ("Jon", "JON"), ("Jnh", "JON"),
    ("Micah", "MIC"), ("Mic", "MIC"), ("Mi", "MIC"),
    ("Nahum", "NAM"), ("Nah", "NAM"), ("Na", "NAM"),
    ("Habakkuk", "HAB"), ("Hab", "HAB"), ("Hb", "HAB"),
    ("Zephaniah", "ZEP"), ("Zeph", "ZEP"), ("Zp", "ZEP"),
    ("Haggai", "HAG"), ("Hag", "HAG"), ("Hg", "HAG"),
    ("Zechariah", "ZEC"), ("Zech", "ZEC"), ("Zc", "ZEC"),
    ("Malachi", "MAL"), ("Mal", "MAL"), ("Ml", "MAL"),
    // New Testament
    ("Matthew", "MAT"), ("Matt", "MAT"), ("Mt", "MAT"),
    ("Mark", "MRK"), ("Mk", "MRK"), ("Mr", "MRK"),
    ("Luke", "LUK"), ("Lk", "LUK"), ("Lu", "LUK"),
    ("John", "JHN"), ("Jhn", "JHN"), ("Jn", "JHN"),
    ("Acts", "ACT"), ("Ac", "ACT"),
    ("Romans", "ROM"), ("Rom", "ROM"), ("Ro", "ROM"),
    ("1 Corinthians", "1CO"), ("1Cor", "1CO"), ("1Co", "1CO"), ("1 C", "1CO"),
    ("2 Corinthians", "2CO"), ("2Cor", "2CO"), ("2Co", "2CO"), ("2 C", "2CO"),
    ("Galatians", "GAL"), ("Gal", "GAL"), ("Ga", "GAL"),
    ("Ephesians", "EPH"), ("Eph", "EPH"), ("Ep", "EPH"),
    ("Philippians", "PHP"), ("Phil", "PHP"), ("Php", "PHP"), ("Pp", "PHP"),
    ("Colossians", "COL"), ("Col", "COL"),
    ("1 Thessalonians", "1TH"), ("1Thess", "1TH"), ("1Th", "1TH"), ("1 T", "1TH"),
    ("2 Thessalonians", "2TH"), ("2Thess", "2TH"), ("2Th", "2TH"), ("2 T", "2TH"),
    ("1 Timothy", "1TI"), ("1Tim", "1TI"), ("1Ti", "1TI"),
    ("2 Timothy", "2TI"), ("2Tim", "2TI"), ("2Ti", "2TI"),
    ("Titus", "TIT"), ("Tit", "TIT"), ("Ti", "TIT"),
    ("Philemon", "PHM"), ("Philem", "PHM"), ("Phlm", "PHM"), ("Phm", "PHM"),
    ("Hebrews", "HEB"), ("Heb", "HEB"), ("He", "HEB"),
    ("James", "JAS"), ("Jas", "JAS"), ("Jm", "JAS"),
    ("1 Peter", "1PE"), ("1Pet", "1PE"), ("1Pe", "1PE"), ("1 P", "1PE"),
    ("2 Peter", "2PE"), ("2Pet", "2PE"), ("2Pe", "2PE"), ("2 P", "2PE"),
    ("1 John", "1JN"), ("1Jn", "1JN"), ("1J", "1JN"),
    ("2 John", "2JN"), ("2Jn", "2JN"), ("2J", "2JN"),
    ("3 John", "3JN"), ("3Jn", "3JN"), ("3J", "3JN"),
    ("Jude", "JUD"), ("Jd", "JUD"),
    ("Revelation", "REV"), ("Revelations", "REV"), ("Rev", "REV"), ("Re", "REV"),
];

/// Chapter -> verse count, for the books where we carry the data.
const VERSE_COUNTS: &[(&str, &[u32])] = &[
    ("GEN", &[
        31, 25, 24, 26, 32, 22, 24, 22, 29, 32, 32, 20, 18, 24, 21, 16, 27, 33, 38, 18,
        34, 24, 20, 67, 34, 35, 46, 22, 35, 43, 55, 32, 20, 31, 29, 43, 36, 30, 23, 23,
        57, 38, 34, 34, 28, 34, 31, 22, 33, 26,
    ]),
    ("RUT", &[22, 23, 18, 22]),
    ("JON", &[17, 10, 10, 11]),
    ("JHN", &[
        51, 25, 36, 54, 47, 71, 53, 59, 41, 42, 57, 50, 38, 31, 27, 33, 26, 40, 42, 31, 25,
    ]),
];

lazy_static! {
    /// Lowercased alias -> book.
    static ref ALIAS_INDEX: HashMap<String, &'static BookEntry> = ALIASES
        .iter()
        .filter_map(|&(alias, code)| Some((alias.to_lowercase(), lookup_code(code)?)))
        .collect();

    /// Aliases with whitespace removed, in table order, for prefix matching.
    static ref NORMALIZED_ALIASES: Vec<(String, &'static BookEntry)> = ALIASES
        .iter()
        .filter_map(|&(alias, code)| Some((normalize(alias), lookup_code(code)?)))
        .collect();
}

/// Lowercase and drop all whitespace ("1 Cor" -> "1cor").
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// All books in canonical order (Old Testament then New Testament).
pub fn all_books() -> &'static [BookEntry] {
    &BOOKS
}

/// Look up a book by its USFM code, case-insensitively.
pub fn lookup_code(code: &str) -> Option<&'static BookEntry> {
    let code = code.trim();
    BOOKS.iter().find(|b| b.code.eq_ignore_ascii_case(code))
}

/// Resolve a free-form book token to a registry entry.
///
/// Exact (case-insensitive) alias lookup wins. Otherwise the token is
/// compared against every alias with whitespace removed: a book is a
/// candidate when the token is a prefix of one of its aliases. Only when no
/// alias extends the token are embedded aliases considered: an alias of at
/// least three characters that starts the token and is followed only by
/// letters, keeping the books with the longest such alias. A single
/// candidate book resolves; several produce
/// [`ReferenceError::AmbiguousBook`].
pub fn resolve(token: &str) -> Result<&'static BookEntry, ReferenceError> {
    let token = token.trim();
    if let Some(&book) = ALIAS_INDEX.get(&token.to_lowercase()) {
        return Ok(book);
    }

    let needle = normalize(token);
    if needle.is_empty() {
        return Err(ReferenceError::UnknownBook(token.to_string()));
    }

    if let Some((_, book)) = NORMALIZED_ALIASES.iter().find(|(alias, _)| *alias == needle) {
        return Ok(*book);
    }

    let mut candidates = prefix_candidates(&needle);
    if candidates.is_empty() {
        candidates = embedded_candidates(&needle);
    }
    candidates.sort_by_key(|b| b.order);

    match candidates.as_slice() {
        [] => Err(ReferenceError::UnknownBook(token.to_string())),
        [book] => {
            tracing::debug!("Resolved '{token}' to {} by prefix", book.code);
            Ok(*book)
        }
        many => Err(ReferenceError::AmbiguousBook {
            token: token.to_string(),
            candidates: many
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(|b| b.name.to_string())
                .collect(),
        }),
    }
}

/// Books with an alias that the token is a prefix of.
fn prefix_candidates(needle: &str) -> Vec<&'static BookEntry> {
    let mut books: Vec<&'static BookEntry> = Vec::new();
    for (alias, book) in NORMALIZED_ALIASES.iter() {
        if alias.starts_with(needle) && !books.contains(book) {
            books.push(*book);
        }
    }
    books
}

/// Books whose longest alias starting the token leaves only letters behind
/// ("psalmss" -> "psalms").
fn embedded_candidates(needle: &str) -> Vec<&'static BookEntry> {
    let mut best = 0;
    let mut books: Vec<&'static BookEntry> = Vec::new();
    for (alias, book) in NORMALIZED_ALIASES.iter() {
        let embedded = alias.len() >= MIN_EMBEDDED_ALIAS_LEN
            && needle
                .strip_prefix(alias.as_str())
                .is_some_and(|rest| rest.chars().all(char::is_alphabetic));
        if !embedded || alias.len() < best {
            continue;
        }
        if alias.len() > best {
            best = alias.len();
            books.clear();
        }
        if !books.contains(book) {
            books.push(*book);
        }
    }
    books
}

/// Number of verses in a chapter, for bounding pickers.
///
/// Falls back to a fixed default when the chapter is not in the table;
/// this is not authoritative for parsing.
pub fn verse_count(book: &BookEntry, chapter: u32) -> u32 {
    VERSE_COUNTS
        .iter()
        .find(|(code, _)| *code == book.code)
        .and_then(|(_, counts)| {
            let idx = usize::try_from(chapter.checked_sub(1)?).ok()?;
            counts.get(idx).copied()
        })
        .unwrap_or(DEFAULT_VERSE_COUNT)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn every_alias_points_at_a_book() {
        for (alias, code) in ALIASES {
            assert!(lookup_code(code).is_some(), "{alias} -> {code}");
        }
        assert_eq!(ALIAS_INDEX.len(), ALIASES.len(), "duplicate alias in table");
    }

    #[test]
    fn canonical_order_is_sixty_six_books() {
        let books = all_books();
        assert_eq!(books.len(), 66);
        assert_eq!(books[0].code, "GEN");
        assert_eq!(books[38].code, "MAL");
        assert_eq!(books[39].code, "MAT");
        assert_eq!(books[65].code, "REV");
        for (i, b) in books.iter().enumerate() {
            assert_eq!(usize::from(b.order), i + 1);
        }
        assert_eq!(books.iter().filter(|b| b.testament == Testament::Old).count(), 39);
    }

    #[test]
    fn exact_alias_is_case_insensitive() {
        assert_eq!(resolve("gen").unwrap().code, "GEN");
        assert_eq!(resolve("SONG OF SONGS").unwrap().code, "SNG");
        assert_eq!(resolve("II Kings").unwrap().code, "2KI");
    }

    #[test]
    fn spacing_is_ignored_for_numbered_books() {
        assert_eq!(resolve("1cor").unwrap().code, "1CO");
        assert_eq!(resolve("1 Cor").unwrap().code, "1CO");
        assert_eq!(resolve("1 Jn").unwrap().code, "1JN");
    }

    #[test]
    fn unique_prefix_resolves() {
        assert_eq!(resolve("Gene").unwrap().code, "GEN");
        assert_eq!(resolve("Lament").unwrap().code, "LAM");
        assert_eq!(resolve("Revelations").unwrap().code, "REV");
        assert_eq!(resolve("Psalmss").unwrap().code, "PSA");
    }

    #[test]
    fn longer_alias_prefixes_beat_embedded_aliases() {
        assert_eq!(resolve("Phile").unwrap().code, "PHM");
        assert_eq!(resolve("Philemo").unwrap().code, "PHM");
        assert_eq!(resolve("Philemons").unwrap().code, "PHM");
        assert_eq!(resolve("Phili").unwrap().code, "PHP");
    }

    #[test]
    fn ambiguous_prefix_lists_distinct_books() {
        match resolve("Jo") {
            Err(ReferenceError::AmbiguousBook { candidates, .. }) => {
                assert_eq!(candidates, vec!["Joshua", "Job", "Joel", "Jonah", "John"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
        match resolve("Ph") {
            Err(ReferenceError::AmbiguousBook { candidates, .. }) => {
                assert_eq!(candidates, vec!["Philippians", "Philemon"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn unknown_book() {
        assert_eq!(
            resolve("Hezekiah"),
            Err(ReferenceError::UnknownBook("Hezekiah".to_string()))
        );
        assert!(matches!(resolve("John 3:16x"), Err(ReferenceError::UnknownBook(_))));
    }

    #[test]
    fn verse_counts_with_fallback() {
        let genesis = lookup_code("gen").unwrap();
        assert_eq!(verse_count(genesis, 1), 31);
        assert_eq!(verse_count(genesis, 50), 26);
        assert_eq!(verse_count(genesis, 51), DEFAULT_VERSE_COUNT);
        assert_eq!(verse_count(genesis, 0), DEFAULT_VERSE_COUNT);
        let exodus = lookup_code("EXO").unwrap();
        assert_eq!(verse_count(exodus, 20), DEFAULT_VERSE_COUNT);
        let john = lookup_code("JHN").unwrap();
        assert_eq!(verse_count(john, 3), 36);
    }
}
