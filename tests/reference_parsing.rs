//! Integration tests for passage reference parsing through the public API.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use spoken::bible::{all_books, lookup_code, parse, PassageReference, Testament};
use spoken::usfm::VerseRange;

#[test]
fn failures_carry_user_messages() {
    let cases = [
        ("", "Please enter a passage reference."),
        ("Genesis 51", "Genesis only has 50 chapters."),
        ("John 3:18-16", "Start reference must come before end reference."),
        ("John 0:1", "Chapter and verse numbers must be positive."),
        (
            "Genesis 1:31-Leviticus 5:10",
            "Cross-book ranges are not supported. Please select passages within a single book at a time.",
        ),
        (
            "Hezekiah 1:1",
            "Unknown book 'Hezekiah'. Please check the spelling and try again.",
        ),
    ];
    for (input, message) in cases {
        let outcome = parse(input);
        assert!(!outcome.is_success(), "{input:?}");
        assert_eq!(outcome.message().as_deref(), Some(message), "{input:?}");
    }
}

#[test]
fn success_renders_canonically() {
    let outcome = parse("1 cor 13:4 - 7");
    assert!(outcome.is_success());
    assert_eq!(outcome.to_string(), "1 Corinthians 13:4-7");
    assert_eq!(outcome.reference().map(PassageReference::code), Some("1CO"));
}

#[test]
fn references_drive_extraction_ranges() {
    let reference: PassageReference = "John 3:16-4:2".parse().unwrap();
    let range = VerseRange::from(&reference);
    assert!(range.contains(3, 36));
    assert!(range.contains(4, 2));
    assert!(!range.contains(4, 3));
}

#[test]
fn references_serialize_with_book_details() {
    let reference: PassageReference = "Ps 23:1".parse().unwrap();
    let json = serde_json::to_value(reference).unwrap();
    assert_eq!(json["book"]["code"], "PSA");
    assert_eq!(json["chapter_start"], 23);
    assert_eq!(json["verse_end"], 1);
}

#[test]
fn registry_is_in_canonical_order() {
    let books = all_books();
    assert_eq!(books.len(), 66);
    assert_eq!(books[0].code, "GEN");
    assert_eq!(books[38].code, "MAL");
    assert_eq!(books[39].testament, Testament::New);
    assert_eq!(books[65].code, "REV");
    assert_eq!(lookup_code("rev").map(|b| b.max_chapters), Some(22));
}
