//! Book registry and scripture reference parsing.

pub mod books;
pub mod parser;
pub mod reference;

pub use books::{all_books, lookup_code, resolve, verse_count, BookEntry, Testament};
pub use parser::parse;
pub use reference::{ParseOutcome, PassageReference};
