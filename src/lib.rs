//! `Spoken` - scripture passage lookup.
//!
//! This crate parses free-form passage references ("1 Cor 13:4-7",
//! "Ps 23") into validated ranges, finds the archive backing a translation,
//! and streams the matching verses out of zipped USFM text.
//!
//! ```no_run
//! use spoken::bible::parse;
//! use spoken::locator::ArchiveLocator;
//! use spoken::usfm::{extract_verses, CancelToken, VerseRange};
//!
//! let reference = parse("John 3:16-18").into_result()?;
//! let locator = ArchiveLocator::new("versions", "translations");
//! if let Some(path) = locator.locate("KJV") {
//!     for verse in extract_verses(path, reference.code(), VerseRange::from(&reference), CancelToken::new()) {
//!         println!("{} {}", verse.number, verse.text);
//!     }
//! }
//! # Ok::<(), spoken::error::ReferenceError>(())
//! ```

pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod locator;
pub mod services;
pub mod types;
pub mod usfm;
