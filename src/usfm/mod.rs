//! USFM markup extraction engine.
//!
//! Scripture archives are zip files holding one USFM-style text entry per
//! book. Extraction opens an archive, scans its entries line by line and
//! yields the verses of one book that fall inside a [`VerseRange`]:
//!
//! - [`line`] classifies each source line;
//! - [`clean`] strips inline markup from an assembled verse;
//! - the scanner tracks chapter, poetry and paragraph state per call;
//! - [`extract_verses`] is the lazy iterator, [`verse_stream`] its async form.

pub mod cancel;
pub mod clean;
pub mod extract;
pub mod line;
pub mod range;
mod scan;
pub mod stream;

pub use cancel::CancelToken;
pub use clean::clean_text;
pub use extract::{extract_verses, VerseIter};
pub use range::VerseRange;
pub use stream::verse_stream;
