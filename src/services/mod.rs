//! Service modules.
//!
//! Service abstractions that sit between the parser, the locator and the
//! extraction engine.

pub mod scripture;
