//! Cloze text handling.
//!
//! - [`segment::segment`]: split text into word and whitespace tokens
//! - [`structure::BlankStructure`]: which word tokens are blanks

pub mod segment;
pub mod structure;

pub use segment::{Token, join, segment, word_count};
pub use structure::{BlankStructure, BlankToken};
