//! # phyalign - Relaxed PHYLIP Alignment Toolkit
//!
//! Reads multiple-sequence alignments in a relaxed PHYLIP-style format,
//! writes them back out, and derives column-subset alignments.
//!
//! ## Architecture
//!
//! - `alphabet`: symbol validation and one-byte-per-site encoding
//! - `parser`: the line-oriented block state machine (header, the
//!   sequential named block, then blank-line-separated interleaved
//!   blocks)
//! - `alignment`: the owning container with read/parse/write entry
//!   points, structural comparison and column-subset projection
//! - `error`: the shared error taxonomy
//!
//! ## Format
//!
//! A header with the species count and site count, a block of
//! `name bases` lines, and optionally further bases-only blocks each
//! preceded by a blank line:
//!
//! ```text
//! 2 8
//! Mouse ACGT
//! Rat   TGCA
//!
//! GGGG
//! CCCC
//! ```
//!
//! End of file is the normal terminator. Any validation failure aborts
//! the whole parse; no partial alignment is ever produced.

pub mod alignment;
pub mod alphabet;
pub mod error;
pub mod parser;

pub use alignment::{Alignment, Mismatch};
pub use alphabet::Alphabet;
pub use error::{AlignmentError, AlignmentResult};
