//! Error types shared by the alignment parser and container.
//!
//! Every parse failure is fatal to the parse that produced it: callers
//! must treat any error as "no alignment produced". Errors carry the
//! line number and the expected/actual values needed for direct user
//! diagnosis. The library never logs; converting these values into
//! terminal output is the caller's job.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, parsing or projecting an alignment.
#[derive(Error, Debug)]
pub enum AlignmentError {
    #[error("Cannot find alignment file '{0}'")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reached end of input without finding the 'species sites' header")]
    MissingHeader,

    #[error("Line {line}: expected a header with species count and sequence length, got '{found}'")]
    MalformedHeader { line: usize, found: String },

    #[error("Line {line}: block fills columns up to {end} but the header declares {declared} sites")]
    BlockTooLong {
        line: usize,
        end: usize,
        declared: usize,
    },

    #[error("Line {line}: {found} bases differ from the {expected} found on previous line(s) of the block")]
    InconsistentBlockLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: expected a species name and bases separated by whitespace")]
    MalformedLine { line: usize },

    #[error("Line {line}: invalid bases '{symbols}' found")]
    InvalidSymbols { line: usize, symbols: String },

    #[error("Line {line}: expected a blank line between interleaved blocks")]
    MissingBlankSeparator { line: usize },

    #[error("Line {line}: found blank line inside an interleaved block")]
    UnexpectedBlankLine { line: usize },

    #[error("Line {line}: input ended before all species of the block were read")]
    UnexpectedEof { line: usize },

    #[error("Column {index} requested but the alignment only has {length} sites")]
    ColumnOutOfRange { index: usize, length: usize },
}

/// Result type for alignment operations.
pub type AlignmentResult<T> = Result<T, AlignmentError>;
