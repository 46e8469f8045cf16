//! Relaxed PHYLIP parser.
//!
//! ## Format
//!
//! The first non-blank line holds the species count and the sequence
//! length:
//! ```text
//!  3 20
//! ```
//!
//! It is followed by one sequential block pairing each species name
//! with its first bases:
//! ```text
//! Seq1 ACGTACGTAC
//! Seq2 TGCATGCATG
//! Seq3 AAAACCCCGG
//! ```
//!
//! and then zero or more interleaved blocks of bases only, each
//! separated from the previous block by a blank line:
//! ```text
//!
//! GTGTGTGTGT
//! CACACACACA
//! TTTTTTTTTT
//! ```
//!
//! End of input is the normal terminator: the parse finishes when an
//! interleave attempt finds no further data.
//!
//! ## Relaxed parsing
//!
//! Name length is unrestricted and any whitespace separates the name
//! from the bases. Within a block, however, every line must carry the
//! same number of bases as the block's first line, and a block may
//! never fill columns past the declared sequence length.

use std::io::BufRead;

use crate::alignment::Alignment;
use crate::alphabet::{encode_bases, Alphabet};
use crate::error::{AlignmentError, AlignmentResult};

/// One-shot parser over a line-buffered stream.
///
/// Owns all transient working state of a single parse: the current
/// line number, the length fixed by the current block's first line,
/// and the `start_base..end_base` column window the block fills.
/// `parse` consumes the parser; a failed parse leaves nothing behind.
pub struct AlignmentParser<R> {
    reader: R,
    alphabet: Option<Alphabet>,
    line: usize,
    block_len: Option<usize>,
    start_base: usize,
    end_base: usize,
    species: Vec<String>,
    species_count: usize,
    sequence_length: usize,
    data: Vec<u8>,
}

impl<R: BufRead> AlignmentParser<R> {
    pub fn new(reader: R, alphabet: Option<Alphabet>) -> Self {
        Self {
            reader,
            alphabet,
            line: 0,
            block_len: None,
            start_base: 0,
            end_base: 0,
            species: Vec::new(),
            species_count: 0,
            sequence_length: 0,
            data: Vec::new(),
        }
    }

    /// Runs the whole state machine: header, sequential block, then
    /// interleaved blocks until the input runs out.
    pub fn parse(mut self) -> AlignmentResult<Alignment> {
        self.parse_header()?;

        // We now know how big the alignment is.
        self.data = vec![0u8; self.species_count * self.sequence_length];

        self.parse_species_block()?;
        while self.parse_interleave_block()? {}

        Ok(Alignment::from_parts(
            self.species,
            self.sequence_length,
            self.data,
        ))
    }

    /// Reads the next line, `None` at end of input.
    fn next_line(&mut self) -> AlignmentResult<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(buf))
    }

    /// Finds the `species sites` header, skipping leading blank lines.
    fn parse_header(&mut self) -> AlignmentResult<()> {
        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => return Err(AlignmentError::MissingHeader),
            };

            if line.trim().is_empty() {
                continue;
            }

            let bits: Vec<&str> = line.split_whitespace().collect();
            let counts = match bits[..] {
                [s, c] => s.parse::<usize>().ok().zip(c.parse::<usize>().ok()),
                _ => None,
            };

            match counts {
                Some((species_count, sequence_length)) => {
                    self.species_count = species_count;
                    self.sequence_length = sequence_length;
                    return Ok(());
                }
                None => {
                    return Err(AlignmentError::MalformedHeader {
                        line: self.line,
                        found: line.trim().to_string(),
                    })
                }
            }
        }
    }

    /// Checks one data line's base count against the current block.
    ///
    /// The first line of a block fixes `block_len` and the column
    /// window; every later line must match it exactly.
    fn check_block(&mut self, cur_len: usize) -> AlignmentResult<()> {
        match self.block_len {
            None => {
                self.block_len = Some(cur_len);
                self.end_base = self.start_base + cur_len;
                if self.end_base > self.sequence_length {
                    return Err(AlignmentError::BlockTooLong {
                        line: self.line,
                        end: self.end_base,
                        declared: self.sequence_length,
                    });
                }
            }
            Some(block_len) => {
                if cur_len != block_len {
                    return Err(AlignmentError::InconsistentBlockLength {
                        line: self.line,
                        expected: block_len,
                        found: cur_len,
                    });
                }
            }
        }
        Ok(())
    }

    /// Copies one encoded line into the current column window of a row.
    fn write_row(&mut self, row: usize, codes: &[u8]) {
        let offset = row * self.sequence_length;
        self.data[offset + self.start_base..offset + self.end_base].copy_from_slice(codes);
    }

    /// Parses the first block: `species_count` lines of `name bases`.
    fn parse_species_block(&mut self) -> AlignmentResult<()> {
        self.block_len = None;

        let mut cur_species = 0;
        while cur_species < self.species_count {
            let line = match self.next_line()? {
                Some(line) => line,
                None => return Err(AlignmentError::UnexpectedEof { line: self.line }),
            };

            let bits: Vec<&str> = line.split_whitespace().collect();
            if bits.is_empty() {
                // Skip blank lines
                continue;
            }

            // Should be two pieces: species name and bases
            let [name, bases] = bits[..] else {
                return Err(AlignmentError::MalformedLine { line: self.line });
            };

            self.check_block(bases.len())?;
            self.species.push(name.to_string());

            let codes = encode_bases(bases, self.alphabet, self.line)?;
            self.write_row(cur_species, &codes);

            cur_species += 1;
        }

        if let Some(block_len) = self.block_len {
            self.start_base += block_len;
        }
        Ok(())
    }

    /// Parses one interleaved block of bases-only lines.
    ///
    /// Returns `false` when a clean end of input is found before any
    /// data, which terminates the alignment; `true` when a full block
    /// was read and the caller should try for another.
    fn parse_interleave_block(&mut self) -> AlignmentResult<bool> {
        if self.species_count == 0 {
            return Ok(false);
        }

        self.block_len = None;
        let mut species_num = 0;
        let mut blank_lines = 0;

        while species_num < self.species_count {
            let line = match self.next_line()? {
                // End of input is only legal before the block starts
                Some(line) => line,
                None if species_num == 0 => return Ok(false),
                None => return Err(AlignmentError::UnexpectedEof { line: self.line }),
            };

            let bases = line.trim();
            if bases.is_empty() {
                if species_num != 0 {
                    return Err(AlignmentError::UnexpectedBlankLine { line: self.line });
                }
                blank_lines += 1;
                continue;
            }

            // The block must be separated from the previous one
            if blank_lines == 0 {
                return Err(AlignmentError::MissingBlankSeparator { line: self.line });
            }

            self.check_block(bases.len())?;

            let codes = encode_bases(bases, self.alphabet, self.line)?;
            self.write_row(species_num, &codes);

            species_num += 1;
        }

        if let Some(block_len) = self.block_len {
            self.start_base += block_len;
        }
        Ok(true)
    }
}
