//! Alignment container.
//!
//! An [`Alignment`] owns the ordered species name list and a row-major
//! matrix of one byte per site. It is populated exactly once by a
//! parse and immutable afterwards; there is no re-parse-into-self
//! operation. Downstream analysis only ever reads from it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

use crate::alphabet::Alphabet;
use crate::error::{AlignmentError, AlignmentResult};
use crate::parser::AlignmentParser;

/// Longest species name kept when writing; the rest is truncated.
const MAX_NAME_LEN: usize = 99;

/// A parsed multiple-sequence alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Species names in file order, duplicates kept.
    species: Vec<String>,
    /// Number of sites (columns).
    sequence_length: usize,
    /// Row-major matrix, one byte code per site,
    /// shape `(species.len(), sequence_length)`.
    data: Vec<u8>,
}

/// Why two alignments are not the same. Produced by [`Alignment::same_as`];
/// a comparison outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("Alignments not the same, length differs: {ours} vs {theirs}")]
    SequenceLength { ours: usize, theirs: usize },

    #[error("Alignments not the same: this alignment has {ours} species, the other has {theirs}")]
    SpeciesCount { ours: usize, theirs: usize },

    #[error("Alignments not the same: sequence differs at species {row}, site {col}")]
    Data { row: usize, col: usize },
}

impl Alignment {
    pub(crate) fn from_parts(species: Vec<String>, sequence_length: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(species.len() * sequence_length, data.len());
        Self {
            species,
            sequence_length,
            data,
        }
    }

    /// Reads and parses an alignment file.
    ///
    /// Fails with [`AlignmentError::FileNotFound`] when the path does
    /// not exist; every parser error propagates unchanged.
    pub fn read<P: AsRef<Path>>(path: P, alphabet: Option<Alphabet>) -> AlignmentResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AlignmentError::FileNotFound(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        AlignmentParser::new(reader, alphabet).parse()
    }

    /// Parses an alignment from an in-memory string using the same
    /// stream-based algorithm as [`Alignment::read`].
    pub fn parse(text: &str, alphabet: Option<Alphabet>) -> AlignmentResult<Self> {
        AlignmentParser::new(Cursor::new(text), alphabet).parse()
    }

    /// Species names in file order.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Number of sites.
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// One species' encoded sites.
    ///
    /// # Panics
    ///
    /// Panics if `row >= species_count()`.
    pub fn row(&self, row: usize) -> &[u8] {
        &self.data[row * self.sequence_length..(row + 1) * self.sequence_length]
    }

    /// Structural comparison against another alignment.
    ///
    /// Used to verify that a resumed analysis still operates on the
    /// alignment a previous run saw. A mismatch is reported as a
    /// descriptive [`Mismatch`], never as an error.
    pub fn same_as(&self, other: &Alignment) -> Result<(), Mismatch> {
        if self.sequence_length != other.sequence_length {
            return Err(Mismatch::SequenceLength {
                ours: self.sequence_length,
                theirs: other.sequence_length,
            });
        }

        if self.species_count() != other.species_count() {
            return Err(Mismatch::SpeciesCount {
                ours: self.species_count(),
                theirs: other.species_count(),
            });
        }

        if let Some(pos) = self
            .data
            .iter()
            .zip(&other.data)
            .position(|(a, b)| a != b)
        {
            return Err(Mismatch::Data {
                row: pos / self.sequence_length,
                col: pos % self.sequence_length,
            });
        }

        Ok(())
    }

    /// Writes the alignment to a file in PHYLIP format.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> AlignmentResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_phylip(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serializes as PHYLIP: the `species sites` header, then one line
    /// per species with the name (at most 99 chars), a 4-space pad and
    /// the raw symbol bytes.
    pub fn write_phylip<W: Write>(&self, writer: &mut W) -> AlignmentResult<()> {
        writeln!(writer, "{} {}", self.species_count(), self.sequence_length)?;
        for (row, name) in self.species.iter().enumerate() {
            let shortened = truncate_name(name);
            writer.write_all(shortened.as_bytes())?;
            writer.write_all(b"    ")?;
            writer.write_all(self.row(row))?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Projects a column subset into a new alignment.
    ///
    /// `columns` holds 0-based site indices; their order is preserved
    /// and duplicates are allowed. The species list carries over
    /// unchanged.
    pub fn subset(&self, columns: &[usize]) -> AlignmentResult<Self> {
        if let Some(&index) = columns.iter().find(|&&c| c >= self.sequence_length) {
            return Err(AlignmentError::ColumnOutOfRange {
                index,
                length: self.sequence_length,
            });
        }

        let mut data = Vec::with_capacity(self.species_count() * columns.len());
        for row in 0..self.species_count() {
            let source = self.row(row);
            data.extend(columns.iter().map(|&c| source[c]));
        }

        Ok(Self {
            species: self.species.clone(),
            sequence_length: columns.len(),
            data,
        })
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Alignment({} species, {} bases)",
            self.species_count(),
            self.sequence_length
        )
    }
}

fn truncate_name(name: &str) -> &str {
    if name.len() > MAX_NAME_LEN {
        // Names are single whitespace-free tokens, so byte slicing is
        // safe for ASCII; fall back to a char boundary otherwise.
        let mut end = MAX_NAME_LEN;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        &name[..end]
    } else {
        name
    }
}
