//! Symbol validation and encoding.
//!
//! Each base or residue becomes one byte in the alignment matrix: its
//! uppercased ASCII value. Keeping the raw character code (rather than
//! a dense enum) makes serialization a byte-for-byte round trip.
//!
//! The two symbol sets follow the PhyML definitions: bases or residues
//! plus ambiguity codes and the gap/unknown markers `.`, `-`, `?`, `X`.

use crate::error::{AlignmentError, AlignmentResult};

/// Nucleotide symbols accepted during validation.
pub const NUCLEOTIDE_SYMBOLS: &[u8] = b"AGCTUMRWSYKBDHVNX.-?";

/// Amino-acid symbols accepted during validation.
pub const AMINO_ACID_SYMBOLS: &[u8] = b"ARNBDCQZEGHILKMFPSTWYVX.-?";

/// The set of symbols enforced while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    Nucleotide,
    AminoAcid,
}

impl Alphabet {
    /// Returns the accepted symbols, all uppercase.
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Nucleotide => NUCLEOTIDE_SYMBOLS,
            Alphabet::AminoAcid => AMINO_ACID_SYMBOLS,
        }
    }

    /// Checks whether an (already uppercased) symbol belongs to the set.
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols().contains(&symbol)
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alphabet::Nucleotide => write!(f, "nucleotide"),
            Alphabet::AminoAcid => write!(f, "amino acid"),
        }
    }
}

/// Uppercases and encodes one line fragment of bases.
///
/// With an alphabet configured, every symbol must belong to it; all
/// offending symbols are collected into a single [`AlignmentError::InvalidSymbols`]
/// naming them. Without an alphabet the fragment is accepted as-is.
///
/// `line` is the input line number, used only for error reporting.
pub fn encode_bases(
    bases: &str,
    alphabet: Option<Alphabet>,
    line: usize,
) -> AlignmentResult<Vec<u8>> {
    let codes: Vec<u8> = bases.bytes().map(|b| b.to_ascii_uppercase()).collect();

    if let Some(alphabet) = alphabet {
        let invalid: Vec<u8> = codes
            .iter()
            .copied()
            .filter(|&b| !alphabet.contains(b))
            .collect();
        if !invalid.is_empty() {
            return Err(AlignmentError::InvalidSymbols {
                line,
                symbols: String::from_utf8_lossy(&invalid).into_owned(),
            });
        }
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uppercases() {
        let codes = encode_bases("acgt", None, 1).unwrap();
        assert_eq!(codes, b"ACGT");
    }

    #[test]
    fn test_encode_without_alphabet_accepts_anything() {
        let codes = encode_bases("zj*!", None, 1).unwrap();
        assert_eq!(codes, b"ZJ*!");
    }

    #[test]
    fn test_nucleotide_accepts_ambiguity_and_gaps() {
        let codes = encode_bases("acgtumrwsykbdhvnx.-?", Some(Alphabet::Nucleotide), 1).unwrap();
        assert_eq!(codes.len(), 20);
    }

    #[test]
    fn test_nucleotide_rejects_invalid_symbol() {
        let err = encode_bases("ACZT", Some(Alphabet::Nucleotide), 7).unwrap_err();
        match err {
            AlignmentError::InvalidSymbols { line, symbols } => {
                assert_eq!(line, 7);
                assert_eq!(symbols, "Z");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_all_invalid_symbols_reported() {
        let err = encode_bases("AjCoT", Some(Alphabet::Nucleotide), 1).unwrap_err();
        match err {
            AlignmentError::InvalidSymbols { symbols, .. } => assert_eq!(symbols, "JO"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_amino_acid_accepts_residues() {
        let codes = encode_bases("ARNDCQEGHILKMFPSTWYV", Some(Alphabet::AminoAcid), 1).unwrap();
        assert_eq!(codes, b"ARNDCQEGHILKMFPSTWYV");
    }

    #[test]
    fn test_amino_acid_rejects_nucleotide_only_symbol() {
        // U is a base, not a residue
        let err = encode_bases("ARU", Some(Alphabet::AminoAcid), 3).unwrap_err();
        match err {
            AlignmentError::InvalidSymbols { symbols, .. } => assert_eq!(symbols, "U"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
