//! phyalign - Relaxed PHYLIP Alignment Toolkit
//!
//! Parse, validate, project and rewrite PHYLIP alignment files.
//!
//! ## Usage
//!
//! ```bash
//! phyalign alignment.phy                       # parse and summarize
//! phyalign -a dna alignment.phy                # validate against the nucleotide alphabet
//! phyalign alignment.phy -o out.phy            # rewrite in sequential PHYLIP
//! phyalign alignment.phy -c 1,3,7-10 -o -      # project columns, write to stdout
//! phyalign alignment.phy --same-as other.phy   # structural comparison
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use phyalign::{Alignment, Alphabet};

/// Validation alphabet specification for the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlphabetArg {
    /// Nucleotide bases plus ambiguity codes and gap markers
    Dna,
    /// Amino-acid residues plus ambiguity codes and gap markers
    Protein,
    /// No symbol validation
    None,
}

impl From<AlphabetArg> for Option<Alphabet> {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Dna => Some(Alphabet::Nucleotide),
            AlphabetArg::Protein => Some(Alphabet::AminoAcid),
            AlphabetArg::None => None,
        }
    }
}

/// phyalign - parse, validate, project and rewrite PHYLIP alignments
///
/// Without -o/--output, parses the file and prints a one-line summary.
/// With -o/--output, writes the (optionally column-projected) alignment
/// back out in sequential PHYLIP format (use "-" for stdout).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment file to read (relaxed PHYLIP, sequential or interleaved)
    file: PathBuf,

    /// Validation alphabet applied while parsing
    #[arg(short = 'a', long = "alphabet", value_enum, default_value = "none")]
    alphabet: AlphabetArg,

    /// Output file (use "-" for stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Columns to keep, 1-based, comma-separated with ranges (e.g. "1,3,7-10")
    #[arg(short = 'c', long = "columns")]
    columns: Option<String>,

    /// Compare against another alignment file instead of writing output
    #[arg(long = "same-as", value_name = "FILE")]
    same_as: Option<PathBuf>,
}

/// Parses a 1-based column list like "1,3,7-10" into 0-based indices.
fn parse_columns(spec: &str) -> Result<Vec<usize>> {
    let mut columns = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            anyhow::bail!("Empty entry in column list '{}'", spec);
        }
        let (first, last) = match part.split_once('-') {
            Some((a, b)) => (
                a.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid column '{part}'"))?,
                b.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid column '{part}'"))?,
            ),
            None => {
                let col = part
                    .parse::<usize>()
                    .with_context(|| format!("Invalid column '{part}'"))?;
                (col, col)
            }
        };
        if first == 0 || last == 0 {
            anyhow::bail!("Columns are 1-based, got 0 in '{part}'");
        }
        if first > last {
            anyhow::bail!("Descending range '{part}'");
        }
        columns.extend((first - 1)..last);
    }
    Ok(columns)
}

fn run(args: &Args) -> Result<bool> {
    let alphabet: Option<Alphabet> = args.alphabet.into();
    let alignment = Alignment::read(&args.file, alphabet)
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;

    if let Some(other_path) = &args.same_as {
        let other = Alignment::read(other_path, alphabet)
            .with_context(|| format!("Failed to read '{}'", other_path.display()))?;
        return match alignment.same_as(&other) {
            Ok(()) => {
                eprintln!("Alignments are identical: {alignment}");
                Ok(true)
            }
            Err(mismatch) => {
                eprintln!("{mismatch}");
                Ok(false)
            }
        };
    }

    let output_alignment = match &args.columns {
        Some(spec) => {
            let columns = parse_columns(spec)?;
            alignment.subset(&columns)?
        }
        None => alignment,
    };

    match &args.output {
        Some(output) if output == "-" => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output_alignment.write_phylip(&mut handle)?;
            handle.flush()?;
        }
        Some(output) => {
            output_alignment.write(output)?;
            eprintln!("Wrote {output_alignment} to {output}");
        }
        None => {
            eprintln!("{output_alignment}");
        }
    }

    Ok(true)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let ok = run(&args)?;
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_columns_single_and_ranges() {
        assert_eq!(parse_columns("1,3,7-10").unwrap(), vec![0, 2, 6, 7, 8, 9]);
        assert_eq!(parse_columns("5").unwrap(), vec![4]);
        assert_eq!(parse_columns("2-2").unwrap(), vec![1]);
    }

    #[test]
    fn test_parse_columns_preserves_order_and_duplicates() {
        assert_eq!(parse_columns("9,1,1").unwrap(), vec![8, 0, 0]);
    }

    #[test]
    fn test_parse_columns_rejects_zero() {
        assert!(parse_columns("0").is_err());
        assert!(parse_columns("0-3").is_err());
    }

    #[test]
    fn test_parse_columns_rejects_garbage() {
        assert!(parse_columns("a").is_err());
        assert!(parse_columns("1,,3").is_err());
        assert!(parse_columns("5-2").is_err());
    }
}
