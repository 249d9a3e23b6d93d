//! Sequence ingestion: normalization and single-record FASTA extraction.
//!
//! Raw text reaches the engine from three places (typed input, sequence
//! files and NCBI responses). All of them go through here so that a
//! [`Sequence`] is normalized exactly once.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! ACGTAC
//! ```
//!
//! Only a single record is expected. When several headers are present the
//! bodies are concatenated in order without any separator.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::Sequence;

/// Record marker starting a FASTA header line.
pub const HEADER_MARKER: char = '>';

/// Demonstration DNA sequence for offline use.
pub const EXAMPLE_SEQUENCE: &str = concat!(
    "ATGCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCG",
    "ATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCG",
    "ATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCGATCG",
);

/// Errors that can occur while ingesting a sequence.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty sequence")]
    EmptySequence,
}

/// Result type for ingestion operations.
pub type InputResult<T> = Result<T, InputError>;

/// Normalizes raw text into a sequence.
///
/// Shorthand for [`Sequence::normalize`].
pub fn normalize(raw: &str) -> Sequence {
    Sequence::normalize(raw)
}

/// Extracts the sequence body from FASTA text.
///
/// Header lines (first character `>`) are dropped, the remaining lines are
/// joined in order and the result is normalized.
///
/// # Examples
///
/// ```
/// use seqlab::fasta::extract_fasta;
///
/// let seq = extract_fasta(">header\nATGC\nGATC\n");
/// assert_eq!(seq.as_str(), "ATGCGATC");
/// ```
pub fn extract_fasta(raw: &str) -> Sequence {
    let body: String = raw
        .lines()
        .filter(|line| !line.starts_with(HEADER_MARKER))
        .collect();
    Sequence::normalize(&body)
}

/// Returns true when the first non-blank line is a FASTA header.
pub fn looks_like_fasta(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.starts_with(HEADER_MARKER))
}

/// Turns file or pasted content into a sequence.
///
/// FASTA content has its headers removed, anything else is taken as plain
/// sequence text.
pub fn parse_sequence_text(content: &str) -> Sequence {
    if looks_like_fasta(content) {
        extract_fasta(content)
    } else {
        Sequence::normalize(content)
    }
}

/// Reads a sequence from a plain text or single-record FASTA file.
///
/// An empty result is reported as [`InputError::EmptySequence`].
pub fn read_sequence_file<P: AsRef<Path>>(path: P) -> InputResult<Sequence> {
    let content = fs::read_to_string(path)?;
    let sequence = parse_sequence_text(&content);
    if sequence.is_empty() {
        return Err(InputError::EmptySequence);
    }
    Ok(sequence)
}

/// Returns the demonstration sequence.
pub fn example_sequence() -> Sequence {
    Sequence::normalize(EXAMPLE_SEQUENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_single_record() {
        let seq = extract_fasta(">header\nATGC\nGATC\n");
        assert_eq!(seq.as_str(), "ATGCGATC");
    }

    #[test]
    fn test_extract_lowercase_and_spaces() {
        let seq = extract_fasta(">NM_000207.3 Homo sapiens insulin\natg c\r\nttg a\n");
        assert_eq!(seq.as_str(), "ATGCTTGA");
    }

    #[test]
    fn test_extract_multiple_records_concatenates() {
        let seq = extract_fasta(">seq1\nAAAA\n>seq2\nCCCC\n");
        assert_eq!(seq.as_str(), "AAAACCCC");
    }

    #[test]
    fn test_extract_header_only() {
        let seq = extract_fasta(">only a header\n");
        assert!(seq.is_empty());
    }

    #[test]
    fn test_indented_marker_is_not_a_header() {
        // Only a marker in the first column starts a header
        let seq = extract_fasta(">h\n >AC\n");
        assert_eq!(seq.as_str(), ">AC");
    }

    #[test]
    fn test_example_sequence() {
        let seq = example_sequence();
        assert_eq!(seq.len(), 169);
        assert!(seq.as_str().starts_with("ATGCGATC"));
    }

    #[test]
    fn test_looks_like_fasta() {
        assert!(looks_like_fasta("\n  \n>seq1\nACGT\n"));
        assert!(!looks_like_fasta("ACGT\n>seq1\n"));
        assert!(!looks_like_fasta(""));
    }

    #[test]
    fn test_parse_plain_text() {
        let seq = parse_sequence_text("acgt\nacgt\n");
        assert_eq!(seq.as_str(), "ACGTACGT");
    }

    #[test]
    fn test_read_fasta_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">seq1 test\nacgt\nTTAA\n").unwrap();

        let seq = read_sequence_file(file.path()).unwrap();
        assert_eq!(seq.as_str(), "ACGTTTAA");
    }

    #[test]
    fn test_read_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = read_sequence_file(file.path());
        assert!(matches!(result, Err(InputError::EmptySequence)));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_sequence_file(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(InputError::Io(_))));
    }
}
