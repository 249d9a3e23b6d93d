//! Data model for the sequence analyzer.
//!
//! This module contains the data structures shared by the engine and its
//! front ends:
//! - Normalized sequences and their classified kind
//! - Base composition counts
//! - Read-only analysis reports
//! - The session state held by the interactive shell
//!
//! The engine functions in [`crate::analysis`] never own any state; the
//! "current sequence" lives in a [`Session`] owned by the caller.

use std::collections::BTreeMap;
use std::fmt;

/// Number of symbols shown in the head/tail previews of a report.
pub const PREVIEW_LEN: usize = 20;

/// A normalized nucleotide sequence.
///
/// The symbol string is always upper-case and contains no whitespace.
/// The only way to build one is through normalization, so downstream code
/// never has to check this again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Sequence {
    data: String,
}

impl Sequence {
    /// Normalizes raw text into a sequence.
    ///
    /// Every whitespace character is removed and the rest is upper-cased.
    /// No alphabet check is done here, any symbol survives.
    pub fn normalize(raw: &str) -> Self {
        let data = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        Self { data }
    }

    /// Builds a sequence from symbols produced by an engine operation.
    ///
    /// Callers only pass symbols taken from an existing `Sequence`, so the
    /// normalization invariant already holds.
    pub(crate) fn from_normalized(data: String) -> Self {
        Self { data }
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the sequence has no symbols.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the symbols as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Iterates over the symbols.
    pub fn symbols(&self) -> std::str::Chars<'_> {
        self.data.chars()
    }

    /// Returns the first `n` symbols.
    pub fn head(&self, n: usize) -> &str {
        match self.data.char_indices().nth(n) {
            Some((end, _)) => &self.data[..end],
            None => &self.data,
        }
    }

    /// Returns the last `n` symbols.
    pub fn tail(&self, n: usize) -> &str {
        let len = self.len();
        if n >= len {
            return &self.data;
        }
        match self.data.char_indices().nth(len - n) {
            Some((start, _)) => &self.data[start..],
            None => "",
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// Classification of a sequence by alphabet membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Only `A`, `T`, `C`, `G`
    Dna,
    /// Only `A`, `U`, `C`, `G`
    Rna,
    /// At least one symbol outside both alphabets
    Unrecognized,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Dna => write!(f, "DNA"),
            SequenceKind::Rna => write!(f, "RNA"),
            SequenceKind::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

/// Occurrence count per symbol.
///
/// Only symbols present in the sequence have an entry. Iteration is in
/// symbol order, whatever the order symbols were encountered in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseCount {
    counts: BTreeMap<char, usize>,
}

impl BaseCount {
    /// Records one more occurrence of `symbol`.
    pub(crate) fn add(&mut self, symbol: char) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Returns the count for `symbol` (0 when absent).
    pub fn get(&self, symbol: char) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Iterates over `(symbol, count)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Number of distinct symbols.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no symbol was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the sequence length.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// A snapshot of everything shown in a sequence report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport<'a> {
    pub sequence: &'a Sequence,
    pub kind: SequenceKind,
    pub length: usize,
    pub base_counts: BaseCount,
    /// Only computed for DNA
    pub gc_content: Option<f64>,
    /// First [`PREVIEW_LEN`] symbols
    pub head: &'a str,
    /// Last [`PREVIEW_LEN`] symbols, omitted when the sequence is not longer
    /// than the preview
    pub tail: Option<&'a str>,
}

/// A sequence together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSequence {
    pub sequence: Sequence,
    pub kind: SequenceKind,
}

/// State kept by the interactive shell between menu actions.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<LoadedSequence>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current sequence, if one was loaded.
    pub fn current(&self) -> Option<&LoadedSequence> {
        self.current.as_ref()
    }

    /// Replaces the current sequence.
    pub fn load(&mut self, loaded: LoadedSequence) {
        self.current = Some(loaded);
    }

    /// Returns true if a sequence was loaded.
    pub fn has_sequence(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_whitespace_and_uppercases() {
        let seq = Sequence::normalize("  at gc\nga\r\ntc\t");
        assert_eq!(seq.as_str(), "ATGCGATC");
        assert_eq!(seq.len(), 8);
    }

    #[test]
    fn test_normalize_keeps_foreign_symbols() {
        let seq = Sequence::normalize("atx-n");
        assert_eq!(seq.as_str(), "ATX-N");
    }

    #[test]
    fn test_normalize_empty() {
        let seq = Sequence::normalize(" \n \n");
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn test_head_and_tail() {
        let seq = Sequence::normalize("ACGTACGTAC");
        assert_eq!(seq.head(4), "ACGT");
        assert_eq!(seq.tail(3), "TAC");
        assert_eq!(seq.head(50), "ACGTACGTAC");
        assert_eq!(seq.tail(50), "ACGTACGTAC");
        assert_eq!(seq.tail(0), "");
    }

    #[test]
    fn test_base_count_ordering() {
        let mut counts = BaseCount::default();
        for c in "TTGA".chars() {
            counts.add(c);
        }
        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(pairs, vec![('A', 1), ('G', 1), ('T', 2)]);
        assert_eq!(counts.get('C'), 0);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.distinct(), 3);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SequenceKind::Dna.to_string(), "DNA");
        assert_eq!(SequenceKind::Rna.to_string(), "RNA");
        assert_eq!(SequenceKind::Unrecognized.to_string(), "Unrecognized");
    }

    #[test]
    fn test_session_load_replaces() {
        let mut session = Session::new();
        assert!(!session.has_sequence());

        session.load(LoadedSequence {
            sequence: Sequence::normalize("ACGT"),
            kind: SequenceKind::Dna,
        });
        session.load(LoadedSequence {
            sequence: Sequence::normalize("ACGU"),
            kind: SequenceKind::Rna,
        });

        let current = session.current().unwrap();
        assert_eq!(current.sequence.as_str(), "ACGU");
        assert_eq!(current.kind, SequenceKind::Rna);
    }
}
