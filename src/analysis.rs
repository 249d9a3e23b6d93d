//! Classification and composition analysis of nucleotide sequences.
//!
//! This module provides:
//! - DNA / RNA / unrecognized classification
//! - Base counts and GC content
//! - Transcription (T to U) and reverse complement
//! - Overlapping motif search
//!
//! Every function is pure: it reads a [`Sequence`] and returns a new value.

use thiserror::Error;

use crate::model::{
    AnalysisReport, BaseCount, LoadedSequence, Sequence, SequenceKind, PREVIEW_LEN,
};

/// DNA alphabet.
pub const DNA_BASES: [char; 4] = ['A', 'T', 'C', 'G'];

/// RNA alphabet.
pub const RNA_BASES: [char; 4] = ['A', 'U', 'C', 'G'];

/// Errors raised when an operation is invoked on the wrong input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("No sequence loaded. Load one first (typed, fetched, from a file or the example)")]
    NoSequence,

    #[error("Transcription needs a DNA sequence (current sequence is {0})")]
    NotDna(SequenceKind),
}

fn all_in(seq: &Sequence, alphabet: &[char]) -> bool {
    seq.symbols().all(|c| alphabet.contains(&c))
}

/// Classifies a sequence.
///
/// The DNA check runs first, so the empty sequence and sequences made only
/// of `A`, `C` and `G` are DNA.
pub fn classify(seq: &Sequence) -> SequenceKind {
    if all_in(seq, &DNA_BASES) {
        SequenceKind::Dna
    } else if all_in(seq, &RNA_BASES) {
        SequenceKind::Rna
    } else {
        SequenceKind::Unrecognized
    }
}

/// Classifies a sequence and pairs it with its kind.
pub fn load(sequence: Sequence) -> LoadedSequence {
    let kind = classify(&sequence);
    LoadedSequence { sequence, kind }
}

/// Number of symbols in the sequence.
pub fn length(seq: &Sequence) -> usize {
    seq.len()
}

/// Counts every symbol in one pass.
pub fn base_counts(seq: &Sequence) -> BaseCount {
    let mut counts = BaseCount::default();
    for symbol in seq.symbols() {
        counts.add(symbol);
    }
    counts
}

/// Rounds to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `G` and `C` symbols, rounded to 2 decimals.
///
/// Returns `0.0` for the empty sequence.
pub fn gc_content(seq: &Sequence) -> f64 {
    let total = seq.len();
    if total == 0 {
        return 0.0;
    }
    let gc = seq.symbols().filter(|&c| c == 'G' || c == 'C').count();
    round2(gc as f64 / total as f64 * 100.0)
}

/// Replaces every `T` with `U`.
///
/// Total on any input: other symbols are copied unchanged. Use
/// [`transcribe_checked`] to refuse non-DNA input.
pub fn transcribe(seq: &Sequence) -> Sequence {
    let rna = seq
        .symbols()
        .map(|c| if c == 'T' { 'U' } else { c })
        .collect();
    Sequence::from_normalized(rna)
}

/// Transcribes a loaded sequence, refusing anything that is not DNA.
pub fn transcribe_checked(loaded: Option<&LoadedSequence>) -> Result<Sequence, PreconditionError> {
    let loaded = loaded.ok_or(PreconditionError::NoSequence)?;
    if loaded.kind != SequenceKind::Dna {
        return Err(PreconditionError::NotDna(loaded.kind));
    }
    Ok(transcribe(&loaded.sequence))
}

fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        _ => None,
    }
}

/// Complements `A`/`T` and `C`/`G` and reverses the order.
///
/// Symbols outside `ATCG` have no complement and are silently dropped, so
/// RNA input loses every `U`.
pub fn reverse_complement(seq: &Sequence) -> Sequence {
    let rc = seq.symbols().rev().filter_map(complement).collect();
    Sequence::from_normalized(rc)
}

/// Finds every start position (1-based) of `motif` in `seq`.
///
/// Both are compared upper-cased and matches may overlap. An empty motif
/// or one longer than the sequence gives no positions.
///
/// # Examples
///
/// ```
/// use seqlab::analysis::find_motif;
/// use seqlab::model::Sequence;
///
/// let seq = Sequence::normalize("GATCGATC");
/// assert_eq!(find_motif(&seq, "atc"), vec![2, 6]);
/// ```
pub fn find_motif(seq: &Sequence, motif: &str) -> Vec<usize> {
    let motif: Vec<char> = motif.to_uppercase().chars().collect();
    let haystack: Vec<char> = seq.as_str().to_uppercase().chars().collect();
    if motif.is_empty() || motif.len() > haystack.len() {
        return Vec::new();
    }

    haystack
        .windows(motif.len())
        .enumerate()
        .filter(|(_, window)| *window == motif.as_slice())
        .map(|(i, _)| i + 1)
        .collect()
}

/// Assembles the report shown after loading a sequence.
pub fn build_report(seq: &Sequence, kind: SequenceKind) -> AnalysisReport<'_> {
    let length = length(seq);
    AnalysisReport {
        sequence: seq,
        kind,
        length,
        base_counts: base_counts(seq),
        gc_content: (kind == SequenceKind::Dna).then(|| gc_content(seq)),
        head: seq.head(PREVIEW_LEN),
        tail: (length > PREVIEW_LEN).then(|| seq.tail(PREVIEW_LEN)),
    }
}
