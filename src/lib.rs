//! # seqlab - DNA/RNA sequence analyzer
//!
//! Classifies nucleotide sequences and reports their composition, with a
//! few simple transformations.
//!
//! ## Architecture
//!
//! Raw text flows through a small, stateless engine:
//! - `fasta`: normalization and single-record FASTA extraction
//! - `analysis`: DNA/RNA classification, counts, GC content, transcription,
//!   reverse complement and motif search
//! - `retrieve`: fetching FASTA text from NCBI by accession id
//! - `report`: text rendering of results
//! - `output`: saving results as plain text
//! - `model`: sequences, reports and the shell session
//! - `shell`: the interactive menu that owns the current sequence

pub mod analysis;
pub mod fasta;
pub mod model;
pub mod output;
pub mod report;
pub mod retrieve;
pub mod shell;
