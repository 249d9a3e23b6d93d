//! Sequence retrieval from the NCBI nucleotide database.
//!
//! The engine only needs a raw FASTA text blob for an accession id. The
//! [`Retriever`] trait is that contract; [`EntrezRetriever`] fulfils it
//! with a single blocking `efetch` request bounded by a timeout. No retry
//! is attempted: a failure is returned to the caller, which keeps whatever
//! sequence it already had.

use std::time::Duration;

use thiserror::Error;

use crate::fasta::extract_fasta;
use crate::model::Sequence;

/// NCBI E-utilities fetch endpoint.
pub const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Default bound on a single retrieval.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while retrieving a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Empty accession id")]
    EmptyAccession,

    #[error("Request timed out after {0} s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Server answered with HTTP status {0}")]
    Status(u16),

    #[error("Sequence not found or empty")]
    EmptyResult,
}

impl RetrievalError {
    /// Guidance shown to the user next to the error.
    pub fn hint(&self) -> &'static str {
        match self {
            RetrievalError::EmptyAccession => "Type an accession id such as NM_000207.3.",
            _ => "Check your internet connection and the accession id.",
        }
    }
}

/// Result type for retrieval operations.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Source of raw FASTA text for an accession id.
pub trait Retriever {
    /// Fetches the FASTA body for `accession`.
    fn fetch_fasta(&self, accession: &str) -> RetrievalResult<String>;
}

/// Settings for the remote retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// efetch endpoint URL
    pub endpoint: String,
    /// Hard bound on one request
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: EFETCH_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking HTTP retriever for the NCBI `efetch` service.
#[derive(Debug, Clone)]
pub struct EntrezRetriever {
    config: FetchConfig,
    client: reqwest::blocking::Client,
}

impl EntrezRetriever {
    /// Creates a retriever with its own HTTP client.
    pub fn new(config: FetchConfig) -> RetrievalResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RetrievalError::Transport(format!("could not build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Returns the settings in use.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn classify_error(&self, error: reqwest::Error) -> RetrievalError {
        if error.is_timeout() {
            RetrievalError::Timeout(self.config.timeout.as_secs())
        } else {
            RetrievalError::Transport(error.to_string())
        }
    }
}

impl Retriever for EntrezRetriever {
    fn fetch_fasta(&self, accession: &str) -> RetrievalResult<String> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("db", "nucleotide"),
                ("id", accession),
                ("rettype", "fasta"),
                ("retmode", "text"),
            ])
            .send()
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status(status.as_u16()));
        }
        response.text().map_err(|e| self.classify_error(e))
    }
}

/// Fetches and normalizes the sequence for an accession id.
///
/// The id is trimmed first; an empty id never reaches the retriever. An
/// answer whose extracted body is empty is reported as
/// [`RetrievalError::EmptyResult`].
pub fn fetch_sequence<R: Retriever + ?Sized>(
    retriever: &R,
    accession: &str,
) -> RetrievalResult<Sequence> {
    let accession = accession.trim();
    if accession.is_empty() {
        return Err(RetrievalError::EmptyAccession);
    }

    let body = retriever.fetch_fasta(accession)?;
    let sequence = extract_fasta(&body);
    if sequence.is_empty() {
        return Err(RetrievalError::EmptyResult);
    }
    Ok(sequence)
}
