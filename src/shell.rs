//! Interactive menu shell.
//!
//! This module drives the engine from a numbered text menu:
//! - `1`: analyze a typed sequence
//! - `2`: fetch a sequence from NCBI by accession id
//! - `3`: transcribe the current DNA sequence to RNA
//! - `4`: reverse complement of the current sequence
//! - `5`: find a motif in the current sequence
//! - `6`: load a sequence from a file
//! - `7`: use the built-in example sequence
//! - `8`: exit
//!
//! Every action runs to completion before the next choice is read. Errors
//! are reported to the user and never end the loop; only end of input, an
//! explicit exit, or a failure of the shell's own streams does.

use std::io::{self, BufRead, Write};

use crate::analysis::{self, PreconditionError};
use crate::fasta::{example_sequence, read_sequence_file};
use crate::model::{Sequence, SequenceKind, Session};
use crate::output::save_text;
use crate::report::{preview, render_motif_hits, render_transcription};
use crate::retrieve::{fetch_sequence, Retriever};

/// Number of symbols shown when printing a reverse complement.
const RESULT_PREVIEW_LEN: usize = 50;

/// Menu entries the user can pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Analyze a typed sequence
    AnalyzeTyped,
    /// Fetch a sequence from NCBI
    FetchNcbi,
    /// Transcribe DNA to RNA
    Transcribe,
    /// Reverse complement
    ReverseComplement,
    /// Search a motif
    FindMotif,
    /// Load a sequence file
    LoadFile,
    /// Use the example sequence
    UseExample,
    /// Leave the shell
    Exit,
    /// Anything else
    Invalid(String),
}

impl MenuChoice {
    /// Maps a line typed at the menu prompt to a choice.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::AnalyzeTyped,
            "2" => MenuChoice::FetchNcbi,
            "3" => MenuChoice::Transcribe,
            "4" => MenuChoice::ReverseComplement,
            "5" => MenuChoice::FindMotif,
            "6" => MenuChoice::LoadFile,
            "7" => MenuChoice::UseExample,
            "8" | "q" | "quit" | "exit" => MenuChoice::Exit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

const MENU: &str = "\
Available options:
1. Analyze a typed sequence
2. Fetch a sequence from NCBI
3. Transcribe DNA to RNA
4. Reverse complement
5. Find a motif
6. Load a sequence file
7. Use the example sequence
8. Exit";

const ACCESSION_HELP: &str = "\
--- Fetch a sequence from NCBI ---

Accession id examples:
  - NM_000207.3  (mRNA, human insulin gene)
  - NC_000001.11 (human chromosome 1)
  - NC_000913.3  (E. coli complete genome)

Common prefixes:
  NM_ = messenger RNA
  NC_ = complete chromosome
  NG_ = gene or genomic region
  NR_ = non-coding RNA";

/// The interactive shell.
///
/// Generic over its input, output and retriever so it can be driven from a
/// terminal or from memory.
pub struct Shell<R, W, F> {
    input: R,
    output: W,
    retriever: F,
    session: Session,
}

impl<R: BufRead, W: Write, F: Retriever> Shell<R, W, F> {
    /// Creates a shell with an empty session.
    pub fn new(input: R, output: W, retriever: F) -> Self {
        Self {
            input,
            output,
            retriever,
            session: Session::new(),
        }
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs the menu loop until exit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let rule = "=".repeat(60);
            writeln!(self.output, "\n{rule}\nDNA/RNA SEQUENCE ANALYZER\n{rule}\n")?;
            writeln!(self.output, "{MENU}")?;

            let Some(line) = self.prompt("\nChoose an option (1-8): ")? else {
                break;
            };
            if !self.apply(MenuChoice::parse(&line))? {
                break;
            }
        }
        writeln!(self.output, "\nExiting...")?;
        self.output.flush()
    }

    /// Executes one menu choice. Returns false when the shell should stop.
    pub fn apply(&mut self, choice: MenuChoice) -> io::Result<bool> {
        match choice {
            MenuChoice::AnalyzeTyped => self.analyze_typed()?,
            MenuChoice::FetchNcbi => self.fetch_ncbi()?,
            MenuChoice::Transcribe => self.transcribe()?,
            MenuChoice::ReverseComplement => self.reverse_complement()?,
            MenuChoice::FindMotif => self.find_motif()?,
            MenuChoice::LoadFile => self.load_file()?,
            MenuChoice::UseExample => {
                writeln!(self.output, "\nUsing the example sequence.")?;
                self.ingest(example_sequence())?;
            }
            MenuChoice::Exit => return Ok(false),
            MenuChoice::Invalid(choice) => {
                writeln!(
                    self.output,
                    "\nWarning: invalid option '{choice}', choose a number from 1 to 8."
                )?;
            }
        }
        Ok(true)
    }

    /// Prints `message` and reads one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        read_answer(&mut self.input, &mut self.output, message)
    }

    /// Classifies a new sequence, reports on it and makes it current.
    fn ingest(&mut self, sequence: Sequence) -> io::Result<()> {
        let loaded = analysis::load(sequence);
        match loaded.kind {
            SequenceKind::Dna | SequenceKind::Rna => {
                writeln!(self.output, "\nValid {} sequence.\n", loaded.kind)?;
                let report = analysis::build_report(&loaded.sequence, loaded.kind);
                write!(self.output, "{report}")?;
            }
            SequenceKind::Unrecognized => {
                writeln!(
                    self.output,
                    "\nWarning: the sequence contains symbols outside the DNA and RNA alphabets.\n\
                     It is kept as {}.",
                    loaded.kind
                )?;
            }
        }
        self.session.load(loaded);
        Ok(())
    }

    fn analyze_typed(&mut self) -> io::Result<()> {
        let raw = self.prompt("\nType the sequence: ")?.unwrap_or_default();
        let sequence = Sequence::normalize(&raw);
        if sequence.is_empty() {
            writeln!(self.output, "\nError: empty sequence.")?;
            return Ok(());
        }
        self.ingest(sequence)
    }

    fn fetch_ncbi(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{ACCESSION_HELP}")?;
        let accession = self
            .prompt("\nType the NCBI accession id: ")?
            .unwrap_or_default();
        if !accession.is_empty() {
            writeln!(self.output, "\nFetching {accession} from NCBI...")?;
        }

        match fetch_sequence(&self.retriever, &accession) {
            Ok(sequence) => {
                writeln!(self.output, "Sequence found! ({} bases)", sequence.len())?;
                self.ingest(sequence)
            }
            Err(e) => {
                writeln!(self.output, "\nError: {e}")?;
                writeln!(self.output, "   {}", e.hint())
            }
        }
    }

    fn transcribe(&mut self) -> io::Result<()> {
        let Some(loaded) = self.session.current() else {
            writeln!(self.output, "\nWarning: {}", PreconditionError::NoSequence)?;
            return Ok(());
        };
        let rna = match analysis::transcribe_checked(Some(loaded)) {
            Ok(rna) => rna,
            Err(e) => {
                writeln!(self.output, "\nWarning: {e}")?;
                return Ok(());
            }
        };
        let text = render_transcription(&loaded.sequence, &rna);
        write!(self.output, "\n{text}")?;
        self.offer_save(rna.as_str())
    }

    fn reverse_complement(&mut self) -> io::Result<()> {
        let Some(loaded) = self.session.current() else {
            writeln!(self.output, "\nWarning: {}", PreconditionError::NoSequence)?;
            return Ok(());
        };
        let kind = loaded.kind;
        let rc = analysis::reverse_complement(&loaded.sequence);

        if kind != SequenceKind::Dna {
            writeln!(
                self.output,
                "\nWarning: current sequence is {kind}, symbols other than A, T, C, G are dropped."
            )?;
        }
        writeln!(self.output, "\n--- Reverse complement ---")?;
        writeln!(self.output, "{}", preview(&rc, RESULT_PREVIEW_LEN))?;
        self.offer_save(rc.as_str())
    }

    fn find_motif(&mut self) -> io::Result<()> {
        let Some(loaded) = self.session.current() else {
            writeln!(self.output, "\nWarning: {}", PreconditionError::NoSequence)?;
            return Ok(());
        };
        let motif = read_answer(&mut self.input, &mut self.output, "\nType the motif: ")?
            .unwrap_or_default();
        if motif.is_empty() {
            writeln!(self.output, "\nError: empty motif.")?;
            return Ok(());
        }

        let positions = analysis::find_motif(&loaded.sequence, &motif);
        write!(self.output, "\n{}", render_motif_hits(&motif, &positions))
    }

    fn load_file(&mut self) -> io::Result<()> {
        let path = self.prompt("\nSequence file: ")?.unwrap_or_default();
        if path.is_empty() {
            writeln!(self.output, "\nError: no file name given.")?;
            return Ok(());
        }
        match read_sequence_file(&path) {
            Ok(sequence) => {
                writeln!(self.output, "\nLoaded {} bases from {path}.", sequence.len())?;
                self.ingest(sequence)
            }
            Err(e) => writeln!(self.output, "\nError: {path}: {e}"),
        }
    }

    /// Asks whether to save `content` and writes it where the user says.
    fn offer_save(&mut self, content: &str) -> io::Result<()> {
        let answer = self
            .prompt("\nSave the result to a file? (y/n): ")?
            .unwrap_or_default()
            .to_lowercase();
        if answer != "y" && answer != "yes" {
            return Ok(());
        }

        let path = self.prompt("Output file name: ")?.unwrap_or_default();
        match save_text(&path, content) {
            Ok(()) => writeln!(self.output, "\nResult saved to: {path}"),
            Err(e) => writeln!(self.output, "\nError: {e}"),
        }
    }
}

/// Prints `message` on `output` and reads one trimmed line from `input`.
///
/// Returns `None` at end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
