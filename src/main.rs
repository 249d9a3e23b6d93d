//! seqlab - DNA/RNA sequence analyzer
//!
//! ## Usage
//!
//! ```bash
//! seqlab                                  # interactive menu
//! seqlab analyze ATGCGATC                 # report on a typed sequence
//! seqlab analyze -i seq.fasta             # report on a file
//! seqlab transcribe -a NM_000207.3 -o rna.txt
//! seqlab revcomp --example
//! seqlab motif GATC -i seq.fasta
//! seqlab fetch NC_000913.3 -o ecoli.txt
//! ```
//!
//! Every subcommand takes exactly one input: sequence text, `-i/--file`,
//! `-a/--accession` or `-e/--example`.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};

use seqlab::analysis::{self, transcribe_checked};
use seqlab::fasta::{example_sequence, read_sequence_file};
use seqlab::model::{LoadedSequence, Sequence, SequenceKind};
use seqlab::output::save_text;
use seqlab::report::render_motif_hits;
use seqlab::retrieve::{fetch_sequence, EntrezRetriever, FetchConfig, EFETCH_URL};
use seqlab::shell::Shell;

/// Where a subcommand reads its sequence from.
#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Sequence text (case and whitespace are ignored)
    sequence: Option<String>,

    /// Plain text or single-record FASTA file
    #[arg(short = 'i', long = "file")]
    file: Option<PathBuf>,

    /// NCBI nucleotide accession id (e.g. NM_000207.3)
    #[arg(short = 'a', long = "accession")]
    accession: Option<String>,

    /// Use the built-in example sequence
    #[arg(short = 'e', long = "example")]
    example: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the composition report of a sequence
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Transcribe a DNA sequence to RNA (T -> U)
    Transcribe {
        #[command(flatten)]
        input: InputArgs,

        /// Output file. Use "-" for stdout (default).
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// Reverse complement (symbols other than A, T, C, G are dropped)
    Revcomp {
        #[command(flatten)]
        input: InputArgs,

        /// Output file. Use "-" for stdout (default).
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// List the 1-based positions of a motif (overlapping matches included)
    Motif {
        /// Motif to search for (case-insensitive)
        motif: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Fetch a sequence from NCBI and write it as plain text
    Fetch {
        /// NCBI nucleotide accession id
        accession: String,

        /// Output file. Use "-" for stdout (default).
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
}

/// seqlab - analyze DNA/RNA sequences
///
/// Without a subcommand, opens the interactive menu.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Timeout in seconds for NCBI requests
    #[arg(long = "timeout", global = true, default_value = "10")]
    timeout: u64,

    /// NCBI efetch endpoint
    #[arg(long = "endpoint", global = true, default_value = EFETCH_URL)]
    endpoint: String,
}

/// Fetches a sequence, reporting progress on stderr.
fn fetch(config: &FetchConfig, accession: &str) -> Result<Sequence> {
    let retriever = EntrezRetriever::new(config.clone())?;
    eprintln!("Fetching {} from NCBI...", accession.trim());
    let sequence =
        fetch_sequence(&retriever, accession).map_err(|e| anyhow!("{e}\n{}", e.hint()))?;
    eprintln!("Sequence found! ({} bases)", sequence.len());
    Ok(sequence)
}

/// Reads and classifies the sequence named by the input arguments.
fn load_input(input: &InputArgs, config: &FetchConfig) -> Result<LoadedSequence> {
    let sequence = if let Some(path) = &input.file {
        read_sequence_file(path).map_err(|e| anyhow!("{}: {e}", path.display()))?
    } else if let Some(accession) = &input.accession {
        fetch(config, accession)?
    } else if input.example {
        example_sequence()
    } else {
        let raw = input.sequence.as_deref().unwrap_or_default();
        let sequence = Sequence::normalize(raw);
        if sequence.is_empty() {
            bail!("Empty sequence");
        }
        sequence
    };

    let loaded = analysis::load(sequence);
    if loaded.kind == SequenceKind::Unrecognized {
        eprintln!("Warning: the sequence contains symbols outside the DNA and RNA alphabets");
    }
    Ok(loaded)
}

/// Writes a result to stdout or to a file.
fn write_result(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        None | Some("-") => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{content}")?;
        }
        Some(path) => {
            save_text(path, content)?;
            eprintln!("Wrote {} bases to {}", content.chars().count(), path);
        }
    }
    Ok(())
}

/// Runs one subcommand.
fn run_command(command: Command, config: &FetchConfig) -> Result<()> {
    match command {
        Command::Analyze { input } => {
            let loaded = load_input(&input, config)?;
            let report = analysis::build_report(&loaded.sequence, loaded.kind);
            print!("{report}");
        }
        Command::Transcribe { input, output } => {
            let loaded = load_input(&input, config)?;
            let rna = transcribe_checked(Some(&loaded))?;
            write_result(output.as_deref(), rna.as_str())?;
        }
        Command::Revcomp { input, output } => {
            let loaded = load_input(&input, config)?;
            if loaded.kind != SequenceKind::Dna {
                eprintln!(
                    "Warning: sequence is {}, symbols other than A, T, C, G are dropped",
                    loaded.kind
                );
            }
            let rc = analysis::reverse_complement(&loaded.sequence);
            write_result(output.as_deref(), rc.as_str())?;
        }
        Command::Motif { motif, input } => {
            if motif.trim().is_empty() {
                bail!("Empty motif");
            }
            let loaded = load_input(&input, config)?;
            let positions = analysis::find_motif(&loaded.sequence, motif.trim());
            print!("{}", render_motif_hits(&motif, &positions));
        }
        Command::Fetch { accession, output } => {
            let sequence = fetch(config, &accession)?;
            write_result(output.as_deref(), sequence.as_str())?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.timeout == 0 {
        bail!("Timeout must be at least 1 second (got 0)");
    }
    let config = FetchConfig {
        endpoint: args.endpoint,
        timeout: Duration::from_secs(args.timeout),
    };

    match args.command {
        Some(command) => run_command(command, &config)?,
        None => {
            let retriever = EntrezRetriever::new(config)?;
            let stdin = io::stdin();
            let mut shell = Shell::new(stdin.lock(), io::stdout(), retriever);
            shell.run()?;
        }
    }

    Ok(())
}
