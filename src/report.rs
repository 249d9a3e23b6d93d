//! Text rendering of analysis results.

use std::fmt;

use crate::model::{AnalysisReport, Sequence};

/// Width of the rule lines framing a report.
const RULE_WIDTH: usize = 60;

/// Number of symbols shown in the transcription preview.
pub const TRANSCRIPTION_PREVIEW_LEN: usize = 50;

/// The full sequence report.
///
/// Each base is listed with its count and percentage of the length, in
/// symbol order. GC content only appears for DNA.
impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "SEQUENCE ANALYSIS REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Sequence type: {}", self.kind)?;
        writeln!(f, "Length: {} bases", self.length)?;
        writeln!(f)?;
        writeln!(f, "--- Base counts ---")?;
        for (base, count) in self.base_counts.iter() {
            let pct = count as f64 / self.length as f64 * 100.0;
            writeln!(f, "  {base}: {count} ({pct:.2}%)")?;
        }

        if let Some(gc) = self.gc_content {
            writeln!(f)?;
            writeln!(f, "GC content: {gc:.2}%")?;
        }

        writeln!(f)?;
        writeln!(f, "First 20 bases: {}", self.head)?;
        if let Some(tail) = self.tail {
            writeln!(f, "Last 20 bases: {tail}")?;
        }
        Ok(())
    }
}

/// Shortens a sequence to `max` symbols followed by `...`.
pub fn preview(seq: &Sequence, max: usize) -> String {
    if seq.len() > max {
        format!("{}...", seq.head(max))
    } else {
        seq.as_str().to_string()
    }
}

/// Renders the DNA and RNA lines of a transcription.
pub fn render_transcription(dna: &Sequence, rna: &Sequence) -> String {
    format!(
        "--- Transcription DNA -> RNA ---\nDNA: {}\nRNA: {}\n",
        preview(dna, TRANSCRIPTION_PREVIEW_LEN),
        preview(rna, TRANSCRIPTION_PREVIEW_LEN)
    )
}

/// Renders the result of a motif search.
pub fn render_motif_hits(motif: &str, positions: &[usize]) -> String {
    let motif = motif.trim().to_uppercase();
    if positions.is_empty() {
        return format!("Motif {motif} not found.\n");
    }
    let list = positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Motif {motif} found {} time(s) at position(s): {list}\n",
        positions.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_report, classify};

    #[test]
    fn test_render_dna_report() {
        let seq = Sequence::normalize("AATCG");
        let report = build_report(&seq, classify(&seq));
        let text = report.to_string();

        assert!(text.contains("Sequence type: DNA"));
        assert!(text.contains("Length: 5 bases"));
        assert!(text.contains("  A: 2 (40.00%)"));
        assert!(text.contains("  T: 1 (20.00%)"));
        assert!(text.contains("GC content: 40.00%"));
        assert!(text.contains("First 20 bases: AATCG"));
        assert!(!text.contains("Last 20 bases"));

        // Symbol order, not encounter order
        let a = text.find("  A:").unwrap();
        let c = text.find("  C:").unwrap();
        let g = text.find("  G:").unwrap();
        let t = text.find("  T:").unwrap();
        assert!(a < c && c < g && g < t);
    }

    #[test]
    fn test_render_rna_report_has_no_gc() {
        let seq = Sequence::normalize(&"AUGC".repeat(6));
        let report = build_report(&seq, classify(&seq));
        let text = report.to_string();

        assert!(text.contains("Sequence type: RNA"));
        assert!(!text.contains("GC content"));
        assert!(text.contains("Last 20 bases: AUGCAUGCAUGCAUGCAUGC"));
    }

    #[test]
    fn test_report_into_fmt_writer() {
        use std::fmt::Write;

        let seq = Sequence::normalize("GGCC");
        let report = build_report(&seq, classify(&seq));
        let mut out = String::from("> ");
        write!(out, "{report}").unwrap();

        assert!(out.starts_with("> ===="));
        assert!(out.ends_with("First 20 bases: GGCC\n"));
        assert!(out.contains("GC content: 100.00%"));
    }

    #[test]
    fn test_empty_report_has_no_counts() {
        let seq = Sequence::normalize("");
        let report = build_report(&seq, classify(&seq));
        let text = report.to_string();

        assert!(text.contains("Length: 0 bases"));
        assert!(text.contains("--- Base counts ---\n\nGC content: 0.00%"));
    }

    #[test]
    fn test_preview() {
        let seq = Sequence::normalize(&"A".repeat(60));
        assert_eq!(preview(&seq, 50), format!("{}...", "A".repeat(50)));

        let short = Sequence::normalize("ACGT");
        assert_eq!(preview(&short, 50), "ACGT");
    }

    #[test]
    fn test_render_transcription() {
        let text = render_transcription(&Sequence::normalize("ATGC"), &Sequence::normalize("AUGC"));
        assert!(text.contains("DNA: ATGC\n"));
        assert!(text.contains("RNA: AUGC\n"));
    }

    #[test]
    fn test_render_motif_hits() {
        assert_eq!(
            render_motif_hits("atc", &[2, 6]),
            "Motif ATC found 2 time(s) at position(s): 2, 6\n"
        );
        assert_eq!(render_motif_hits("GGG", &[]), "Motif GGG not found.\n");
    }
}
