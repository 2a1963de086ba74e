//! Types for standardized reports to the user.
//!
//! Commands return a [`CommandOutput<U>`]: the command's value plus a [`Report`]
//! of issues worth telling the user about (skipped lines, degraded modes). The
//! [`IntronReport`] is the fixed-layout text summary of an intron analysis.

use std::fmt;
use std::io::Write;

use crate::data::{motif_frequencies, LengthSummary, MotifFrequency};
use crate::error::IntronScanError;
use crate::introns::{Culprit, IntronAnalysis};

/// The [`CommandOutput<U>`] type output is generic over some data output
/// from a command, and a [`Report`] that reports information to the user.
#[derive(Debug)]
pub struct CommandOutput<U> {
    pub value: U,
    pub report: Report,
}

impl<U> CommandOutput<U> {
    pub fn new(value: U, report: Report) -> Self {
        Self { value, report }
    }
}

/// A type to (semi) standardize reporting to the user.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, message: String) {
        self.entries.push(message)
    }

    pub fn issues(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const RULE_WIDTH: usize = 40;

/// The finished numeric summary of an intron analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct IntronReport {
    pub total_introns: usize,
    pub summary: Option<LengthSummary>,
    /// The most frequent motifs; percentages are of all motif observations.
    pub top_motifs: Vec<MotifFrequency>,
    /// Number of introns with a splice motif, including those beyond `top_motifs`.
    pub motif_observations: usize,
    /// Culprits sorted by gene name, capped at the configured limit.
    pub culprits: Vec<Culprit>,
    /// How many culprits did not make the cap.
    pub culprits_omitted: usize,
}

impl IntronReport {
    /// Build the report, keeping `top_motifs` motifs and at most `culprit_limit`
    /// culprits.
    pub fn new(analysis: &IntronAnalysis, top_motifs: usize, culprit_limit: usize) -> Self {
        let mut motifs = motif_frequencies(&analysis.motifs);
        motifs.truncate(top_motifs);

        let mut culprits = analysis.culprits.clone();
        culprits.sort_by(|a, b| {
            a.gene_name
                .cmp(&b.gene_name)
                .then_with(|| a.gene_id.cmp(&b.gene_id))
                .then_with(|| a.intron_lengths.cmp(&b.intron_lengths))
        });
        let culprits_omitted = culprits.len().saturating_sub(culprit_limit);
        culprits.truncate(culprit_limit);

        Self {
            total_introns: analysis.num_introns(),
            summary: LengthSummary::from_lengths(&analysis.lengths),
            top_motifs: motifs,
            motif_observations: analysis.num_motifs(),
            culprits,
            culprits_omitted,
        }
    }

    /// Write the text report.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), IntronScanError> {
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for IntronReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Intron analysis report")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total introns found: {}", self.total_introns)?;
        if let Some(summary) = &self.summary {
            writeln!(f, "Average Length: {:.2} bp", summary.mean)?;
            writeln!(f, "Median Length: {} bp", summary.median)?;
            writeln!(f, "Min/Max: {}/{} bp", summary.min, summary.max)?;
        }

        writeln!(f)?;
        writeln!(f, " Consensus splice sites")?;
        if self.motif_observations == 0 {
            writeln!(f, "  (Skipped or none found)")?;
        }
        for motif in &self.top_motifs {
            writeln!(
                f,
                "  {}: {} ({:.1}%)",
                motif.motif, motif.count, motif.percent
            )?;
        }

        writeln!(f)?;
        writeln!(f, " Conserved intron-containing genes")?;
        for culprit in &self.culprits {
            writeln!(f, "  {}", culprit)?;
        }
        if self.culprits_omitted > 0 {
            writeln!(f, "  ... and {} more.", self.culprits_omitted)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn culprit(name: &str, id: &str) -> Culprit {
        Culprit {
            gene_name: name.to_string(),
            gene_id: id.to_string(),
            transcript_id: format!("{}.t1", id),
            intron_lengths: vec![60],
        }
    }

    #[test]
    fn test_report_text() {
        let mut analysis = IntronAnalysis::default();
        analysis.lengths = vec![99, 60, 61];
        analysis.motifs.insert("GT-AG".to_string(), 2);
        analysis.motifs.insert("GC-AG".to_string(), 1);
        analysis.culprits = vec![culprit("RPS2", "G2"), culprit("ACT1", "G1")];

        let report = IntronReport::new(&analysis, 5, 100);
        let text = report.to_string();
        let expected = "
========================================
Intron analysis report
========================================
Total introns found: 3
Average Length: 73.33 bp
Median Length: 61 bp
Min/Max: 60/99 bp

 Consensus splice sites
  GT-AG: 2 (66.7%)
  GC-AG: 1 (33.3%)

 Conserved intron-containing genes
  ACT1 (ID: G1) - Introns: [60] bp
  RPS2 (ID: G2) - Introns: [60] bp
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report_without_motifs_or_introns() {
        let report = IntronReport::new(&IntronAnalysis::default(), 5, 100);
        let text = report.to_string();
        assert!(text.contains("Total introns found: 0\n\n Consensus"));
        assert!(text.contains("  (Skipped or none found)"));
        assert!(!text.contains("Average Length"));
    }

    #[test]
    fn test_culprit_overflow() {
        let mut analysis = IntronAnalysis::default();
        for i in (0..130).rev() {
            analysis
                .culprits
                .push(culprit(&format!("RPL{:03}", i), &format!("G{}", i)));
        }
        let report = IntronReport::new(&analysis, 5, 100);
        assert_eq!(report.culprits.len(), 100);
        assert_eq!(report.culprits_omitted, 30);
        assert!(report
            .culprits
            .windows(2)
            .all(|w| w[0].gene_name <= w[1].gene_name));
        assert_eq!(report.culprits[0].gene_name, "RPL000");
        assert!(report.to_string().ends_with("  ... and 30 more.\n"));
    }

    #[test]
    fn test_top_motifs_cap() {
        let mut analysis = IntronAnalysis::default();
        for (i, motif) in ["GT-AG", "GC-AG", "AT-AC", "GT-AT", "CT-AC", "GG-AG"]
            .iter()
            .enumerate()
        {
            analysis.motifs.insert(motif.to_string(), 10 - i);
        }
        let report = IntronReport::new(&analysis, 5, 100);
        assert_eq!(report.top_motifs.len(), 5);
        assert_eq!(report.top_motifs[4].motif, "CT-AC");
        assert_eq!(report.motif_observations, 45);
    }

    #[test]
    fn test_no_listed_motifs_is_not_skipped() {
        let mut analysis = IntronAnalysis::default();
        analysis.lengths = vec![99];
        analysis.motifs.insert("GT-AG".to_string(), 1);
        let text = IntronReport::new(&analysis, 0, 100).to_string();
        assert!(text.contains(" Consensus splice sites\n\n"));
        assert!(!text.contains("(Skipped or none found)"));

        let text = IntronReport::new(&IntronAnalysis::default(), 0, 100).to_string();
        assert!(text.contains(" Consensus splice sites\n  (Skipped or none found)\n"));
    }
}
