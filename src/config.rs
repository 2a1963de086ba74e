//! Configuration of an intron analysis run.

use std::path::PathBuf;

pub const DEFAULT_ANNOTATION: &str = "schoenii_annotation.gtf";
pub const DEFAULT_GENOME: &str = "Schoenii_assembly.fa";
pub const DEFAULT_LENGTHS_OUTPUT: &str = "all_intron_lengths.txt";
pub const DEFAULT_PLOT_OUTPUT: &str = "Figure_Intron_Distribution.html";

/// Gene name tokens of interest: ribosomal proteins (RPL, RPS), cytoskeleton (ACT1,
/// COF1), translation factors (TEF, EFB1), vacuolar ATPase (VMA), GTPases and
/// metabolism (YPT, GPD), mRNA export (YRA1, SUS1), NMD helicase (DBP2) and
/// phosphatase (GLC7).
pub const DEFAULT_WATCH_LIST: &[&str] = &[
    "RPL", "RPS", "ACT1", "COF1", "TEF", "EFB1", "VMA", "YPT", "GPD", "YRA1", "SUS1", "DBP2",
    "GLC7",
];

pub const DEFAULT_CULPRIT_LIMIT: usize = 100;
pub const DEFAULT_TOP_MOTIFS: usize = 5;
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Inputs, outputs and parameters of the `introns` command.
#[derive(Clone, Debug, PartialEq)]
pub struct IntronScanConfig {
    pub annotation: PathBuf,
    pub genome: PathBuf,
    pub lengths_output: PathBuf,
    pub plot_output: PathBuf,
    /// Optional per-intron TSV table.
    pub introns_output: Option<PathBuf>,
    pub watch_list: Vec<String>,
    pub culprit_limit: usize,
    pub top_motifs: usize,
    pub histogram_bins: usize,
}

impl Default for IntronScanConfig {
    fn default() -> Self {
        Self {
            annotation: PathBuf::from(DEFAULT_ANNOTATION),
            genome: PathBuf::from(DEFAULT_GENOME),
            lengths_output: PathBuf::from(DEFAULT_LENGTHS_OUTPUT),
            plot_output: PathBuf::from(DEFAULT_PLOT_OUTPUT),
            introns_output: None,
            watch_list: DEFAULT_WATCH_LIST.iter().map(|s| s.to_string()).collect(),
            culprit_limit: DEFAULT_CULPRIT_LIMIT,
            top_motifs: DEFAULT_TOP_MOTIFS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl IntronScanConfig {
    pub fn new(annotation: impl Into<PathBuf>, genome: impl Into<PathBuf>) -> Self {
        Self {
            annotation: annotation.into(),
            genome: genome.into(),
            ..Self::default()
        }
    }

    /// Replace the watch list. Empty tokens are dropped, since they would match
    /// every gene.
    pub fn with_watch_list<S: AsRef<str>>(mut self, tokens: &[S]) -> Self {
        self.watch_list = tokens
            .iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntronScanConfig::default();
        assert_eq!(config.annotation, PathBuf::from("schoenii_annotation.gtf"));
        assert_eq!(config.genome, PathBuf::from("Schoenii_assembly.fa"));
        assert_eq!(config.lengths_output, PathBuf::from("all_intron_lengths.txt"));
        assert_eq!(config.watch_list.len(), 13);
        assert_eq!(config.culprit_limit, 100);
        assert_eq!(config.top_motifs, 5);
    }

    #[test]
    fn test_watch_list_drops_empty_tokens() {
        let config = IntronScanConfig::new("a.gtf", "a.fa").with_watch_list(&["RPL", "", " "]);
        assert_eq!(config.watch_list, vec!["RPL".to_string()]);
        assert_eq!(config.annotation, PathBuf::from("a.gtf"));
    }
}
