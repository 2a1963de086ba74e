//! Gene-level summary of a GTF annotation: gene, transcript and exon counts,
//! single- vs multi-exon genes, alternative splicing and functional annotation.

use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::path::PathBuf;

use crate::error::IntronScanError;
use crate::io::parsers::{GtfIterator, GtfRecord};

/// Attributes whose presence (with a value other than `-`) marks a gene as
/// functionally annotated.
pub const FUNCTIONAL_ATTRIBUTES: &[&str] = &["gene_name", "go_terms", "cog_category"];

/// Counts describing the genes of an annotation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationStats {
    pub genes: usize,
    pub transcripts: usize,
    pub exons: usize,
    pub single_exon_genes: usize,
    pub multi_exon_genes: usize,
    pub alternatively_spliced_genes: usize,
    pub annotated_genes: usize,
    pub unannotated_genes: usize,
    pub malformed_lines: usize,
}

fn is_functionally_annotated(record: &GtfRecord) -> bool {
    FUNCTIONAL_ATTRIBUTES
        .iter()
        .any(|key| record.attribute(key).map_or(false, |value| value != "-"))
}

impl AnnotationStats {
    /// Compute the statistics of a GTF file.
    ///
    /// Genes are `gene` features; transcripts are `transcript` features counted
    /// per gene; exons are unique `start-end` coordinates per gene.
    pub fn from_gtf(filepath: impl Into<PathBuf>) -> Result<Self, IntronScanError> {
        let mut stats = AnnotationStats::default();
        let mut genes: IndexMap<String, bool> = IndexMap::new();
        let mut transcripts: IndexMap<String, IndexSet<String>> = IndexMap::new();
        let mut exons: IndexMap<String, IndexSet<String>> = IndexMap::new();

        for result in GtfIterator::new(filepath)? {
            let record = match result {
                Ok(record) => record,
                Err(IntronScanError::MalformedLine(_)) => {
                    stats.malformed_lines += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let Some(gene_id) = record.gene_id() else {
                continue;
            };
            match (record.feature.as_str(), record.transcript_id()) {
                ("gene", _) => {
                    genes.insert(gene_id.to_string(), is_functionally_annotated(&record));
                }
                ("transcript", Some(transcript_id)) => {
                    transcripts
                        .entry(gene_id.to_string())
                        .or_default()
                        .insert(transcript_id.to_string());
                }
                ("exon", Some(_)) => match record.to_exon() {
                    Ok(exon) => {
                        exons
                            .entry(gene_id.to_string())
                            .or_default()
                            .insert(format!("{}-{}", exon.start, exon.end));
                    }
                    Err(_) => stats.malformed_lines += 1,
                },
                _ => {}
            }
        }

        stats.genes = genes.len();
        stats.annotated_genes = genes.values().filter(|&&annotated| annotated).count();
        stats.unannotated_genes = stats.genes - stats.annotated_genes;
        stats.transcripts = transcripts.values().map(IndexSet::len).sum();
        stats.alternatively_spliced_genes = transcripts.values().filter(|t| t.len() > 1).count();
        stats.exons = exons.values().map(IndexSet::len).sum();
        stats.single_exon_genes = exons.values().filter(|e| e.len() == 1).count();
        stats.multi_exon_genes = exons.values().filter(|e| e.len() > 1).count();
        Ok(stats)
    }

    fn percent_of_genes(&self, count: usize) -> f64 {
        if self.genes == 0 {
            0.0
        } else {
            count as f64 / self.genes as f64 * 100.0
        }
    }
}

impl fmt::Display for AnnotationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total genes: {}", self.genes)?;
        writeln!(f, "Total transcripts: {}", self.transcripts)?;
        writeln!(f, "Total exons: {}", self.exons)?;
        writeln!(f, "Single-exon genes: {}", self.single_exon_genes)?;
        writeln!(f, "Genes with introns (multi-exon): {}", self.multi_exon_genes)?;
        writeln!(
            f,
            "Genes with >1 transcript (alternative splicing): {}",
            self.alternatively_spliced_genes
        )?;
        writeln!(
            f,
            "Functionally annotated genes: {} ({:.1}%)",
            self.annotated_genes,
            self.percent_of_genes(self.annotated_genes)
        )?;
        writeln!(
            f,
            "Unannotated genes: {} ({:.1}%)",
            self.unannotated_genes,
            self.percent_of_genes(self.unannotated_genes)
        )
    }
}
