//! Gene models built from a GTF annotation: transcripts with their exons, and the
//! gene-id to display-name index.

use indexmap::IndexMap;
use std::path::PathBuf;

use crate::error::IntronScanError;
use crate::io::parsers::GtfIterator;
use crate::ranges::Exon;

/// Display name used for genes without a `gene_name` attribute anywhere in the
/// annotation.
pub const UNKNOWN_GENE_NAME: &str = "Unknown";

/// A transcript and its exons, in the order they appear in the annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    pub id: String,
    pub gene_id: String,
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn new(id: impl Into<String>, gene_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            gene_id: gene_id.into(),
            exons: Vec::new(),
        }
    }

    /// The exons ordered by start position. The sort is stable, so exons with
    /// equal starts keep their annotation order.
    pub fn sorted_exons(&self) -> Vec<&Exon> {
        let mut exons: Vec<&Exon> = self.exons.iter().collect();
        exons.sort_by_key(|exon| exon.start);
        exons
    }

    pub fn len(&self) -> usize {
        self.exons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exons.is_empty()
    }
}

/// Mapping from gene identifier to display name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneNameIndex {
    names: IndexMap<String, String>,
}

impl GeneNameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the display name of a gene.
    pub fn insert(&mut self, gene_id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(gene_id.into(), name.into());
    }

    pub fn get(&self, gene_id: &str) -> Option<&str> {
        self.names.get(gene_id).map(String::as_str)
    }

    /// The display name of a gene, or [`UNKNOWN_GENE_NAME`].
    pub fn display_name(&self, gene_id: &str) -> &str {
        self.get(gene_id).unwrap_or(UNKNOWN_GENE_NAME)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Gene models loaded from an annotation file.
#[derive(Clone, Debug, Default)]
pub struct Annotation {
    /// Transcripts by identifier, in order of first appearance.
    pub transcripts: IndexMap<String, Transcript>,
    pub gene_names: GeneNameIndex,
    /// Number of lines skipped because they could not be parsed.
    pub malformed_lines: usize,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the gene models from a GTF file.
    ///
    /// Only `exon` features with both `transcript_id` and `gene_id` contribute
    /// exons. Any line, whatever its feature type, carrying both `gene_id` and
    /// `gene_name` updates the gene name index. Malformed lines are skipped and
    /// counted; a missing file is [`IntronScanError::MissingInputFile`].
    pub fn from_gtf(filepath: impl Into<PathBuf>) -> Result<Self, IntronScanError> {
        let mut annotation = Annotation::new();
        for result in GtfIterator::new(filepath)? {
            let record = match result {
                Ok(record) => record,
                Err(IntronScanError::MalformedLine(line)) => {
                    log::debug!("skipping malformed line: {}", line);
                    annotation.malformed_lines += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let (Some(gene_id), Some(gene_name)) = (record.gene_id(), record.gene_name()) {
                annotation.gene_names.insert(gene_id, gene_name);
            }

            if record.feature != "exon" {
                continue;
            }
            let (Some(transcript_id), Some(gene_id)) = (record.transcript_id(), record.gene_id())
            else {
                continue;
            };
            match record.to_exon() {
                Ok(exon) => annotation.push_exon(transcript_id, gene_id, exon),
                Err(e) => {
                    log::debug!("{}", e);
                    annotation.malformed_lines += 1;
                }
            }
        }
        Ok(annotation)
    }

    /// Append an exon to a transcript, creating the transcript if needed. The
    /// transcript's gene is the one given with its latest exon.
    pub fn push_exon(&mut self, transcript_id: &str, gene_id: &str, exon: Exon) {
        let transcript = self
            .transcripts
            .entry(transcript_id.to_string())
            .or_insert_with(|| Transcript::new(transcript_id, gene_id));
        if transcript.gene_id != gene_id {
            transcript.gene_id = gene_id.to_string();
        }
        transcript.exons.push(exon);
    }

    pub fn num_exons(&self) -> usize {
        self.transcripts.values().map(Transcript::len).sum()
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::Strand;
    use crate::test_utilities::temp_textfile;

    #[test]
    fn test_from_gtf() {
        let file = temp_textfile(
            "# comment\n\
             chrA\tsrc\tgene\t100\t400\t.\t+\t.\tgene_id \"G1\"; gene_name \"RPL3\";\n\
             chrA\tsrc\texon\t300\t400\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";\n\
             chrA\tsrc\texon\t100\t200\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";\n\
             chrB\tsrc\texon\t5\t50\t.\t-\t.\tgene_id \"G2\"; transcript_id \"T2\";\n\
             chrB\tsrc\tCDS\t5\t50\t.\t-\t.\tgene_id \"G2\"; transcript_id \"T2\"; gene_name \"VMA2\";\n",
        );
        let annotation = Annotation::from_gtf(file.path()).unwrap();
        assert_eq!(annotation.len(), 2);
        assert_eq!(annotation.num_exons(), 3);
        assert_eq!(annotation.malformed_lines, 0);

        let t1 = &annotation.transcripts["T1"];
        assert_eq!(t1.gene_id, "G1");
        // order of appearance is kept until sorting
        assert_eq!(t1.exons[0].start, 300);
        let sorted: Vec<_> = t1.sorted_exons().iter().map(|e| e.start).collect();
        assert_eq!(sorted, vec![100, 300]);

        assert_eq!(annotation.transcripts["T2"].exons[0].strand, Some(Strand::Reverse));
        assert_eq!(annotation.gene_names.display_name("G1"), "RPL3");
        // CDS lines still feed the name index
        assert_eq!(annotation.gene_names.display_name("G2"), "VMA2");
        assert_eq!(annotation.gene_names.display_name("G3"), UNKNOWN_GENE_NAME);
        assert_eq!(annotation.transcripts["T2"].gene_id, "G2");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let file = temp_textfile(
            "chrA\tsrc\texon\t100\t200\n\
             chrA\tsrc\texon\tabc\t200\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";\n\
             chrA\tsrc\texon\t100\t200\t.\t+\t.\tgene_id \"G1\";\n\
             chrA\tsrc\texon\t300\t400\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";\n",
        );
        let annotation = Annotation::from_gtf(file.path()).unwrap();
        assert_eq!(annotation.malformed_lines, 2);
        assert_eq!(annotation.len(), 1);
        assert_eq!(annotation.transcripts["T1"].len(), 1);
    }

    #[test]
    fn test_stable_sort() {
        let mut transcript = Transcript::new("T1", "G1");
        transcript
            .exons
            .push(Exon::new("chrA", 100, 150, None).unwrap());
        transcript
            .exons
            .push(Exon::new("chrA", 100, 120, None).unwrap());
        transcript.exons.push(Exon::new("chrA", 50, 60, None).unwrap());
        let ends: Vec<_> = transcript.sorted_exons().iter().map(|e| e.end).collect();
        assert_eq!(ends, vec![60, 150, 120]);
    }

    #[test]
    fn test_missing_annotation() {
        assert!(matches!(
            Annotation::from_gtf("tests_data/nope.gtf"),
            Err(IntronScanError::MissingInputFile(_))
        ));
    }
}
