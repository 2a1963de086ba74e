//! Intron derivation and splice-site consensus checks.
//!
//! For every transcript with at least two exons, exons are sorted by start and an
//! intron is derived for every gap between consecutive exons. If the genome
//! sequence of the transcript is loaded, the intron's first and last two bases
//! (oriented by strand) form its splice motif, e.g. `GT-AG`.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::annotation::{Annotation, Transcript};
use crate::ranges::{Exon, Intron, Strand};
use crate::sequences::nucleotide::{reverse_complement, GenomeSequences};
use crate::traits::GenericRange;
use crate::Position;

/// The outcome of checking an intron's boundaries against the genome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpliceCheck {
    /// The splice motif, e.g. `GT-AG`.
    Motif(String),
    /// No genome was loaded, or it lacks this sequence.
    NoSequence,
    /// The intron does not lie within the loaded sequence.
    OutOfRange,
}

impl SpliceCheck {
    pub fn motif(&self) -> Option<&str> {
        match self {
            SpliceCheck::Motif(motif) => Some(motif),
            _ => None,
        }
    }
}

/// Derive the introns of a transcript. Exons are sorted by start (stable), and
/// gaps of less than one basepair are not introns.
pub fn derive_introns(transcript: &Transcript) -> Vec<Intron> {
    if transcript.len() < 2 {
        return Vec::new();
    }
    transcript
        .sorted_exons()
        .windows(2)
        .filter_map(|pair| Intron::between(pair[0], pair[1]))
        .collect()
}

/// Build the splice motif from an intron's sequence: the first two and last two
/// bases, joined by `-`. Minus-strand introns are reverse complemented first.
/// Returns `None` for an empty region.
pub fn splice_motif(region: &[u8], strand: Option<Strand>) -> Option<String> {
    if region.is_empty() {
        return None;
    }
    let oriented = match strand {
        Some(Strand::Reverse) => reverse_complement(region),
        _ => region.to_vec(),
    };
    let n = oriented.len().min(2);
    let donor = String::from_utf8_lossy(&oriented[..n]);
    let acceptor = String::from_utf8_lossy(&oriented[oriented.len() - n..]);
    Some(format!("{}-{}", donor, acceptor))
}

/// Check an intron's splice motif against the genome, if one is loaded.
pub fn check_splice_site(
    genome: Option<&GenomeSequences>,
    seqname: &str,
    intron: &Intron,
    strand: Option<Strand>,
) -> SpliceCheck {
    let Some(genome) = genome.filter(|g| g.contains(seqname)) else {
        return SpliceCheck::NoSequence;
    };
    match genome.region(seqname, intron.start(), intron.end()) {
        Ok(region) => splice_motif(region, strand).map_or(SpliceCheck::OutOfRange, SpliceCheck::Motif),
        Err(e) => {
            log::trace!("{}", e);
            SpliceCheck::OutOfRange
        }
    }
}

/// A transcript of a watched gene that has at least one intron.
#[derive(Clone, Debug, PartialEq)]
pub struct Culprit {
    pub gene_name: String,
    pub gene_id: String,
    pub transcript_id: String,
    pub intron_lengths: Vec<Position>,
}

impl fmt::Display for Culprit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lengths = self
            .intron_lengths
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{} (ID: {}) - Introns: [{}] bp",
            self.gene_name, self.gene_id, lengths
        )
    }
}

/// One row of the per-intron table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntronRecord {
    pub transcript_id: String,
    pub gene_id: String,
    pub gene_name: String,
    pub seqname: String,
    pub start: Position,
    pub end: Position,
    pub strand: String,
    pub length: Position,
    pub motif: Option<String>,
}

/// Whether a gene display name contains any of the watched tokens.
pub fn is_watched(gene_name: &str, watch_list: &[String]) -> bool {
    watch_list.iter().any(|token| gene_name.contains(token.as_str()))
}

/// Everything derived from one pass over the transcripts.
#[derive(Clone, Debug, Default)]
pub struct IntronAnalysis {
    /// Intron lengths, in transcript order then genomic order.
    pub lengths: Vec<Position>,
    /// Splice motif counts, in order of first observation.
    pub motifs: IndexMap<String, usize>,
    pub culprits: Vec<Culprit>,
    pub records: Vec<IntronRecord>,
    pub transcripts_analyzed: usize,
    pub multi_exon_transcripts: usize,
    pub out_of_range: usize,
    pub unchecked: usize,
}

impl IntronAnalysis {
    pub fn num_introns(&self) -> usize {
        self.lengths.len()
    }

    pub fn num_motifs(&self) -> usize {
        self.motifs.values().sum()
    }

    fn add_transcript(
        &mut self,
        transcript: &Transcript,
        gene_name: &str,
        genome: Option<&GenomeSequences>,
        watch_list: &[String],
    ) {
        self.transcripts_analyzed += 1;
        let introns = derive_introns(transcript);
        if transcript.len() >= 2 {
            self.multi_exon_transcripts += 1;
        }
        if introns.is_empty() {
            return;
        }

        // the first exon after sorting determines sequence and strand
        let sorted = transcript.sorted_exons();
        let Some(first) = sorted.first().copied() else {
            return;
        };
        let Exon {
            seqname, strand, ..
        } = first;

        let mut local_lengths = Vec::with_capacity(introns.len());
        for intron in introns {
            let length = intron.len();
            let check = check_splice_site(genome, seqname, &intron, *strand);
            match &check {
                SpliceCheck::Motif(motif) => *self.motifs.entry(motif.clone()).or_insert(0) += 1,
                SpliceCheck::OutOfRange => self.out_of_range += 1,
                SpliceCheck::NoSequence => self.unchecked += 1,
            }
            self.lengths.push(length);
            local_lengths.push(length);
            self.records.push(IntronRecord {
                transcript_id: transcript.id.clone(),
                gene_id: transcript.gene_id.clone(),
                gene_name: gene_name.to_string(),
                seqname: seqname.clone(),
                start: intron.start,
                end: intron.end,
                strand: strand.map_or(".".to_string(), |s| s.to_string()),
                length,
                motif: check.motif().map(String::from),
            });
        }

        if is_watched(gene_name, watch_list) {
            self.culprits.push(Culprit {
                gene_name: gene_name.to_string(),
                gene_id: transcript.gene_id.clone(),
                transcript_id: transcript.id.clone(),
                intron_lengths: local_lengths,
            });
        }
    }
}

/// Derive introns for every transcript of the annotation, check their splice
/// motifs against `genome` (if any), and collect transcripts of watched genes.
pub fn analyze_transcripts(
    annotation: &Annotation,
    genome: Option<&GenomeSequences>,
    watch_list: &[String],
) -> IntronAnalysis {
    let mut analysis = IntronAnalysis::default();
    for transcript in annotation.transcripts.values() {
        let gene_name = annotation.gene_names.display_name(&transcript.gene_id);
        analysis.add_transcript(transcript, gene_name, genome, watch_list);
    }
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::UNKNOWN_GENE_NAME;
    use crate::test_utilities::random_transcript;

    fn transcript(exons: &[(Position, Position)], strand: Option<Strand>) -> Transcript {
        let mut t = Transcript::new("T1", "G1");
        for (start, end) in exons {
            t.exons.push(Exon::new("chrA", *start, *end, strand).unwrap());
        }
        t
    }

    fn watch(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_two_exon_scenario() {
        let t = transcript(&[(100, 200), (300, 400)], Some(Strand::Forward));
        let introns = derive_introns(&t);
        assert_eq!(introns, vec![Intron { start: 201, end: 299 }]);
        assert_eq!(introns[0].len(), 99);
    }

    #[test]
    fn test_out_of_order_exons() {
        let t = transcript(&[(300, 400), (100, 200)], Some(Strand::Forward));
        assert_eq!(derive_introns(&t), vec![Intron { start: 201, end: 299 }]);
    }

    #[test]
    fn test_single_exon_no_introns() {
        assert!(derive_introns(&transcript(&[(100, 200)], None)).is_empty());
        assert!(derive_introns(&transcript(&[], None)).is_empty());
    }

    #[test]
    fn test_touching_and_overlapping_exons() {
        let t = transcript(&[(100, 200), (201, 300), (290, 400), (450, 500)], None);
        assert_eq!(derive_introns(&t), vec![Intron { start: 401, end: 449 }]);
    }

    #[test]
    fn test_random_transcripts_intron_count() {
        for _ in 0..200 {
            let t = random_transcript(10);
            let introns = derive_introns(&t);
            assert!(introns.len() < t.len().max(1));
            for intron in &introns {
                assert!(intron.len() >= 1);
                // introns never overlap an exon
                assert!(t.exons.iter().all(|e| e.end < intron.start || e.start > intron.end));
            }
        }
    }

    #[test]
    fn test_splice_motif() {
        assert_eq!(
            splice_motif(b"GTAAGTTTTCAG", Some(Strand::Forward)).unwrap(),
            "GT-AG"
        );
        // minus strand: CT...AC on the forward strand is GT...AG
        assert_eq!(
            splice_motif(b"CTGAAAAAAC", Some(Strand::Reverse)).unwrap(),
            "GT-AG"
        );
        assert_eq!(splice_motif(b"gtaaag", None).unwrap(), "gt-ag");
        assert_eq!(splice_motif(b"A", None).unwrap(), "A-A");
        assert_eq!(splice_motif(b"", None), None);
    }

    #[test]
    fn test_check_splice_site() {
        let mut genome = GenomeSequences::new();
        genome.insert("chrA", "AAAAGTAAGCAGAAAA");
        let intron = Intron { start: 5, end: 12 };
        assert_eq!(
            check_splice_site(Some(&genome), "chrA", &intron, Some(Strand::Forward)),
            SpliceCheck::Motif("GT-AG".to_string())
        );
        assert_eq!(
            check_splice_site(Some(&genome), "chrB", &intron, None),
            SpliceCheck::NoSequence
        );
        assert_eq!(
            check_splice_site(None, "chrA", &intron, None),
            SpliceCheck::NoSequence
        );
        let past_end = Intron { start: 10, end: 20 };
        assert_eq!(
            check_splice_site(Some(&genome), "chrA", &past_end, None),
            SpliceCheck::OutOfRange
        );
    }

    #[test]
    fn test_analyze_transcripts() {
        let mut annotation = Annotation::new();
        let exons = [(1, 4), (13, 16)];
        for (start, end) in exons {
            annotation.push_exon("T1", "G1", Exon::new("chrA", start, end, Some(Strand::Forward)).unwrap());
            annotation.push_exon("T2", "G2", Exon::new("chrA", start, end, Some(Strand::Forward)).unwrap());
        }
        annotation.push_exon("T3", "G3", Exon::new("chrA", 1, 4, None).unwrap());
        annotation.gene_names.insert("G1", "RPL3A");
        let mut genome = GenomeSequences::new();
        genome.insert("chrA", "AAAAGTAAGCAGAAAA");

        let analysis = analyze_transcripts(&annotation, Some(&genome), &watch(&["RPL", "ACT1"]));
        assert_eq!(analysis.transcripts_analyzed, 3);
        assert_eq!(analysis.multi_exon_transcripts, 2);
        assert_eq!(analysis.lengths, vec![8, 8]);
        assert_eq!(analysis.motifs.get("GT-AG"), Some(&2));
        assert_eq!(analysis.num_motifs(), 2);
        assert_eq!(analysis.culprits.len(), 1);
        assert_eq!(analysis.culprits[0].gene_name, "RPL3A");
        assert_eq!(
            analysis.culprits[0].to_string(),
            "RPL3A (ID: G1) - Introns: [8] bp"
        );
        assert_eq!(analysis.records[1].gene_name, UNKNOWN_GENE_NAME);
        assert_eq!(analysis.records[0].motif.as_deref(), Some("GT-AG"));
    }

    #[test]
    fn test_analyze_without_genome() {
        let mut annotation = Annotation::new();
        annotation.push_exon("T1", "G1", Exon::new("chrA", 100, 200, None).unwrap());
        annotation.push_exon("T1", "G1", Exon::new("chrA", 300, 400, None).unwrap());
        let analysis = analyze_transcripts(&annotation, None, &[]);
        assert_eq!(analysis.lengths, vec![99]);
        assert!(analysis.motifs.is_empty());
        assert_eq!(analysis.unchecked, 1);
        assert!(analysis.culprits.is_empty());
    }

    #[test]
    fn test_watch_list_matching() {
        let tokens = watch(&["RPL", "GLC7"]);
        assert!(is_watched("RPL10", &tokens));
        assert!(is_watched("xGLC7", &tokens));
        assert!(!is_watched("rpl10", &tokens));
        assert!(!is_watched(UNKNOWN_GENE_NAME, &tokens));
    }
}
