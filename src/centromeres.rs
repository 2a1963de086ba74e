//! Scan a genome for point-centromere motifs: a CDEI element, a 70–120 bp AT-rich
//! CDEII spacer, and a CDEIII element, on both strands.
//!
//! Hits are reported in local (per-sequence) and global coordinates, where global
//! coordinates treat the genome as all sequences concatenated in file order.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use std::fmt;

use crate::ranges::Strand;
use crate::sequences::nucleotide::{reverse_complement, GenomeSequences};
use crate::{Position, INTERNAL_ERROR_MESSAGE};

pub const CDE_PATTERN: &str = r"([AG]TCAC[AG]TG)([ATCGN]{70,120})(TGT[AT][TG]G[TG]T)";

lazy_static! {
    static ref CDE_REGEX: Regex = Regex::new(CDE_PATTERN).expect(INTERNAL_ERROR_MESSAGE);
}

/// Whether a sequence looks mitochondrial and should not be scanned.
pub fn is_mitochondrial(seqname: &str) -> bool {
    seqname.contains("Mito") || seqname.contains("ChrM") || seqname.to_lowercase().contains("mt")
}

/// A single motif match, 1-based and right-inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct CentromereHit {
    pub seqname: String,
    pub strand: Strand,
    pub local_start: Position,
    pub local_end: Position,
    pub global_start: Position,
    pub global_end: Position,
}

/// Find motif matches on both strands of one sequence, ignoring case.
/// Reverse-strand matches are mapped back to forward-strand coordinates.
/// `offset` is the number of basepairs in all preceding sequences.
pub fn scan_sequence(seqname: &str, seq: &[u8], offset: Position) -> Vec<CentromereHit> {
    let len = seq.len() as Position;
    let hit = |strand, local_start: Position, local_end: Position| CentromereHit {
        seqname: seqname.to_string(),
        strand,
        local_start,
        local_end,
        global_start: offset + local_start,
        global_end: offset + local_end,
    };

    // soft-masked bases match like any other on both strands
    let forward = seq.to_ascii_uppercase();
    let mut hits: Vec<CentromereHit> = CDE_REGEX
        .find_iter(&forward)
        .map(|m| hit(Strand::Forward, m.start() as Position + 1, m.end() as Position))
        .collect();

    let revcomp = reverse_complement(&forward);
    hits.extend(CDE_REGEX.find_iter(&revcomp).map(|m| {
        hit(
            Strand::Reverse,
            len - m.end() as Position + 1,
            len - m.start() as Position,
        )
    }));
    hits
}

/// The result of scanning a whole genome.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CentromereScan {
    pub genome_length: Position,
    pub hits: Vec<CentromereHit>,
    pub skipped: Vec<String>,
}

/// Scan every non-mitochondrial sequence of the genome.
pub fn scan_genome(genome: &GenomeSequences) -> CentromereScan {
    let mut scan = CentromereScan::default();
    for (seqname, seq) in genome.iter() {
        let offset = scan.genome_length;
        scan.genome_length += seq.len() as Position;
        if is_mitochondrial(seqname) {
            scan.skipped.push(seqname.clone());
            continue;
        }
        scan.hits.extend(scan_sequence(seqname, seq, offset));
    }
    scan
}

/// Format an integer with thousands separators.
fn thousands(value: Position) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for CentromereScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(80);
        writeln!(
            f,
            "Total genome length (Concatenated): {} bp",
            thousands(self.genome_length)
        )?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "{:<10} | {:<12} | {:<12} | {:<15} | {:<15}",
            "Chrom", "Local Start", "Local End", "GLOBAL START", "GLOBAL END"
        )?;
        writeln!(f, "{}", rule)?;
        for hit in &self.hits {
            write!(
                f,
                "{:<10} | {:<12} | {:<12} | {:<15} | {:<15}",
                hit.seqname,
                hit.local_start,
                hit.local_end,
                thousands(hit.global_start),
                thousands(hit.global_end)
            )?;
            if hit.strand == Strand::Reverse {
                write!(f, " (Rev)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cen(spacer_len: usize) -> String {
        format!("ATCACGTG{}TGTTTGGT", "A".repeat(spacer_len))
    }

    #[test]
    fn test_forward_hit() {
        let seq = format!("CCCCC{}CCCCC", cen(80));
        let hits = scan_sequence("chr1", seq.as_bytes(), 1000);
        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.strand, Strand::Forward);
        assert_eq!(hit.local_start, 6);
        assert_eq!(hit.local_end, 5 + 96);
        assert_eq!(hit.global_start, 1006);
    }

    #[test]
    fn test_reverse_hit() {
        let motif = cen(100);
        let rc = String::from_utf8(reverse_complement(motif.as_bytes())).unwrap();
        let seq = format!("GGG{}GG", rc);
        let hits = scan_sequence("chr1", seq.as_bytes(), 0);
        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.strand, Strand::Reverse);
        // the motif occupies positions 4..=119 on the forward strand
        assert_eq!((hit.local_start, hit.local_end), (4, 3 + 116));
    }

    #[test]
    fn test_soft_masked_hits_on_both_strands() {
        let motif = cen(90).to_ascii_lowercase();
        let forward = format!("cc{}cc", motif);
        let hits = scan_sequence("chr1", forward.as_bytes(), 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].strand, Strand::Forward);
        assert_eq!(hits[0].local_start, 3);

        let rc = reverse_complement(motif.as_bytes()).to_ascii_lowercase();
        let reverse = [b"cc".as_slice(), &rc, b"cc"].concat();
        let hits = scan_sequence("chr1", &reverse, 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].strand, Strand::Reverse);
        assert_eq!((hits[0].local_start, hits[0].local_end), (3, 2 + 106));
    }

    #[test]
    fn test_spacer_bounds() {
        assert!(scan_sequence("c", cen(69).as_bytes(), 0).is_empty());
        assert_eq!(scan_sequence("c", cen(70).as_bytes(), 0).len(), 1);
        assert_eq!(scan_sequence("c", cen(120).as_bytes(), 0).len(), 1);
        assert!(scan_sequence("c", cen(121).as_bytes(), 0).is_empty());
    }

    #[test]
    fn test_scan_genome_offsets_and_mito() {
        let mut genome = GenomeSequences::new();
        genome.insert("chr1", "C".repeat(50));
        genome.insert("chrMito", cen(80));
        genome.insert("chr2", format!("CC{}", cen(80)));
        let scan = scan_genome(&genome);
        assert_eq!(scan.genome_length, 50 + 96 + 98);
        assert_eq!(scan.skipped, vec!["chrMito".to_string()]);
        assert_eq!(scan.hits.len(), 1);
        assert_eq!(scan.hits[0].local_start, 3);
        assert_eq!(scan.hits[0].global_start, 50 + 96 + 3);
    }

    #[test]
    fn test_mitochondrial_names() {
        assert!(is_mitochondrial("Mito"));
        assert!(is_mitochondrial("ChrM"));
        assert!(is_mitochondrial("chrMT"));
        assert!(!is_mitochondrial("chrIV"));
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(12345678), "12,345,678");
    }
}
