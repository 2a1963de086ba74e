//! Test cases and test utility functions.
//!

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::annotation::Transcript;
use crate::ranges::{Exon, Strand};
use crate::Position;

// exon and intron length ranges for random transcripts
pub const MIN_EXON_LEN: Position = 1;
pub const MAX_EXON_LEN: Position = 2_000;
pub const MAX_GAP_LEN: Position = 5_000;

// number of chromosome sequences
pub const NCHROM: usize = 16;

/// Write `contents` to a new temporary file, which is deleted when dropped.
pub fn temp_textfile(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("could not create temporary file");
    file.write_all(contents.as_bytes())
        .expect("could not write temporary file");
    file.flush().expect("could not flush temporary file");
    file
}

/// Sample a random chromosome
pub fn random_chrom() -> String {
    let mut rng = thread_rng();
    format!("chr{}", rng.gen_range(1..NCHROM + 1))
}

/// Build a random uppercase DNA sequence.
pub fn random_nucleotides(len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..len).map(|_| *b"ACGT".choose(&mut rng).unwrap()).collect()
}

/// Build a random transcript of 1 to `max_exons` exons. Exons never overlap (but
/// may touch) and are stored in shuffled order.
pub fn random_transcript(max_exons: usize) -> Transcript {
    let mut rng = thread_rng();
    let seqname = random_chrom();
    let strand = *[Some(Strand::Forward), Some(Strand::Reverse), None]
        .choose(&mut rng)
        .unwrap();
    let num_exons = rng.gen_range(1..=max_exons.max(1));

    let mut transcript = Transcript::new("T_random", "G_random");
    let mut next_start: Position = rng.gen_range(1..10_000);
    for _ in 0..num_exons {
        let len = rng.gen_range(MIN_EXON_LEN..=MAX_EXON_LEN);
        let end = next_start + len - 1;
        let exon = Exon::new(seqname.clone(), next_start, end, strand).unwrap();
        transcript.exons.push(exon);
        next_start = end + 1 + rng.gen_range(0..MAX_GAP_LEN);
    }
    transcript.exons.shuffle(&mut rng);
    transcript
}

/// Build a random GTF text of `num_transcripts` multi-exon transcripts, all on
/// one sequence of length `seqlen`, one gene per transcript.
pub fn random_gtf(num_transcripts: usize, seqname: &str, seqlen: Position) -> String {
    let mut rng = thread_rng();
    let mut gtf = String::new();
    for i in 0..num_transcripts {
        let strand = if rng.gen_bool(0.5) { "+" } else { "-" };
        let num_exons = rng.gen_range(1..=6);
        let mut start = rng.gen_range(1..seqlen / 2);
        for _ in 0..num_exons {
            let end = (start + rng.gen_range(MIN_EXON_LEN..=500)).min(seqlen);
            gtf.push_str(&format!(
                "{}\trandom\texon\t{}\t{}\t.\t{}\t.\tgene_id \"G{}\"; transcript_id \"T{}\"; gene_name \"RPL{}\";\n",
                seqname, start, end, strand, i, i, i
            ));
            start = end + 1 + rng.gen_range(1..1_000);
            if start >= seqlen {
                break;
            }
        }
    }
    gtf
}
