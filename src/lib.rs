//! intronscan
//!
//! Intron and splice-site statistics from GTF gene models. Exons are grouped into
//! transcripts, introns are derived from the gaps between consecutive exons, and
//! (when a genome FASTA is available) each intron's boundary dinucleotides are
//! collected into splice motif frequencies.

pub mod annotation;
pub mod centromeres;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod gtfstats;
pub mod introns;
pub mod io;
pub mod plot;
pub mod ranges;
pub mod reporting;
pub mod sequences;
pub mod test_utilities;
pub mod traits;

/// 1-based genomic coordinate.
pub type Position = u64;

/// Signed coordinate arithmetic, e.g. for gaps between exons that may overlap.
pub type PositionOffset = i64;

pub const INTERNAL_ERROR_MESSAGE: &str = "
An internal error has occurred. Please file a GitHub issue with the input that triggered it.
";

pub mod prelude {
    pub use crate::annotation::{Annotation, GeneNameIndex, Transcript, UNKNOWN_GENE_NAME};
    pub use crate::config::IntronScanConfig;
    pub use crate::error::IntronScanError;
    pub use crate::introns::{analyze_transcripts, derive_introns, IntronAnalysis, SpliceCheck};
    pub use crate::ranges::{Exon, Intron, Strand};
    pub use crate::sequences::nucleotide::{reverse_complement, GenomeSequences, Nucleotides};
    pub use crate::traits::GenericRange;
}
