//! Functionality for working with per-basepair data.
//!
//! The whole genome is loaded into memory as [`nucleotide::GenomeSequences`], which
//! supports region extraction by 1-based coordinates; [`nucleotide::reverse_complement`]
//! orients minus-strand regions.

pub mod nucleotide;
