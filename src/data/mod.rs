//! Aggregation of derived introns into length statistics and splice motif
//! frequencies.

pub mod operations;

use indexmap::IndexMap;

use self::operations::{mean, median, to_f64_vec};
use crate::Position;

/// Count, mean, median and range of a set of intron lengths.
#[derive(Clone, Debug, PartialEq)]
pub struct LengthSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: Position,
    pub max: Position,
}

impl LengthSummary {
    /// Summarize `lengths`; `None` if there are none.
    pub fn from_lengths(lengths: &[Position]) -> Option<Self> {
        let min = *lengths.iter().min()?;
        let max = *lengths.iter().max()?;
        let mut values = to_f64_vec(lengths);
        let mean = mean(&values)?;
        let median = median(&mut values)?;
        Some(Self {
            count: lengths.len(),
            mean,
            median,
            min,
            max,
        })
    }
}

/// A splice motif's count and its share of all motif observations.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifFrequency {
    pub motif: String,
    pub count: usize,
    pub percent: f64,
}

/// All motif frequencies, most frequent first. Motifs with equal counts keep
/// their order of first observation.
pub fn motif_frequencies(counts: &IndexMap<String, usize>) -> Vec<MotifFrequency> {
    let total: usize = counts.values().sum();
    let mut frequencies: Vec<MotifFrequency> = counts
        .iter()
        .map(|(motif, &count)| MotifFrequency {
            motif: motif.clone(),
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies
}
