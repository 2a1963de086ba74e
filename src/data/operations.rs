//! Summary statistics over numeric data.

use num_traits::{Float, ToPrimitive};
use std::iter::Sum;

/// Calculate the median.
pub fn median<F: Float + Sum>(numbers: &mut [F]) -> Option<F> {
    if numbers.is_empty() {
        return None;
    }
    let mid = numbers.len() / 2;
    let cmp = |a: &F, b: &F| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal);
    if numbers.len() % 2 == 0 {
        numbers.select_nth_unstable_by(mid - 1, cmp);
        let lower = numbers[mid - 1];
        numbers.select_nth_unstable_by(mid, cmp);
        let upper = numbers[mid];
        Some((lower + upper) / (F::one() + F::one()))
    } else {
        numbers.select_nth_unstable_by(mid, cmp);
        Some(numbers[mid])
    }
}

/// Calculate the arithmetic mean.
pub fn mean<F: Float + Sum>(numbers: &[F]) -> Option<F> {
    if numbers.is_empty() {
        return None;
    }
    let sum: F = numbers.iter().copied().sum();
    F::from(numbers.len()).map(|n| sum / n)
}

/// Convert integer-like data to `f64` for the statistics above.
pub fn to_f64_vec<T: ToPrimitive>(data: &[T]) -> Vec<f64> {
    data.iter().filter_map(ToPrimitive::to_f64).collect()
}
