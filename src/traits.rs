//! Traits used by the intronscan library.
//!

use crate::Position;

/// The [`GenericRange`] trait defines common functionality for all range types.
///
/// Ranges in this crate follow GTF conventions: 1-based, with both `start` and
/// `end` inclusive.
pub trait GenericRange: Clone {
    fn start(&self) -> Position;
    fn end(&self) -> Position;

    /// The number of basepairs covered by this range.
    fn width(&self) -> Position {
        self.end() - self.start() + 1
    }
}
