//! Range types: exons parsed from annotations and the introns derived from them.
//!
//! All ranges are 1-based and right-inclusive, as in GTF.

use std::fmt;
use std::ops::Range;

use crate::{error::IntronScanError, traits::GenericRange, Position, PositionOffset};

/// Nucleotide strand enum type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a GTF strand column. `.` and `?` denote an unknown strand and
    /// give `None`.
    pub fn from_gtf(column: &str) -> Result<Option<Strand>, IntronScanError> {
        match column {
            "+" => Ok(Some(Strand::Forward)),
            "-" => Ok(Some(Strand::Reverse)),
            "." | "?" => Ok(None),
            other => Err(IntronScanError::InvalidStrand(other.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// A single exon of a transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct Exon {
    pub seqname: String,
    pub start: Position,
    pub end: Position,
    pub strand: Option<Strand>,
}

impl Exon {
    /// Create a new exon, checking `1 <= start <= end`.
    pub fn new(
        seqname: impl Into<String>,
        start: Position,
        end: Position,
        strand: Option<Strand>,
    ) -> Result<Self, IntronScanError> {
        if start == 0 || end < start {
            return Err(IntronScanError::InvalidGenomicRange(start, end));
        }
        Ok(Self {
            seqname: seqname.into(),
            start,
            end,
            strand,
        })
    }
}

impl GenericRange for Exon {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

/// An intron, i.e. the gap between two consecutive exons of a transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intron {
    pub start: Position,
    pub end: Position,
}

impl Intron {
    /// Build the intron between two exons ordered by start position. Returns `None`
    /// if the exons touch or overlap, since there is no gap to splice out.
    pub fn between(upstream: &Exon, downstream: &Exon) -> Option<Self> {
        let start = upstream.end as PositionOffset + 1;
        let end = downstream.start as PositionOffset - 1;
        let length = end - start + 1;
        if length < 1 {
            return None;
        }
        Some(Self {
            start: start as Position,
            end: end as Position,
        })
    }

    pub fn len(&self) -> Position {
        self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl GenericRange for Intron {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

/// Convert a 1-based, right-inclusive range into a 0-based slice range, checking
/// it lies within a sequence of `length` basepairs.
pub fn try_range(
    start: Position,
    end: Position,
    length: Position,
) -> Result<Range<usize>, IntronScanError> {
    if start == 0 || end < start {
        return Err(IntronScanError::InvalidGenomicRange(start, end));
    }
    if end > length {
        return Err(IntronScanError::ExtractionOutOfRange {
            seqname: String::new(),
            start,
            end,
            length,
        });
    }
    Ok((start - 1) as usize..end as usize)
}
