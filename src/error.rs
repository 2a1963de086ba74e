//! The [`IntronScanError`] `enum` definition and error messages.
//!
use crate::Position;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The [`IntronScanError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum IntronScanError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV reading/writing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GTF annotation file '{}' not found.", .0.display())]
    MissingInputFile(PathBuf),
    #[error("FASTA file '{}' not found.", .0.display())]
    MissingSequenceFile(PathBuf),

    // File parsing related errors
    #[error("Integer parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),
    #[error("FASTA sequence name is not valid UTF-8: {0}")]
    SequenceNameError(#[from] FromUtf8Error),
    #[error("Malformed annotation line: {0}")]
    MalformedLine(String),
    #[error("Invalid strand '{0}': must be either '+', '-', '.' or '?'")]
    InvalidStrand(String),

    // Range related errors
    #[error("Range invalid: start ({0}) must be at least 1 and no greater than end ({1})")]
    InvalidGenomicRange(Position, Position),
    #[error("Range [{start}, {end}] is out of range for sequence '{seqname}' of length {length}")]
    ExtractionOutOfRange {
        seqname: String,
        start: Position,
        end: Position,
        length: Position,
    },
    #[error("Sequence name '{0}' is not in the loaded sequences")]
    MissingSequence(String),

    // Plotting
    #[error("Histogram rendering is unavailable; rebuild with `--features plots`.")]
    NoPlottingCapability,
    #[error("Histogram rendering failed: {0}")]
    PlotError(String),
}
