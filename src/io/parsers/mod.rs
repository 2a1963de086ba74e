//! Parsing iterators for annotation formats.
//!
//! Under the hood, this uses the [`csv`] crate configured for headerless,
//! tab-delimited, unquoted input, which matches how GTF files are written in
//! practice (attribute values carry literal double quotes).

pub mod gtf;

pub use gtf::{parse_attributes, Attributes, GtfIterator, GtfRecord};

use csv::{Reader, ReaderBuilder};
use std::io::Read;

use crate::error::IntronScanError;
use crate::io::file::InputFile;

/// Build a TSV reader which ignores comment lines (those starting with `#`) and
/// empty lines, tolerates ragged rows, and works on gzip-compressed files.
pub fn build_tsv_reader(input: &InputFile) -> Result<Reader<Box<dyn Read>>, IntronScanError> {
    let stream: Box<dyn Read> = Box::new(input.reader()?);
    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(stream);
    Ok(reader)
}
