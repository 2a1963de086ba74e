//! GTF Types and Functionality
//!
//! GTF is a nine column TSV format: sequence name, source, feature type, start,
//! end, score, strand, frame and a `;`-delimited attribute block of
//! `key "value"` pairs. Only the columns needed to build gene models are kept.
//!
//! No attempt is made to validate the full GTF grammar. Lines with fewer than nine
//! columns are reported as [`IntronScanError::MalformedLine`] so callers can skip
//! them, and coordinates are only parsed on demand (see [`GtfRecord::to_exon()`]),
//! so a `gene` line with odd coordinates still contributes its attributes.

use csv::{ByteRecord, Reader};
use indexmap::IndexMap;
use std::io::Read;
use std::path::PathBuf;

use super::build_tsv_reader;
use crate::error::IntronScanError;
use crate::io::file::InputFile;
use crate::ranges::{Exon, Strand};
use crate::Position;

/// The minimum number of columns of a GTF feature line.
pub const GTF_COLUMNS: usize = 9;

/// Attribute key/value pairs of a single GTF line, in order of appearance.
pub type Attributes = IndexMap<String, String>;

/// Split a GTF attribute block into key/value pairs.
///
/// Pairs are separated by `;` and each pair is a key, whitespace, then a value
/// which is usually double quoted. Pairs without a value, or with an empty value,
/// are dropped. If a key is repeated (e.g. `tag`), the first value is kept.
pub fn parse_attributes(block: &str) -> Attributes {
    let mut attributes = Attributes::new();
    for pair in block.split(';') {
        let pair = pair.trim();
        let Some((key, value)) = pair.split_once(char::is_whitespace) else {
            continue;
        };
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        if value.is_empty() {
            continue;
        }
        attributes
            .entry(key.to_string())
            .or_insert_with(|| value.to_string());
    }
    attributes
}

/// A single GTF feature line.
#[derive(Clone, Debug, PartialEq)]
pub struct GtfRecord {
    pub seqname: String,
    pub feature: String,
    pub start: String,
    pub end: String,
    pub strand: String,
    pub attributes: Attributes,
}

impl GtfRecord {
    /// Parse a single tab-delimited line.
    pub fn parse(line: &str) -> Result<Self, IntronScanError> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        Self::from_fields(&fields, line)
    }

    fn from_fields(fields: &[&str], line: &str) -> Result<Self, IntronScanError> {
        if fields.len() < GTF_COLUMNS {
            return Err(IntronScanError::MalformedLine(line.to_string()));
        }
        Ok(Self {
            seqname: fields[0].to_string(),
            feature: fields[2].to_string(),
            start: fields[3].to_string(),
            end: fields[4].to_string(),
            strand: fields[6].to_string(),
            attributes: parse_attributes(fields[8]),
        })
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn gene_id(&self) -> Option<&str> {
        self.attribute("gene_id")
    }

    pub fn transcript_id(&self) -> Option<&str> {
        self.attribute("transcript_id")
    }

    pub fn gene_name(&self) -> Option<&str> {
        self.attribute("gene_name")
    }

    /// Parse the coordinate and strand columns into an [`Exon`]. Any failure is
    /// reported as [`IntronScanError::MalformedLine`].
    pub fn to_exon(&self) -> Result<Exon, IntronScanError> {
        let malformed = || {
            IntronScanError::MalformedLine(format!(
                "{}\t{}\t{}\t{}\t{}",
                self.seqname, self.feature, self.start, self.end, self.strand
            ))
        };
        let start: Position = self.start.trim().parse().map_err(|_| malformed())?;
        let end: Position = self.end.trim().parse().map_err(|_| malformed())?;
        let strand = Strand::from_gtf(self.strand.trim()).map_err(|_| malformed())?;
        Exon::new(self.seqname.clone(), start, end, strand).map_err(|_| malformed())
    }
}

/// A parsing iterator over the feature lines of a (possibly gzipped) GTF file.
///
/// Comment and empty lines are skipped. Lines with too few columns are yielded as
/// [`IntronScanError::MalformedLine`] errors, all other errors are I/O related.
pub struct GtfIterator {
    reader: Reader<Box<dyn Read>>,
    record: ByteRecord,
}

impl std::fmt::Debug for GtfIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GtfIterator").finish_non_exhaustive()
    }
}

impl GtfIterator {
    /// Create a new GTF parsing iterator. A missing file is reported as
    /// [`IntronScanError::MissingInputFile`].
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, IntronScanError> {
        let input = InputFile::new(filepath);
        if !input.exists() {
            return Err(IntronScanError::MissingInputFile(input.filepath));
        }
        let reader = build_tsv_reader(&input)?;
        Ok(Self {
            reader,
            record: ByteRecord::new(),
        })
    }
}

impl Iterator for GtfIterator {
    type Item = Result<GtfRecord, IntronScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_byte_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let fields: Vec<String> = self
                    .record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect();
                let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                let line = fields.join("\t");
                Some(GtfRecord::from_fields(&fields, &line))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
