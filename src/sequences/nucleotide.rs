//! Types and methods for working with per-basepair nucleotide sequence data.
//!
//! Currently this requires the [`noodles::fasta`] module, but their API is unstable
//! and may be a source of future pain.

use bytes::Bytes;
use indexmap::IndexMap;
use noodles::fasta;
use std::fmt;
use std::io::{BufRead, Cursor};
use std::ops::Deref;
use std::path::PathBuf;
use std::str;

use crate::error::IntronScanError;
use crate::io::file::InputFile;
use crate::ranges::try_range;
use crate::Position;

/// A newtype around raw nucleotide [`Bytes`], for making it more
/// display and other operations more convenient.
#[derive(Clone, Debug, PartialEq)]
pub struct Nucleotides(Bytes);

impl fmt::Display for Nucleotides {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Deref for Nucleotides {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&fasta::record::Sequence> for Nucleotides {
    fn from(sequence: &fasta::record::Sequence) -> Self {
        Nucleotides(Bytes::from(sequence.as_ref().to_vec()))
    }
}

impl From<String> for Nucleotides {
    fn from(s: String) -> Self {
        Nucleotides(Bytes::from(s.into_bytes()))
    }
}

impl<'a> From<&'a str> for Nucleotides {
    fn from(s: &'a str) -> Self {
        Nucleotides(Bytes::from(s.as_bytes().to_vec()))
    }
}

impl Nucleotides {
    /// Get the length of the nucleotide sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether this is an empty object.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extract the 1-based, right-inclusive region `[start, end]`.
    pub fn region(&self, start: Position, end: Position) -> Result<&[u8], IntronScanError> {
        let range = try_range(start, end, self.len() as Position)?;
        Ok(&self.0[range])
    }
}

/// A whole genome's nucleotide sequences in memory, keyed by sequence name in
/// file order.
#[derive(Clone, Debug, Default)]
pub struct GenomeSequences {
    data: IndexMap<String, Nucleotides>,
}

impl GenomeSequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an entire (possibly gzipped) FASTA file into memory.
    ///
    /// The sequence name is the first whitespace-delimited token of the header
    /// line. If a name occurs twice the later record wins. Lines before the first
    /// header and blank lines are ignored. A missing file is reported as
    /// [`IntronScanError::MissingSequenceFile`].
    pub fn from_fasta(filepath: impl Into<PathBuf>) -> Result<Self, IntronScanError> {
        let input = InputFile::new(filepath);
        if !input.exists() {
            return Err(IntronScanError::MissingSequenceFile(input.filepath));
        }
        let records = record_lines(input.reader()?)?;
        let mut reader = fasta::Reader::new(Cursor::new(records));

        let mut sequences = GenomeSequences::new();
        for result in reader.records() {
            let record = result?;
            let name = String::from_utf8(record.definition().name().to_vec())?;
            sequences.insert(name, Nucleotides::from(record.sequence()));
        }
        Ok(sequences)
    }

    pub fn insert(&mut self, seqname: impl Into<String>, sequence: impl Into<Nucleotides>) {
        self.data.insert(seqname.into(), sequence.into());
    }

    /// Retrieve the [`Nucleotides`] for a particular sequence name.
    pub fn get_sequence(&self, seqname: &str) -> Result<&Nucleotides, IntronScanError> {
        self.data
            .get(seqname)
            .ok_or(IntronScanError::MissingSequence(seqname.to_string()))
    }

    pub fn contains(&self, seqname: &str) -> bool {
        self.data.contains_key(seqname)
    }

    /// Extract the 1-based, right-inclusive region `[start, end]` of a sequence.
    pub fn region(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<&[u8], IntronScanError> {
        let seq = self.get_sequence(seqname)?;
        seq.region(start, end).map_err(|e| match e {
            IntronScanError::ExtractionOutOfRange {
                start, end, length, ..
            } => IntronScanError::ExtractionOutOfRange {
                seqname: seqname.to_string(),
                start,
                end,
                length,
            },
            other => other,
        })
    }

    /// Iterate over sequence names and sequences in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Nucleotides)> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Keep only the lines from the first `>` header on, dropping blank lines and
/// trailing carriage returns.
fn record_lines(reader: impl BufRead) -> Result<Vec<u8>, IntronScanError> {
    let mut buffer = Vec::new();
    let mut in_records = false;
    for line in reader.split(b'\n') {
        let line = line?;
        let end = line
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |i| i + 1);
        let line = &line[..end];
        if line.starts_with(b">") {
            in_records = true;
        }
        if !in_records || line.is_empty() {
            continue;
        }
        buffer.extend_from_slice(line);
        buffer.push(b'\n');
    }
    Ok(buffer)
}

/// Reverse complement a nucleotide sequence.
///
/// The input is uppercased, then `A`/`T` and `C`/`G` are swapped and the order
/// reversed. `N` and any other character (e.g. IUPAC ambiguity codes) pass
/// through unchanged.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|base| match base.to_ascii_uppercase() {
            b'A' => b'T',
            b'T' => b'A',
            b'C' => b'G',
            b'G' => b'C',
            other => other,
        })
        .collect()
}
