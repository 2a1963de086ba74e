//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod parsers;
pub mod tsv;

pub use file::{InputFile, OutputFile};
pub use parsers::{GtfIterator, GtfRecord};
pub use tsv::{read_lengths, write_lengths, write_tsv_table};
