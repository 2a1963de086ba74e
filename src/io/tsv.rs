//! Plain text and TSV output of analysis results.

use csv::WriterBuilder;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::IntronScanError;
use crate::io::file::{InputFile, OutputFile};
use crate::Position;

/// Write intron lengths one per line, with no header. The file is written even
/// when there are no lengths, so its line count always equals the intron count.
pub fn write_lengths(output: impl AsRef<Path>, lengths: &[Position]) -> Result<(), IntronScanError> {
    let mut writer = OutputFile::new(output.as_ref(), None).writer()?;
    for length in lengths {
        writeln!(writer, "{}", length)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read back a file written by [`write_lengths()`]. Blank lines are ignored.
pub fn read_lengths(input: impl AsRef<Path>) -> Result<Vec<Position>, IntronScanError> {
    let reader = InputFile::new(input.as_ref()).reader()?;
    let mut lengths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        lengths.push(line.parse()?);
    }
    Ok(lengths)
}

/// Write serializable rows as a headed TSV table.
pub fn write_tsv_table<T: Serialize>(
    output: impl AsRef<Path>,
    rows: &[T],
) -> Result<(), IntronScanError> {
    let stream = OutputFile::new(output.as_ref(), None).writer()?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(stream);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introns::IntronRecord;

    #[test]
    fn test_lengths_roundtrip_and_line_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lengths.txt");
        write_lengths(&path, &[99, 1, 5000]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "99\n1\n5000\n");
        assert_eq!(read_lengths(&path).unwrap(), vec![99, 1, 5000]);
    }

    #[test]
    fn test_empty_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lengths.txt");
        write_lengths(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        assert!(read_lengths(&path).unwrap().is_empty());
    }

    #[test]
    fn test_intron_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("introns.tsv");
        let rows = vec![
            IntronRecord {
                transcript_id: "T1".to_string(),
                gene_id: "G1".to_string(),
                gene_name: "ACT1".to_string(),
                seqname: "chrA".to_string(),
                start: 201,
                end: 299,
                strand: "+".to_string(),
                length: 99,
                motif: Some("GT-AG".to_string()),
            },
            IntronRecord {
                transcript_id: "T2".to_string(),
                gene_id: "G2".to_string(),
                gene_name: "Unknown".to_string(),
                seqname: "chrB".to_string(),
                start: 10,
                end: 19,
                strand: ".".to_string(),
                length: 10,
                motif: None,
            },
        ];
        write_tsv_table(&path, &rows).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "transcript_id\tgene_id\tgene_name\tseqname\tstart\tend\tstrand\tlength\tmotif"
        );
        assert_eq!(lines[1], "T1\tG1\tACT1\tchrA\t201\t299\t+\t99\tGT-AG");
        assert_eq!(lines[2], "T2\tG2\tUnknown\tchrB\t10\t19\t.\t10\t");
    }
}
