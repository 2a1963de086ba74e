//! Command functions that implement each of the `intronscan` subcommands.

use std::path::Path;

use crate::{
    annotation::Annotation,
    centromeres::{scan_genome, CentromereScan},
    config::IntronScanConfig,
    data::operations::{mean, median, to_f64_vec},
    error::IntronScanError,
    gtfstats::AnnotationStats,
    introns::analyze_transcripts,
    io::{write_lengths, write_tsv_table},
    plot::{HistogramData, HistogramRenderer},
    reporting::{CommandOutput, IntronReport, Report},
    sequences::nucleotide::GenomeSequences,
};

/// Load the genome if it exists and can be read. A missing or unreadable genome
/// is not fatal: motif checks are skipped and the report says so.
fn load_genome(path: &Path, report: &mut Report) -> Option<GenomeSequences> {
    let message = match GenomeSequences::from_fasta(path) {
        Ok(genome) => {
            log::info!("loaded {} sequences from '{}'", genome.len(), path.display());
            return Some(genome);
        }
        Err(IntronScanError::MissingSequenceFile(path)) => format!(
            "genome FASTA '{}' not found, splice motifs were not checked",
            path.display()
        ),
        Err(e) => format!(
            "genome FASTA '{}' could not be read ({}), splice motifs were not checked",
            path.display(),
            e
        ),
    };
    log::warn!("{}", message);
    report.add_issue(message);
    None
}

/// Derive introns from the annotation, check splice motifs, write the length
/// artifact (and per-intron table, if configured), render the histogram, and
/// return the text report.
pub fn intronscan_introns(
    config: &IntronScanConfig,
    renderer: &dyn HistogramRenderer,
) -> Result<CommandOutput<IntronReport>, IntronScanError> {
    let mut report = Report::new();

    let annotation = Annotation::from_gtf(&config.annotation)?;
    log::info!(
        "parsed {} exons in {} transcripts from '{}'",
        annotation.num_exons(),
        annotation.len(),
        config.annotation.display()
    );
    if annotation.malformed_lines > 0 {
        report.add_issue(format!(
            "{} malformed annotation lines were skipped",
            annotation.malformed_lines
        ));
    }

    let genome = load_genome(&config.genome, &mut report);
    let analysis = analyze_transcripts(&annotation, genome.as_ref(), &config.watch_list);
    log::info!(
        "derived {} introns from {} multi-exon transcripts",
        analysis.num_introns(),
        analysis.multi_exon_transcripts
    );
    if analysis.out_of_range > 0 {
        report.add_issue(format!(
            "{} introns lie outside their sequence and have no splice motif",
            analysis.out_of_range
        ));
    }
    if genome.is_some() && analysis.unchecked > 0 {
        report.add_issue(format!(
            "{} introns are on sequences absent from the genome FASTA",
            analysis.unchecked
        ));
    }

    write_lengths(&config.lengths_output, &analysis.lengths)?;
    log::info!(
        "wrote {} intron lengths to '{}'",
        analysis.num_introns(),
        config.lengths_output.display()
    );

    if let Some(introns_output) = &config.introns_output {
        write_tsv_table(introns_output, &analysis.records)?;
        log::info!("wrote intron table to '{}'", introns_output.display());
    }

    if !analysis.lengths.is_empty() {
        let mut values = to_f64_vec(&analysis.lengths);
        let data = HistogramData {
            lengths: &analysis.lengths,
            mean: mean(&values).unwrap_or(0.0),
            median: median(&mut values).unwrap_or(0.0),
            bins: config.histogram_bins,
        };
        match renderer.render(&data, &config.plot_output) {
            Ok(()) => log::info!("wrote histogram to '{}'", config.plot_output.display()),
            Err(e) => {
                log::warn!("histogram not rendered: {}", e);
                report.add_issue(format!("histogram not rendered: {}", e));
            }
        }
    }

    let intron_report = IntronReport::new(&analysis, config.top_motifs, config.culprit_limit);
    Ok(CommandOutput::new(intron_report, report))
}

/// Gene, transcript and exon statistics of a GTF file.
pub fn intronscan_gtf_stats(
    annotation: impl AsRef<Path>,
) -> Result<CommandOutput<AnnotationStats>, IntronScanError> {
    let mut report = Report::new();
    let stats = AnnotationStats::from_gtf(annotation.as_ref())?;
    if stats.malformed_lines > 0 {
        report.add_issue(format!(
            "{} malformed annotation lines were skipped",
            stats.malformed_lines
        ));
    }
    Ok(CommandOutput::new(stats, report))
}

/// Scan a genome FASTA for centromere motifs. Unlike `introns`, a missing FASTA
/// is an error here.
pub fn intronscan_centromeres(
    genome: impl AsRef<Path>,
) -> Result<CommandOutput<CentromereScan>, IntronScanError> {
    let mut report = Report::new();
    let genome = GenomeSequences::from_fasta(genome.as_ref())?;
    let scan = scan_genome(&genome);
    for seqname in &scan.skipped {
        log::info!("skipping mitochondrial sequence '{}'", seqname);
    }
    if scan.hits.is_empty() {
        report.add_issue("no centromere motifs found".to_string());
    }
    Ok(CommandOutput::new(scan, report))
}
