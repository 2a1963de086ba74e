use std::path::PathBuf;

use clap::{Parser, Subcommand};
use intronscan::{
    commands::{intronscan_centromeres, intronscan_gtf_stats, intronscan_introns},
    config::{
        IntronScanConfig, DEFAULT_ANNOTATION, DEFAULT_CULPRIT_LIMIT, DEFAULT_GENOME,
        DEFAULT_HISTOGRAM_BINS, DEFAULT_LENGTHS_OUTPUT, DEFAULT_PLOT_OUTPUT, DEFAULT_TOP_MOTIFS,
        DEFAULT_WATCH_LIST,
    },
    error::IntronScanError,
    io::OutputFile,
    plot::DefaultRenderer,
    reporting::Report,
};

const INFO: &str = "\
intronscan: intron lengths and splice-site motifs from GTF gene models
usage: intronscan [--help] <subcommand>

Subcommands:

  introns: derive introns, check splice motifs and summarize lengths.
  gtf-stats: count genes, transcripts and exons of an annotation.
  centromeres: scan a genome for point-centromere motifs.

";

#[derive(Parser)]
#[clap(name = "intronscan")]
#[clap(about = INFO)]
struct Cli {
    /// increase log verbosity (-d for debug, -dd for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Introns {
        /// the GTF annotation
        #[arg(long, default_value = DEFAULT_ANNOTATION)]
        gtf: PathBuf,

        /// the genome FASTA (splice motifs are skipped if it does not exist)
        #[arg(long, default_value = DEFAULT_GENOME)]
        genome: PathBuf,

        /// output file of intron lengths, one per line
        #[arg(long, default_value = DEFAULT_LENGTHS_OUTPUT)]
        lengths: PathBuf,

        /// output file of the length histogram
        #[arg(long, default_value = DEFAULT_PLOT_OUTPUT)]
        plot: PathBuf,

        /// an optional TSV table of every intron
        #[arg(long)]
        introns: Option<PathBuf>,

        /// comma-separated gene name tokens to report conserved introns for
        #[arg(long, value_delimiter = ',')]
        watch: Option<Vec<String>>,

        /// maximum number of watched transcripts to list
        #[arg(long, default_value_t = DEFAULT_CULPRIT_LIMIT)]
        limit: usize,

        /// number of splice motifs to list
        #[arg(long, default_value_t = DEFAULT_TOP_MOTIFS)]
        top: usize,

        /// number of histogram bins
        #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
        bins: usize,
    },
    GtfStats {
        /// the GTF annotation
        #[arg(default_value = DEFAULT_ANNOTATION)]
        gtf: PathBuf,
    },
    Centromeres {
        /// the genome FASTA
        #[arg(default_value = DEFAULT_GENOME)]
        genome: PathBuf,
    },
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_issues(report: &Report) {
    for issue in report.issues() {
        eprintln!("Note: {}", issue);
    }
}

fn run() -> Result<(), IntronScanError> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Some(Commands::Introns {
            gtf,
            genome,
            lengths,
            plot,
            introns,
            watch,
            limit,
            top,
            bins,
        }) => {
            let watch = watch.unwrap_or_else(|| {
                DEFAULT_WATCH_LIST.iter().map(|s| s.to_string()).collect()
            });
            let mut config = IntronScanConfig::new(gtf, genome).with_watch_list(&watch);
            config.lengths_output = lengths;
            config.plot_output = plot;
            config.introns_output = introns;
            config.culprit_limit = limit;
            config.top_motifs = top;
            config.histogram_bins = bins;

            let output = intronscan_introns(&config, &DefaultRenderer)?;
            print_issues(&output.report);
            let mut writer = OutputFile::new_stdout(None).writer()?;
            output.value.write_to(&mut writer)?;
        }
        Some(Commands::GtfStats { gtf }) => {
            let output = intronscan_gtf_stats(gtf)?;
            print_issues(&output.report);
            print!("{}", output.value);
        }
        Some(Commands::Centromeres { genome }) => {
            let output = intronscan_centromeres(genome)?;
            print_issues(&output.report);
            print!("{}", output.value);
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
