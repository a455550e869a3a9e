//! Command line interface.

use crate::batch::BatchSize;
use crate::error::SplitError;
use crate::fasta::fasta_iter;
use crate::fasta::reader_from_path;
use crate::sink::FastaFileSink;
use crate::sink::DEFAULT_LINE_WIDTH;
use crate::split::split;
use crate::split::SplitSummary;
use clap::ArgAction;
use clap::Parser;
use log::debug;
use std::path::PathBuf;

/// Split a FASTA file into files containing at most N records each.
#[derive(Parser, Debug)]
#[command(name = "fastasplit", version, about)]
pub struct Args
{
    /// Input FASTA file, plain or gzip-compressed ("-" for stdin)
    #[arg(value_name = "FASTA_FILE")]
    pub fasta_file: PathBuf,

    /// Split into batches of N records
    #[arg(short, long, value_name = "N", default_value_t = 1000, allow_negative_numbers = true)]
    pub batch_size: i64,

    /// Directory the batch files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Output files are named <PREFIX>_<n>.<EXTENSION>
    #[arg(short, long, default_value = "group")]
    pub prefix: String,

    #[arg(long, default_value = "fasta")]
    pub extension: String,

    /// Residues per output line, 0 keeps the input line layout
    #[arg(short = 'w', long, value_name = "W", default_value_t = DEFAULT_LINE_WIDTH)]
    pub line_width: usize,

    /// Gzip the output files
    #[arg(short = 'z', long)]
    pub compress: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args
{
    /// Log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str
    {
        match self.verbose
        {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// A validated split run.
#[derive(Debug, Clone)]
pub struct SplitConfig
{
    pub input: PathBuf,
    pub batch_size: BatchSize,
    pub sink: FastaFileSink,
}

impl TryFrom<&Args> for SplitConfig
{
    type Error = SplitError;

    fn try_from(args: &Args) -> Result<Self, Self::Error>
    {
        let batch_size = BatchSize::try_from(args.batch_size)?;
        let sink = FastaFileSink::new(&args.out_dir)
            .prefix(&args.prefix)
            .extension(&args.extension)
            .line_width(args.line_width)
            .compress(args.compress);
        Ok(SplitConfig {
            input: args.fasta_file.clone(),
            batch_size,
            sink,
        })
    }
}

/// The line printed before splitting starts.
pub fn status_line(config: &SplitConfig) -> String
{
    format!(
        "Splitting {} into files containing {} sequences each.",
        config.input.display(),
        config.batch_size
    )
}

/// Open the input, print the status line and split.
///
/// The output directory is created if it does not exist.
pub fn run(config: &SplitConfig) -> Result<SplitSummary, SplitError>
{
    let open_error = |source| SplitError::OpenInput {
        path: config.input.clone(),
        source,
    };
    let reader = reader_from_path(&config.input).map_err(open_error)?;

    println!("{}", status_line(config));

    let mut sink = config.sink.clone();
    std::fs::create_dir_all(sink.out_dir()).map_err(|source| SplitError::SinkWrite {
        destination: sink.out_dir().display().to_string(),
        source,
    })?;
    debug!("Writing batches to {}", sink.out_dir().display());

    split(fasta_iter(reader), config.batch_size, &mut sink)
}
