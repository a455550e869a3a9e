// Example: Split a FASTA file into files of 100 records each
//
// Run with: cargo run --example fasta_split reads.fasta out_dir

use fastasplit::fasta;
use fastasplit::{split, BatchSize, FastaFileSink};
use std::env::args;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>>
{
    let filename = args().nth(1).ok_or("missing FASTA file")?;
    let out_dir = args().nth(2).unwrap_or_else(|| ".".to_string());

    let reader = fasta::reader_from_path(Path::new(&filename))?;
    let mut sink = FastaFileSink::new(&out_dir).prefix("chunk").line_width(80);
    let summary = split(fasta::fasta_iter(reader), BatchSize::new(100)?, &mut sink)?;

    for destination in &summary.destinations
    {
        println!("{}", destination);
    }
    println!("{} records in {} files", summary.records, summary.batches);
    Ok(())
}
