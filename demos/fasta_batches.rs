// Example: Print the ids and total length of every batch of a FASTA file
//
// Run with: cargo run --example fasta_batches reads.fasta 10

use fastasplit::fasta;
use fastasplit::partition;
use std::env::args;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>>
{
    let filename = args().nth(1).ok_or("missing FASTA file")?;
    let batch_size: i64 = args().nth(2).unwrap_or_else(|| "1000".to_string()).parse()?;

    let reader = fasta::reader_from_path(Path::new(&filename))?;
    for (i, batch) in partition(fasta::fasta_iter(reader), batch_size)?.enumerate()
    {
        let batch = batch?;
        let bases: usize = batch.iter().map(|record| record.seq_len()).sum();
        let first = batch.first().map_or("", |record| record.id());
        let last = batch.last().map_or("", |record| record.id());
        println!("{}\t{}\t{}..{}\t{}", i + 1, batch.len(), first, last, bases);
    }
    Ok(())
}
