//! Drive a record source through the batcher into a sink.

use crate::batch::BatchSize;
use crate::batch::Batching;
use crate::error::SplitError;
use crate::sink::BatchSink;
use log::debug;
use log::info;
use std::io;

/// What a completed split produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitSummary
{
    /// Records written over all batches
    pub records: usize,
    /// Number of batches, equal to the number of destinations
    pub batches: usize,
    /// Destinations in the order they were written
    pub destinations: Vec<String>,
}

/// Partition `source` into batches of `batch_size` and write batch `n`
/// (starting at 1) to destination `n` of `sink`.
///
/// Stops at the first error. Destinations written before the failure are
/// left in place; the batch being collected when the source fails is not
/// written.
///
/// # Returns
///
/// * `Ok(SplitSummary)` - Everything was written
/// * `Err(SplitError::SourceRead)` - The source failed
/// * `Err(SplitError::SinkWrite)` - A destination could not be written
pub fn split<I, T, S>(source: I, batch_size: BatchSize, sink: &mut S) -> Result<SplitSummary, SplitError>
where
    I: IntoIterator<Item = io::Result<T>>,
    S: BatchSink<T> + ?Sized,
{
    let mut summary = SplitSummary::default();
    let batches = source.into_iter().batches(batch_size);
    debug!("Collecting up to {} records per batch", batches.batch_size());
    for (offset, batch) in batches.enumerate()
    {
        let batch = batch.map_err(SplitError::SourceRead)?;
        let index = offset + 1;
        let destination = sink.destination(index);
        sink.write_batch(index, &batch)
            .map_err(|source| SplitError::SinkWrite {
                destination: destination.clone(),
                source,
            })?;
        debug!("Wrote batch {} ({} records) to {}", index, batch.len(), destination);

        summary.records += batch.len();
        summary.batches += 1;
        summary.destinations.push(destination);
    }
    info!("Wrote {} records in {} batches", summary.records, summary.batches);
    Ok(summary)
}
