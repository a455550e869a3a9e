//! Fixed-size batching over a lazy, fallible record source.
//!
//! `Batches` pulls records one at a time and yields them grouped in batches
//! of `batch_size`, the last batch possibly shorter. Memory use is bounded by
//! one batch regardless of the length of the input.

use crate::error::SplitError;
use std::fmt;

/// Upper bound on the capacity reserved up front for a batch.
const MAX_PREALLOC: usize = 4096;

/// Maximum number of records per batch. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSize(usize);

impl BatchSize
{
    pub const DEFAULT: BatchSize = BatchSize(1000);

    /// Validate a batch size.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchSize)` - If `size >= 1`
    /// * `Err(SplitError::InvalidConfiguration)` - If `size == 0`
    pub fn new(size: usize) -> Result<Self, SplitError>
    {
        if size == 0
        {
            return Err(SplitError::InvalidConfiguration { batch_size: 0 });
        }
        Ok(BatchSize(size))
    }

    pub fn get(self) -> usize
    {
        self.0
    }
}

impl Default for BatchSize
{
    fn default() -> Self
    {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for BatchSize
{
    type Error = SplitError;

    fn try_from(size: i64) -> Result<Self, Self::Error>
    {
        match usize::try_from(size)
        {
            Ok(size) if size > 0 => Ok(BatchSize(size)),
            _ => Err(SplitError::InvalidConfiguration { batch_size: size }),
        }
    }
}

impl fmt::Display for BatchSize
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

/// Iterator adapter grouping the records of a fallible source into batches.
///
/// Every yielded batch is non-empty and holds at most `batch_size` records,
/// in source order. A source error is yielded as soon as it is pulled; the
/// records collected for the current batch are dropped and the iterator is
/// exhausted from then on.
pub struct Batches<I>
{
    source: I,
    size: usize,
    done: bool,
}

impl<I> Batches<I>
{
    pub fn new(source: I, batch_size: BatchSize) -> Self
    {
        Self {
            source,
            size: batch_size.get(),
            done: false,
        }
    }

    pub fn batch_size(&self) -> usize
    {
        self.size
    }
}

impl<I, T, E> Iterator for Batches<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = Result<Vec<T>, E>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.done
        {
            return None;
        }
        let mut batch = Vec::with_capacity(self.size.min(MAX_PREALLOC));
        while batch.len() < self.size
        {
            match self.source.next()
            {
                Some(Ok(record)) => batch.push(record),
                Some(Err(e)) =>
                {
                    self.done = true;
                    return Some(Err(e));
                }
                None =>
                {
                    self.done = true;
                    break;
                }
            }
        }
        if batch.is_empty()
        {
            None
        }
        else
        {
            Some(Ok(batch))
        }
    }
}

/// Extension trait adding `.batches()` to every fallible iterator.
pub trait Batching: Iterator + Sized
{
    /// Group into batches of at most `batch_size` records.
    fn batches(self, batch_size: BatchSize) -> Batches<Self>
    {
        Batches::new(self, batch_size)
    }
}

impl<I, T, E> Batching for I where I: Iterator<Item = Result<T, E>> {}

/// Partition `source` into batches of `batch_size` records.
///
/// The size is checked before the source is touched.
///
/// # Arguments
///
/// * `source` - Records in input order, `Err` for a failed read
/// * `batch_size` - Maximum number of records per batch
///
/// # Returns
///
/// * `Ok(Batches)` - The lazy sequence of batches
/// * `Err(SplitError::InvalidConfiguration)` - If `batch_size < 1`
///
/// # Example
///
/// ```
/// use fastasplit::batch::partition;
///
/// let records = (1..=5).map(Ok::<_, std::io::Error>);
/// let sizes: Vec<usize> = partition(records, 2)
///     .unwrap()
///     .map(|batch| batch.unwrap().len())
///     .collect();
/// assert_eq!(sizes, vec![2, 2, 1]);
/// ```
pub fn partition<I, T, E>(source: I, batch_size: i64) -> Result<Batches<I::IntoIter>, SplitError>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    let batch_size = BatchSize::try_from(batch_size)?;
    Ok(Batches::new(source.into_iter(), batch_size))
}
