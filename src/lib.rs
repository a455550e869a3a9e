//! Split a FASTA file into files of at most a fixed number of records.
//!
//! Records are read lazily, grouped into batches by [`batch::Batches`] and each
//! batch is written to its own file by a [`sink::BatchSink`]. Only one batch
//! is held in memory at a time.
//!
//! ```no_run
//! use fastasplit::{fasta, split, BatchSize, FastaFileSink};
//! use std::path::Path;
//!
//! let reader = fasta::reader_from_path(Path::new("reads.fasta")).unwrap();
//! let mut sink = FastaFileSink::new("shards");
//! let summary = split(fasta::fasta_iter(reader), BatchSize::new(1000).unwrap(), &mut sink).unwrap();
//! println!("{} files", summary.batches);
//! ```

pub mod batch;
pub mod cli;
pub mod error;
pub mod fasta;
pub mod sink;
pub mod split;

pub use batch::{partition, BatchSize, Batches, Batching};
pub use error::SplitError;
pub use fasta::FastARecord;
pub use sink::{BatchSink, FastaFileSink};
pub use split::{split, SplitSummary};
