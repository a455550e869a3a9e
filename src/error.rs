use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError
{
    #[error("Invalid batch size {batch_size}: must be a positive integer")]
    InvalidConfiguration { batch_size: i64 },

    #[error("Failed to read record: {0}")]
    SourceRead(#[source] io::Error),

    #[error("Failed to write {destination}: {source}")]
    SinkWrite
    {
        destination: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot open input {}: {source}", .path.display())]
    OpenInput
    {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
