//! Writing batches of records to their own FASTA files.

use crate::fasta::FastARecord;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Residues per line when re-wrapping sequences.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// A destination for batches.
///
/// Each call to `write_batch` persists one batch to a new destination
/// identified by its 1-based `index`. A batch is never split across
/// destinations and a destination never holds two batches.
pub trait BatchSink<T>
{
    /// Name of the destination batch `index` is written to.
    fn destination(&self, index: usize) -> String;

    /// Persist `batch` as destination `index`.
    fn write_batch(&mut self, index: usize, batch: &[T]) -> io::Result<()>;
}

/// Writes batch `n` to `<out_dir>/<prefix>_<n>.<extension>`.
///
/// # Example
///
/// ```
/// use fastasplit::sink::{BatchSink, FastaFileSink};
///
/// let sink = FastaFileSink::new("out").prefix("shard").line_width(80);
/// assert_eq!(sink.destination(3), format!("out{}shard_3.fasta", std::path::MAIN_SEPARATOR));
/// ```
#[derive(Debug, Clone)]
pub struct FastaFileSink
{
    out_dir: PathBuf,
    prefix: String,
    extension: String,
    line_width: usize,
    compress: bool,
}

impl FastaFileSink
{
    /// A sink writing `group_<n>.fasta` files into `out_dir`.
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self
    {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            prefix: "group".to_string(),
            extension: "fasta".to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            compress: false,
        }
    }

    pub fn prefix(mut self, prefix: &str) -> Self
    {
        self.prefix = prefix.to_string();
        self
    }

    pub fn extension(mut self, extension: &str) -> Self
    {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Residues per output line, `0` keeps the input layout.
    pub fn line_width(mut self, line_width: usize) -> Self
    {
        self.line_width = line_width;
        self
    }

    /// Gzip the output files, appending `.gz` to their names.
    pub fn compress(mut self, compress: bool) -> Self
    {
        self.compress = compress;
        self
    }

    pub fn out_dir(&self) -> &Path
    {
        &self.out_dir
    }

    /// Path of the file batch `index` is written to.
    pub fn path_for(&self, index: usize) -> PathBuf
    {
        let mut name = format!("{}_{}", self.prefix, index);
        if !self.extension.is_empty()
        {
            name.push('.');
            name.push_str(&self.extension);
        }
        if self.compress
        {
            name.push_str(".gz");
        }
        self.out_dir.join(name)
    }

    fn write_records(&self, writer: &mut dyn Write, batch: &[FastARecord]) -> io::Result<()>
    {
        for record in batch
        {
            write_record(writer, record, self.line_width)?;
        }
        Ok(())
    }
}

impl BatchSink<FastARecord> for FastaFileSink
{
    fn destination(&self, index: usize) -> String
    {
        self.path_for(index).display().to_string()
    }

    fn write_batch(&mut self, index: usize, batch: &[FastARecord]) -> io::Result<()>
    {
        let file = File::create(self.path_for(index))?;
        if self.compress
        {
            let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
            self.write_records(&mut writer, batch)?;
            writer.finish()?.flush()
        }
        else
        {
            let mut writer = BufWriter::new(file);
            self.write_records(&mut writer, batch)?;
            writer.flush()
        }
    }
}

/// Serialize one record as FASTA.
///
/// The header is written as `>` followed by the record name. The sequence is
/// wrapped at `line_width` residues per line, spaces removed; with
/// `line_width == 0` the record's own lines are written unchanged. A record
/// without sequence is written as its header line alone.
pub fn write_record(writer: &mut dyn Write, record: &FastARecord, line_width: usize) -> io::Result<()>
{
    writer.write_all(b">")?;
    writer.write_all(record.name().as_bytes())?;
    writer.write_all(b"\n")?;
    if line_width == 0
    {
        for line in record.lines()
        {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }
    else
    {
        for chunk in record.seq().chunks(line_width)
        {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}
