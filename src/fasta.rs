//! FASTA record reader.
//!
//! Records are read one at a time from any `BufRead`, reusing the record's
//! buffers. `fasta_iter` wraps this into a lazy, fallible iterator which is
//! the record source the batcher consumes.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A single FASTA record.
///
/// `name` holds the header line without the leading `>` and without trailing
/// whitespace. `seq` holds the payload lines as laid out in the file, each
/// right-trimmed, joined by `\n`, with no trailing newline.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FastARecord
{
    name: String,
    seq: Vec<u8>,
}

impl FastARecord
{
    /// Build a record from a header (without `>`) and an unwrapped sequence.
    pub fn new(name: &str, seq: &[u8]) -> Self
    {
        Self {
            name: name.to_string(),
            seq: seq.to_vec(),
        }
    }

    /// The full header line.
    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// The identifier: header up to the first space.
    pub fn id(&self) -> &str
    {
        self.name.split_once(' ').map_or(self.name.as_str(), |(id, _)| id)
    }

    /// The description: header after the first space, empty if there is none.
    pub fn desc(&self) -> &str
    {
        self.name.split_once(' ').map_or("", |(_, desc)| desc)
    }

    /// The payload with its original line breaks.
    pub fn seq_raw(&self) -> &[u8]
    {
        &self.seq
    }

    /// The residues: payload with line breaks and spaces removed.
    pub fn seq(&self) -> Vec<u8>
    {
        let mut seq = Vec::with_capacity(self.seq.len());
        let mut start = 0;
        memchr::memchr2_iter(b'\n', b' ', &self.seq).for_each(|end| {
            seq.extend_from_slice(&self.seq[start..end]);
            start = end + 1; // skip '\n' or ' '
        });
        seq.extend_from_slice(&self.seq[start..]);
        seq
    }

    /// Number of residues, not counting line breaks and spaces.
    pub fn seq_len(&self) -> usize
    {
        self.seq.len() - memchr::memchr2_iter(b'\n', b' ', &self.seq).count()
    }

    /// The payload lines as they appeared in the input, right-trimmed.
    pub fn lines(&self) -> Vec<&[u8]>
    {
        if self.seq.is_empty()
        {
            return Vec::new();
        }
        let mut line_start = 0;
        let mut lines: Vec<&[u8]> = memchr::memchr_iter(b'\n', &self.seq)
            .map(|line_end| {
                let line = &self.seq[line_start..line_end];
                line_start = line_end + 1;
                line
            })
            .collect();
        lines.push(&self.seq[line_start..]);
        lines
    }

    /// Read the next record from `reader` into `self`.
    ///
    /// Any text before the first header is skipped, as are blank lines
    /// inside and between records. Trailing whitespace is removed from the
    /// header and from every sequence line. A record may have no sequence
    /// lines at all.
    ///
    /// # Returns
    ///
    /// * `Ok(0)` - End of input, `self` is left empty
    /// * `Ok(n)` - Number of bytes consumed for this record
    /// * `Err(io::Error)` - The reader failed or the header is not UTF-8
    pub fn read(&mut self, reader: &mut dyn BufRead) -> io::Result<usize>
    {
        self.name.clear();
        self.seq.clear();

        let mut size = 0;
        loop
        {
            match reader.read_line(&mut self.name)?
            {
                0 => return Ok(0),
                some => size += some,
            }
            if self.name.starts_with('>')
            {
                break;
            }
            log::debug!("Skipping text before first record: {}", self.name.trim_end());
            self.name.clear();
        }
        rstrip_whitespace_string(&mut self.name);
        self.name.remove(0);

        loop
        {
            match reader.fill_buf()?.first()
            {
                None | Some(b'>') => break,
                Some(_) => (),
            }
            let mark = self.seq.len();
            if mark > 0
            {
                self.seq.push(b'\n');
            }
            let line_start = self.seq.len();
            size += reader.read_until(b'\n', &mut self.seq)?;
            rstrip_whitespace_vec(&mut self.seq, line_start);
            // blank line
            if self.seq.len() == line_start
            {
                self.seq.truncate(mark);
            }
        }
        Ok(size)
    }
}

fn rstrip_whitespace_string(s: &mut String)
{
    let len = s.trim_end_matches(|c: char| c.is_ascii_whitespace()).len();
    s.truncate(len);
}

fn rstrip_whitespace_vec(s: &mut Vec<u8>, floor: usize)
{
    while s.len() > floor && s[s.len() - 1].is_ascii_whitespace()
    {
        s.pop();
    }
}

/// Lazy iterator over the records of a FASTA stream.
///
/// Yields each record once; after the first error it yields `None`.
pub struct FastAIter<R: BufRead>
{
    reader: R,
    done: bool,
}

impl<R: BufRead> Iterator for FastAIter<R>
{
    type Item = io::Result<FastARecord>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.done
        {
            return None;
        }
        let mut record = FastARecord::default();
        match record.read(&mut self.reader)
        {
            Ok(0) =>
            {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(record)),
            Err(e) =>
            {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterate over the FASTA records of `reader`.
pub fn fasta_iter<R: BufRead>(reader: R) -> FastAIter<R>
{
    FastAIter { reader, done: false }
}

/// Open a FASTA file for reading.
///
/// Gzip-compressed input (including bgzip) is detected from its magic bytes
/// and decompressed transparently. A path of `-` reads standard input, which
/// may be compressed as well.
///
/// # Arguments
///
/// * `path` - Path to the FASTA file
///
/// # Returns
///
/// * `Ok(reader)` - A buffered reader over the uncompressed text
/// * `Err(io::Error)` - If the file cannot be opened or read
pub fn reader_from_path(path: &Path) -> io::Result<Box<dyn BufRead>>
{
    if path == Path::new("-")
    {
        return decompress_if_gzip(BufReader::new(io::stdin()), "stdin");
    }
    let reader = BufReader::new(File::open(path)?);
    decompress_if_gzip(reader, &path.display().to_string())
}

fn decompress_if_gzip<R: BufRead + 'static>(mut reader: R, label: &str) -> io::Result<Box<dyn BufRead>>
{
    if reader.fill_buf()?.starts_with(&GZIP_MAGIC)
    {
        log::debug!("{} is gzip-compressed", label);
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    }
    else
    {
        Ok(Box::new(reader))
    }
}
