use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::io::{BufReader, Chain, Cursor, Read, Write};
use std::path::Path;

/// Marks the start of a record; every occurrence splits the input.
pub const RECORD_MARKER: u8 = b'>';

/// A single FASTA record with byte-oriented fields.
///
/// `header` excludes the leading `>` and the line terminator. `sequence` has
/// been through [`normalize_sequence`], so it holds no `\r` or `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub header: Vec<u8>,
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    /// Create a new FASTA record
    pub fn new(header: Vec<u8>, sequence: Vec<u8>) -> Self {
        Self { header, sequence }
    }
}

/// Drop every `\n` and `\r`, keeping all other bytes in order.
pub fn normalize_sequence(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .copied()
        .filter(|&b| b != b'\n' && b != b'\r')
        .collect()
}

/// Split a FASTA blob into records.
///
/// Empty segments (empty input, `>>`, a trailing lone `>`) produce nothing.
/// Text before the first marker is parsed like any other segment.
pub fn parse_records(text: &[u8]) -> Vec<FastaRecord> {
    text.split(|&b| b == RECORD_MARKER)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect()
}

/// First line is the header; a segment without `\n` is all header.
fn parse_segment(segment: &[u8]) -> FastaRecord {
    match segment.iter().position(|&b| b == b'\n') {
        Some(eol) => FastaRecord::new(
            segment[..eol].to_vec(),
            normalize_sequence(&segment[eol + 1..]),
        ),
        None => FastaRecord::new(segment.to_vec(), Vec::new()),
    }
}

/// Render records as `>header\nsequence\n`.
pub fn write_records<W: Write>(writer: &mut W, records: &[FastaRecord]) -> std::io::Result<()> {
    for record in records {
        writer.write_all(&[RECORD_MARKER])?;
        writer.write_all(&record.header)?;
        writer.write_all(b"\n")?;
        writer.write_all(&record.sequence)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Bytes [`write_records`] will produce for `records`.
pub fn rendered_len(records: &[FastaRecord]) -> usize {
    records
        .iter()
        .map(|r| r.header.len() + r.sequence.len() + 3)
        .sum()
}

/// Leading bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A stream with its first bytes already pulled off for format detection
/// and stitched back in front.
pub type Sniffed<R> = Chain<Cursor<Vec<u8>>, R>;

// Enum to hold either a plain file reader, gzipped reader, or stdin reader.
// Gzip input may hold several members (bgzip, `cat a.gz b.gz`); all are decoded.
pub enum FileReader {
    Plain(Sniffed<BufReader<std::fs::File>>),
    Gzipped(BufReader<MultiGzDecoder<Sniffed<BufReader<std::fs::File>>>>),
    Stdin(Sniffed<BufReader<std::io::Stdin>>),
    StdinGzipped(BufReader<MultiGzDecoder<Sniffed<BufReader<std::io::Stdin>>>>),
}

impl Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            FileReader::Plain(r) => r.read(buf),
            FileReader::Gzipped(r) => r.read(buf),
            FileReader::Stdin(r) => r.read(buf),
            FileReader::StdinGzipped(r) => r.read(buf),
        }
    }
}

impl FileReader {
    /// Open a FASTA file (auto-detects gzip), or stdin if path is `-`.
    pub fn from_path_or_stdin(path: impl AsRef<Path>) -> Result<Self> {
        if crate::cli::is_stdio_path(path.as_ref()) {
            return Self::from_stdin();
        }
        Self::from_path(path)
    }

    /// Open a FASTA file (auto-detects gzip)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let buffered = BufReader::with_capacity(4 * 1024 * 1024, file);
        let (gzipped, stream) = sniff_gzip(buffered)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        let reader = if gzipped {
            FileReader::Gzipped(BufReader::new(MultiGzDecoder::new(stream)))
        } else {
            FileReader::Plain(stream)
        };

        Ok(reader)
    }

    /// Read FASTA from stdin (auto-detects gzip)
    pub fn from_stdin() -> Result<Self> {
        let buffered = BufReader::with_capacity(4 * 1024 * 1024, std::io::stdin());
        let (gzipped, stream) = sniff_gzip(buffered).context("Failed to read stdin")?;
        let reader = if gzipped {
            FileReader::StdinGzipped(BufReader::new(MultiGzDecoder::new(stream)))
        } else {
            FileReader::Stdin(stream)
        };

        Ok(reader)
    }
}

/// Check for the gzip magic bytes and hand back the stream unchanged.
///
/// Reads until two bytes or end of stream, so a pipe that delivers one byte
/// at a time is still detected.
pub fn sniff_gzip<R: Read>(mut inner: R) -> std::io::Result<(bool, Sniffed<R>)> {
    let mut head = Vec::with_capacity(GZIP_MAGIC.len());
    inner
        .by_ref()
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut head)?;
    let gzipped = head == GZIP_MAGIC;
    Ok((gzipped, Cursor::new(head).chain(inner)))
}

/// Read a whole FASTA source (file or `-`, gzip auto-detected) into memory.
pub fn read_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let mut reader = FileReader::from_path_or_stdin(path.as_ref())?;
    let mut text = Vec::new();
    reader
        .read_to_end(&mut text)
        .with_context(|| format!("Failed to read FASTA input: {:?}", path.as_ref()))?;
    Ok(text)
}
