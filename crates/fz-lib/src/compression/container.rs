//! Binary container for packed records.
//!
//! Records are written back to back with no global header, footer, record
//! count or checksum. Each record is:
//!
//! ```text
//! header_len       u64 (native byte order)
//! header           header_len bytes
//! packed_length    u64 (native byte order)
//! original_length  u64 (native byte order)
//! packed           packed_length bytes
//! ```
//!
//! End of archive is end of stream. A stream that ends exactly before a
//! record's `header_len` is complete; one that ends anywhere else is
//! truncated.

use std::io::{ErrorKind, Read, Write};

use super::archive::{Archive, PackedRecord};
use crate::encoding::dna::BASES_PER_BYTE;
use crate::error::{CodecError, ContainerField};

/// Size of each length field.
pub const LENGTH_FIELD_SIZE: usize = std::mem::size_of::<u64>();

/// Fixed bytes per record on top of header and payload.
pub const RECORD_OVERHEAD: usize = 3 * LENGTH_FIELD_SIZE;

/// Serialized size of `record`.
pub fn encoded_len(record: &PackedRecord) -> usize {
    RECORD_OVERHEAD + record.header().len() + record.packed_length()
}

/// Append the wire form of `record` to `out`.
fn encode_record(record: &PackedRecord, out: &mut Vec<u8>) {
    out.reserve(encoded_len(record));
    out.extend_from_slice(&(record.header().len() as u64).to_ne_bytes());
    out.extend_from_slice(record.header());
    out.extend_from_slice(&(record.packed_length() as u64).to_ne_bytes());
    out.extend_from_slice(&(record.original_length() as u64).to_ne_bytes());
    out.extend_from_slice(record.packed());
}

/// Serialize a whole archive.
pub fn serialize(archive: &Archive) -> Vec<u8> {
    let total: usize = archive.iter().map(encoded_len).sum();
    let mut out = Vec::with_capacity(total);
    for record in archive {
        encode_record(record, &mut out);
    }
    out
}

/// Deserialize a whole archive, failing on any truncated or inconsistent record.
pub fn deserialize(data: &[u8]) -> Result<Archive, CodecError> {
    ArchiveReader::new(data).collect()
}

/// Streams packed records into any writer.
pub struct ArchiveWriter<W: Write> {
    inner: W,
    scratch: Vec<u8>,
    records_written: usize,
    bytes_written: u64,
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            scratch: Vec::new(),
            records_written: 0,
            bytes_written: 0,
        }
    }

    /// Write one record in a single `write_all`.
    pub fn write_record(&mut self, record: &PackedRecord) -> Result<(), CodecError> {
        self.scratch.clear();
        encode_record(record, &mut self.scratch);
        self.inner.write_all(&self.scratch)?;
        self.records_written += 1;
        self.bytes_written += self.scratch.len() as u64;
        Ok(())
    }

    pub fn write_archive(&mut self, archive: &Archive) -> Result<(), CodecError> {
        for record in archive {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, CodecError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Streams packed records out of any reader.
///
/// Also an iterator over `Result<PackedRecord, CodecError>`; it stops after
/// the first error.
pub struct ArchiveReader<R: Read> {
    inner: R,
    records_read: usize,
    done: bool,
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            records_read: 0,
            done: false,
        }
    }

    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Next record, or `None` on a clean end of stream.
    pub fn read_record(&mut self) -> Result<Option<PackedRecord>, CodecError> {
        let mut buf = [0u8; LENGTH_FIELD_SIZE];
        match read_full(&mut self.inner, &mut buf)? {
            0 => return Ok(None),
            LENGTH_FIELD_SIZE => {}
            _ => return Err(self.truncated(ContainerField::HeaderLength)),
        }
        let header_len = u64::from_ne_bytes(buf);

        let header = self.read_payload(header_len, ContainerField::Header)?;
        let packed_length = self.read_length(ContainerField::PackedLength)?;
        let original_length = self.read_length(ContainerField::OriginalLength)?;

        // Checked before reading the payload so a corrupt length fails fast.
        if packed_length != original_length.div_ceil(BASES_PER_BYTE as u64) {
            return Err(CodecError::LengthMismatch {
                packed_length,
                original_length,
            });
        }
        let original_length = self.addressable(original_length, ContainerField::OriginalLength)?;
        let packed = self.read_payload(packed_length, ContainerField::Packed)?;

        let record = PackedRecord::from_parts(header, packed, original_length)?;
        self.records_read += 1;
        Ok(Some(record))
    }

    fn read_length(&mut self, field: ContainerField) -> Result<u64, CodecError> {
        let mut buf = [0u8; LENGTH_FIELD_SIZE];
        if read_full(&mut self.inner, &mut buf)? < LENGTH_FIELD_SIZE {
            return Err(self.truncated(field));
        }
        Ok(u64::from_ne_bytes(buf))
    }

    /// Read `len` bytes. The buffer grows with what is actually read, so a
    /// corrupt length on a short stream fails as truncation.
    fn read_payload(&mut self, len: u64, field: ContainerField) -> Result<Vec<u8>, CodecError> {
        let expected = self.addressable(len, field)?;
        let mut data = Vec::new();
        self.inner.by_ref().take(len).read_to_end(&mut data)?;
        if data.len() < expected {
            return Err(self.truncated(field));
        }
        Ok(data)
    }

    fn addressable(&self, value: u64, field: ContainerField) -> Result<usize, CodecError> {
        usize::try_from(value).map_err(|_| CodecError::LengthOverflow {
            record: self.records_read,
            field,
            value,
        })
    }

    fn truncated(&self, field: ContainerField) -> CodecError {
        CodecError::TruncatedContainer {
            record: self.records_read,
            field,
        }
    }
}

impl<R: Read> Iterator for ArchiveReader<R> {
    type Item = Result<PackedRecord, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.read_record().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

/// Fill `buf` as far as the stream allows; returns the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
