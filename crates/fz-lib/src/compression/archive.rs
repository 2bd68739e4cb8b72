//! Packed records and the archive that owns them.

use crate::cli::BasePolicy;
use crate::encoding::dna::{pack_sequence, packed_len, unpack_sequence};
use crate::error::CodecError;
use crate::io::FastaRecord;

/// One record in packed form.
///
/// `packed.len() == ceil(original_length / 4)` holds for every value: records
/// are only built by packing or through [`PackedRecord::from_parts`], which
/// checks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRecord {
    header: Vec<u8>,
    packed: Vec<u8>,
    original_length: usize,
}

impl PackedRecord {
    /// Pack a parsed record, taking ownership of its header.
    pub fn pack(record: FastaRecord, policy: BasePolicy) -> Result<Self, CodecError> {
        let packed = pack_sequence(&record.sequence, policy)?;
        Ok(Self {
            header: record.header,
            packed,
            original_length: record.sequence.len(),
        })
    }

    /// Assemble a record from already-packed data.
    pub fn from_parts(
        header: Vec<u8>,
        packed: Vec<u8>,
        original_length: usize,
    ) -> Result<Self, CodecError> {
        if packed.len() != packed_len(original_length) {
            return Err(CodecError::LengthMismatch {
                packed_length: packed.len() as u64,
                original_length: original_length as u64,
            });
        }
        Ok(Self {
            header,
            packed,
            original_length,
        })
    }

    /// Unpack back to text form, handing the header over.
    pub fn into_record(self) -> Result<FastaRecord, CodecError> {
        let sequence = unpack_sequence(&self.packed, self.original_length)?;
        Ok(FastaRecord::new(self.header, sequence))
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    /// Number of packed bytes, `ceil(original_length / 4)`.
    pub fn packed_length(&self) -> usize {
        self.packed.len()
    }

    /// Number of bases before packing.
    pub fn original_length(&self) -> usize {
        self.original_length
    }
}

/// Ordered packed records making up one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    records: Vec<PackedRecord>,
}

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: PackedRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[PackedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `original_length` over all records.
    pub fn total_bases(&self) -> usize {
        self.records.iter().map(PackedRecord::original_length).sum()
    }

    /// Sum of `packed_length` over all records.
    pub fn packed_bytes(&self) -> usize {
        self.records.iter().map(PackedRecord::packed_length).sum()
    }
}

impl FromIterator<PackedRecord> for Archive {
    fn from_iter<I: IntoIterator<Item = PackedRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Archive {
    type Item = PackedRecord;
    type IntoIter = std::vec::IntoIter<PackedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a PackedRecord;
    type IntoIter = std::slice::Iter<'a, PackedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
