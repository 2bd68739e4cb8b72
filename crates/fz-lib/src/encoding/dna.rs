//! 2-bit nucleotide packing.
//!
//! Four bases per byte, first base in the two most-significant bits:
//! `byte = (c0 << 6) | (c1 << 4) | (c2 << 2) | c3`. Unused slots of the last
//! byte hold the code of [`PADDING_BASE`]; the caller keeps the base count so
//! decoding can stop before the padding.

use crate::cli::BasePolicy;
use crate::error::CodecError;

/// Bases stored in one packed byte.
pub const BASES_PER_BYTE: usize = 4;

/// Fills the unused slots of the final byte.
pub const PADDING_BASE: Base = Base::A;

/// DNA base encoding (2 bits per base)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Base {
    A = 0b00,
    C = 0b01,
    G = 0b10,
    T = 0b11,
}

impl Base {
    /// Only the uppercase canonical bases are recognised.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    /// Decode the low two bits of `code`.
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Base::A,
            0b01 => Base::C,
            0b10 => Base::G,
            _ => Base::T,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
        }
    }
}

/// Packed size of `original_length` bases: `ceil(original_length / 4)`.
pub fn packed_len(original_length: usize) -> usize {
    original_length.div_ceil(BASES_PER_BYTE)
}

/// 2-bit code for one input byte under `policy`.
pub fn encode_base(byte: u8, position: usize, policy: BasePolicy) -> Result<u8, CodecError> {
    match (Base::from_byte(byte), policy) {
        (Some(base), _) => Ok(base.code()),
        (None, BasePolicy::Substitute) => Ok(Base::A.code()),
        (None, BasePolicy::Reject) => Err(CodecError::InvalidBase { byte, position }),
    }
}

/// Pack a normalized sequence into `packed_len(seq.len())` bytes.
pub fn pack_sequence(seq: &[u8], policy: BasePolicy) -> Result<Vec<u8>, CodecError> {
    let mut packed = Vec::with_capacity(packed_len(seq.len()));

    for (byte_idx, chunk) in seq.chunks(BASES_PER_BYTE).enumerate() {
        let mut byte = 0u8;
        for slot in 0..BASES_PER_BYTE {
            let code = match chunk.get(slot) {
                Some(&b) => encode_base(b, byte_idx * BASES_PER_BYTE + slot, policy)?,
                None => PADDING_BASE.code(),
            };
            byte = (byte << 2) | code;
        }
        packed.push(byte);
    }

    Ok(packed)
}

/// Unpack exactly `original_length` bases, discarding the padding slots.
///
/// `packed` must be exactly `packed_len(original_length)` bytes long; anything
/// else means the lengths were desynchronised and is reported as
/// [`CodecError::LengthMismatch`].
pub fn unpack_sequence(packed: &[u8], original_length: usize) -> Result<Vec<u8>, CodecError> {
    if packed.len() != packed_len(original_length) {
        return Err(CodecError::LengthMismatch {
            packed_length: packed.len() as u64,
            original_length: original_length as u64,
        });
    }

    let mut seq = Vec::with_capacity(original_length);
    'bytes: for &byte in packed {
        for slot in 0..BASES_PER_BYTE {
            if seq.len() == original_length {
                break 'bytes;
            }
            let shift = 2 * (BASES_PER_BYTE - 1 - slot);
            seq.push(Base::from_code(byte >> shift).to_byte());
        }
    }

    Ok(seq)
}
