use std::fmt;
use thiserror::Error;

/// Fixed field of a container record, used to report where a stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerField {
    HeaderLength,
    Header,
    PackedLength,
    OriginalLength,
    Packed,
}

impl fmt::Display for ContainerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderLength => write!(f, "header length"),
            Self::Header => write!(f, "header"),
            Self::PackedLength => write!(f, "packed length"),
            Self::OriginalLength => write!(f, "original length"),
            Self::Packed => write!(f, "packed sequence"),
        }
    }
}

/// Error type for codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Truncated container: stream ended inside the {field} of record {record}")]
    TruncatedContainer { record: usize, field: ContainerField },
    #[error(
        "Length mismatch: {packed_length} packed bytes do not hold exactly {original_length} bases"
    )]
    LengthMismatch { packed_length: u64, original_length: u64 },
    #[error("Length overflow: {field} {value} of record {record} is not addressable")]
    LengthOverflow {
        record: usize,
        field: ContainerField,
        value: u64,
    },
    #[error("Invalid base '{}' at position {position}", .byte.escape_ascii())]
    InvalidBase { byte: u8, position: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
