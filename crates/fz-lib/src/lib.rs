//! Lossless 2-bit archiving of FASTA nucleotide records.
//!
//! [`compression::compress`] parses FASTA text and packs each sequence four
//! bases per byte; [`compression::serialize`] lays the records out as a
//! `.f` container. [`compression::deserialize`] and
//! [`compression::decompress`] reverse both steps exactly, including
//! sequence lengths that are not a multiple of four.

pub mod cli;
pub mod compression;
pub mod encoding;
pub mod error;
pub mod io;

pub use cli::BasePolicy;
pub use error::{CodecError, ContainerField};
