pub mod dna;

pub use dna::{pack_sequence, packed_len, unpack_sequence, Base};
