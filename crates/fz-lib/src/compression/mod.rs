mod archive;
mod compress_impl;
mod container;
mod decompress_impl;

pub use archive::{Archive, PackedRecord};
pub use container::{
    deserialize, encoded_len, serialize, ArchiveReader, ArchiveWriter, LENGTH_FIELD_SIZE,
    RECORD_OVERHEAD,
};

use crate::cli::{BasePolicy, CompressConfig, DecompressConfig};
use crate::error::CodecError;
use crate::io::{parse_records, FastaRecord};
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Parse FASTA text and pack every record.
///
/// Input without records gives an empty archive. Under [`BasePolicy::Reject`]
/// the first invalid base aborts the whole call.
pub fn compress(source: &[u8], policy: BasePolicy) -> Result<Archive, CodecError> {
    let records = parse_records(source);
    let mut archive = Archive::with_capacity(records.len());
    for record in records {
        archive.push(PackedRecord::pack(record, policy)?);
    }
    Ok(archive)
}

/// Deserialize a container and unpack every record, in archive order.
pub fn decompress(container: &[u8]) -> Result<Vec<FastaRecord>, CodecError> {
    deserialize(container)?
        .into_iter()
        .map(PackedRecord::into_record)
        .collect()
}

/// Outcome of a file-level compress or decompress.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Where the result was written (`-` for stdout)
    pub output: PathBuf,
    pub records: usize,
    pub bases: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub elapsed: Duration,
}

/// Compress a FASTA file into a `.f` archive.
pub fn compress_file(args: &CompressConfig) -> Result<Summary> {
    compress_impl::compress_file(args)
}

/// Decompress a `.f` archive back to FASTA.
pub fn decompress_file(args: &DecompressConfig) -> Result<Summary> {
    decompress_impl::decompress_file(args)
}

/// Format bytes as human-readable string (e.g., "1.23 GiB").
pub fn humanize_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;
    let b = bytes as f64;
    if b >= GIB { format!("{:.2} GiB", b / GIB) }
    else if b >= MIB { format!("{:.1} MiB", b / MIB) }
    else if b >= KIB { format!("{:.0} KiB", b / KIB) }
    else { format!("{} B", bytes) }
}

/// Log compression stats.
fn log_compression_stats(archive: &Archive, summary: &Summary) {
    let headers_len: usize = archive.iter().map(|r| r.header().len()).sum();
    let packed_len = archive.packed_bytes();
    let metadata_len = archive.len() * RECORD_OVERHEAD;
    let total = summary.output_bytes.max(1) as f64;

    info!("Compression completed in {:.2}s", summary.elapsed.as_secs_f64());
    info!("Records: {}, bases: {}", summary.records, summary.bases);
    info!("Original size: {} bytes", summary.input_bytes);
    info!("Compressed size: {} bytes", summary.output_bytes);
    if summary.output_bytes > 0 {
        info!("Compression ratio: {:.2}x", summary.input_bytes as f64 / total);
    }
    info!("Stream breakdown:");
    info!("  Headers:   {} bytes ({:.1}%)", headers_len, 100.0 * headers_len as f64 / total);
    info!("  Sequences: {} bytes ({:.1}%)", packed_len, 100.0 * packed_len as f64 / total);
    info!("  Metadata:  {} bytes ({:.1}%)", metadata_len, 100.0 * metadata_len as f64 / total);
}
