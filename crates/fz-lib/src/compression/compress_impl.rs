//! File-level compression: read the FASTA source, pack it, write the archive in one piece.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, info, warn};
use crate::cli::CompressConfig;
use super::*;

pub(super) fn compress_file(args: &CompressConfig) -> Result<Summary> {
    let start_time = Instant::now();
    let output = args.output_path()?;

    info!("Reading FASTA from {:?}", args.input);
    let source = crate::io::read_source(&args.input)?;
    debug!("Read {} of FASTA text", humanize_bytes(source.len()));

    // Nothing is written unless every record packs.
    let archive = compress(&source, args.policy)
        .with_context(|| format!("Failed to compress {:?}", args.input))?;
    if archive.is_empty() {
        warn!("No records found in {:?}; writing an empty archive", args.input);
    }

    let bytes = serialize(&archive);
    crate::io::write_output(&output, &bytes)?;

    let summary = Summary {
        output,
        records: archive.len(),
        bases: archive.total_bases(),
        input_bytes: source.len(),
        output_bytes: bytes.len(),
        elapsed: start_time.elapsed(),
    };
    log_compression_stats(&archive, &summary);

    Ok(summary)
}
