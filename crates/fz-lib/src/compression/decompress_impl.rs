//! File-level decompression: read the archive, unpack it, render FASTA in one piece.

use anyhow::{Context, Result};
use std::time::Instant;
use tracing::info;
use crate::cli::DecompressConfig;
use crate::io::{rendered_len, write_records};
use super::*;

pub(super) fn decompress_file(args: &DecompressConfig) -> Result<Summary> {
    let start_time = Instant::now();
    let output = args.output_path()?;

    let data = crate::io::read_archive(&args.input)?;
    info!("Read {} archive from {:?}", humanize_bytes(data.len()), args.input);

    let records = decompress(&data)
        .with_context(|| format!("Failed to decompress {:?}", args.input))?;

    let mut text = Vec::with_capacity(rendered_len(&records));
    write_records(&mut text, &records)?;
    crate::io::write_output(&output, &text)?;

    let summary = Summary {
        output,
        records: records.len(),
        bases: records.iter().map(|r| r.sequence.len()).sum(),
        input_bytes: data.len(),
        output_bytes: text.len(),
        elapsed: start_time.elapsed(),
    };
    info!(
        "Decompressed {} records ({} bases) in {:.2}s",
        summary.records,
        summary.bases,
        summary.elapsed.as_secs_f64()
    );

    Ok(summary)
}
