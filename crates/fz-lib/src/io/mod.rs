mod fasta;

pub use fasta::{
    normalize_sequence, parse_records, read_source, rendered_len, sniff_gzip, write_records,
    FastaRecord, FileReader, Sniffed, RECORD_MARKER,
};

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

use crate::cli::is_stdio_path;

/// Read a whole archive from a file, or from stdin if path is `-`.
pub fn read_archive(path: &Path) -> Result<Vec<u8>> {
    if is_stdio_path(path) {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("Failed to read archive from stdin")?;
        return Ok(data);
    }
    std::fs::read(path).with_context(|| format!("Failed to read archive: {:?}", path))
}

/// Write `bytes` in one piece to a file, or to stdout if path is `-`.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if is_stdio_path(path) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes).context("Failed to write to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        return Ok(());
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write file: {:?}", path))
}
