use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Extension given to archives when no output path is supplied.
pub const ARCHIVE_EXTENSION: &str = "f";
/// Extension given to restored FASTA files when no output path is supplied.
pub const FASTA_EXTENSION: &str = "fasta";

/// What the packer does with a byte outside `A`, `C`, `G`, `T`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BasePolicy {
    /// Store the byte as `A`. Lossy on such input, compatible with existing `.f` archives.
    #[default]
    Substitute,
    /// Abort the whole operation with `CodecError::InvalidBase`.
    Reject,
}

#[derive(Clone, Debug)]
pub struct CompressConfig {
    /// Input FASTA file, plain or gzipped (`-` for stdin)
    pub input: PathBuf,
    /// Output archive; derived from `input` when `None`
    pub output: Option<PathBuf>,
    /// Handling of non-ACGT bytes
    pub policy: BasePolicy,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            policy: BasePolicy::Substitute,
        }
    }
}

impl CompressConfig {
    /// Resolve the archive path: explicit output, else `<input stem>.f`.
    pub fn output_path(&self) -> Result<PathBuf> {
        resolve_output(&self.input, self.output.as_deref(), ARCHIVE_EXTENSION)
    }
}

#[derive(Clone, Debug, Default)]
pub struct DecompressConfig {
    /// Input archive (`-` for stdin)
    pub input: PathBuf,
    /// Output FASTA file; derived from `input` when `None` (`-` for stdout)
    pub output: Option<PathBuf>,
}

impl DecompressConfig {
    /// Resolve the FASTA path: explicit output, else `<input stem>.fasta`.
    pub fn output_path(&self) -> Result<PathBuf> {
        resolve_output(&self.input, self.output.as_deref(), FASTA_EXTENSION)
    }
}

/// `-` stands for stdin or stdout.
pub fn is_stdio_path(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Default archive name: the input with its last extension replaced by `.f`.
pub fn default_compress_output(input: &Path) -> PathBuf {
    input.with_extension(ARCHIVE_EXTENSION)
}

/// Default FASTA name: the input with its last extension replaced by `.fasta`.
pub fn default_decompress_output(input: &Path) -> PathBuf {
    input.with_extension(FASTA_EXTENSION)
}

/// True when both paths name the same existing file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    if is_stdio_path(a) || is_stdio_path(b) {
        return false;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Explicit output, else `input` with `extension`. Never the input itself.
fn resolve_output(input: &Path, output: Option<&Path>, extension: &str) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            if is_stdio_path(input) || input.file_name().is_none() {
                bail!("Cannot derive an output name from {:?}; pass an output path", input);
            }
            input.with_extension(extension)
        }
    };
    if is_same_file(input, &path) {
        bail!("Output {:?} would overwrite the input; pass another output path", path);
    }
    Ok(path)
}
