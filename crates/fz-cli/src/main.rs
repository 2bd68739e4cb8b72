use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use fz_lib::cli::{is_stdio_path, BasePolicy, CompressConfig, DecompressConfig};
use fz_lib::compression::{humanize_bytes, Summary};

const USAGE_EXAMPLES: &str = "\
Examples:
  fz compress reads.fasta              writes reads.f
  fz compress reads.fasta out.f        writes out.f
  fz compress --strict reads.fasta     fails on any base other than A, C, G, T
  fz decompress reads.f                writes reads.fasta
  fz decompress reads.f - | head       writes FASTA to stdout";

#[derive(Parser)]
#[command(name = "fz")]
#[command(author = "FZ Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lossless 2-bit FASTA compression", long_about = None)]
#[command(after_help = USAGE_EXAMPLES)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a FASTA file into a .f archive
    Compress(CompressArgs),
    /// Restore FASTA from a .f archive
    Decompress(DecompressArgs),
}

#[derive(Parser)]
struct CompressArgs {
    /// Input FASTA file, plain or gzipped (`-` for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output archive [default: INPUT with a .f extension]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Fail on bytes other than A, C, G, T instead of storing them as A
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
struct DecompressArgs {
    /// Input .f archive (`-` for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output FASTA file [default: INPUT with a .fasta extension; `-` for stdout]
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

impl CompressArgs {
    fn into_config(self) -> CompressConfig {
        CompressConfig {
            input: self.input,
            output: self.output,
            policy: if self.strict { BasePolicy::Reject } else { BasePolicy::Substitute },
        }
    }
}

impl DecompressArgs {
    fn into_config(self) -> DecompressConfig {
        DecompressConfig {
            input: self.input,
            output: self.output,
        }
    }
}

fn report_compressed(summary: &Summary) {
    // Stdout carries the archive itself in that case.
    if is_stdio_path(&summary.output) {
        return;
    }
    println!("Successfully compressed to file: {}", summary.output.display());
    println!(
        "Original size: {} bytes ({})",
        summary.input_bytes,
        humanize_bytes(summary.input_bytes)
    );
    println!(
        "Compressed size: {} bytes ({})",
        summary.output_bytes,
        humanize_bytes(summary.output_bytes)
    );
}

fn report_decompressed(summary: &Summary) {
    if is_stdio_path(&summary.output) {
        return;
    }
    println!("Successfully decompressed to file: {}", summary.output.display());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if std::env::var("FZ_NO_BANNER").is_err() {
        eprintln!("FZ v{} - 2-bit FASTA compression", env!("CARGO_PKG_VERSION"));
        eprintln!();
    }

    match cli.command {
        Commands::Compress(args) => {
            info!("Starting compression...");
            let config = args.into_config();
            let summary = fz_lib::compression::compress_file(&config)?;
            report_compressed(&summary);
            info!("Compression complete!");
        }
        Commands::Decompress(args) => {
            info!("Starting decompression...");
            let config = args.into_config();
            let summary = fz_lib::compression::decompress_file(&config)?;
            report_decompressed(&summary);
            info!("Decompression complete!");
        }
    }

    Ok(())
}
