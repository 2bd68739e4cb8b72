use flate2::write::GzEncoder;
use flate2::Compression;
use fz_lib::cli::{BasePolicy, CompressConfig, DecompressConfig};
use fz_lib::compression::{compress_file, decompress_file, RECORD_OVERHEAD};
use fz_lib::CodecError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two wrapped records, lengths 10 and 7 (neither a multiple of four).
const MULTI_RECORD_DATA: &str = "\
>chr1 test chromosome\nACGTACGT\nAC\n\
>chr2\nTTTTGGG\n";

const MULTI_RECORD_RENDERED: &str = "\
>chr1 test chromosome\nACGTACGTAC\n\
>chr2\nTTTTGGG\n";

fn compress_config(input: &Path, output: Option<PathBuf>) -> CompressConfig {
    CompressConfig {
        input: input.to_path_buf(),
        output,
        ..CompressConfig::default()
    }
}

fn decompress_config(input: &Path, output: Option<PathBuf>) -> DecompressConfig {
    DecompressConfig {
        input: input.to_path_buf(),
        output,
    }
}

/// Compress `data` from a file, decompress to another, return the restored text.
fn roundtrip(data: &[u8]) -> Vec<u8> {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fasta");
    fs::write(&input, data).unwrap();

    let archive = temp_dir.path().join("test.f");
    compress_file(&compress_config(&input, Some(archive.clone()))).unwrap();

    let output = temp_dir.path().join("output.fasta");
    decompress_file(&decompress_config(&archive, Some(output.clone()))).unwrap();
    fs::read(&output).unwrap()
}

#[test]
fn test_compress_decompress_roundtrip() {
    let restored = roundtrip(MULTI_RECORD_DATA.as_bytes());
    assert_eq!(String::from_utf8(restored).unwrap(), MULTI_RECORD_RENDERED);
}

#[test]
fn test_compress_summary() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("genome.fa");
    fs::write(&input, MULTI_RECORD_DATA).unwrap();

    let summary = compress_file(&compress_config(&input, None)).unwrap();
    assert_eq!(summary.output, temp_dir.path().join("genome.f"));
    assert_eq!(summary.records, 2);
    assert_eq!(summary.bases, 17);
    assert_eq!(summary.input_bytes, MULTI_RECORD_DATA.len());

    // 3 + 2 packed bytes, headers of 20 and 4 bytes
    let expected = 2 * RECORD_OVERHEAD + 20 + 4 + 3 + 2;
    assert_eq!(summary.output_bytes, expected);
    assert_eq!(fs::metadata(&summary.output).unwrap().len() as usize, expected);
}

#[test]
fn test_default_output_names() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("sample.fna");
    fs::write(&input, MULTI_RECORD_DATA).unwrap();

    compress_file(&compress_config(&input, None)).unwrap();
    let archive = temp_dir.path().join("sample.f");
    assert!(archive.exists());

    let summary = decompress_file(&decompress_config(&archive, None)).unwrap();
    assert_eq!(summary.output, temp_dir.path().join("sample.fasta"));
    assert_eq!(summary.records, 2);
    assert_eq!(fs::read_to_string(&summary.output).unwrap(), MULTI_RECORD_RENDERED);
}

#[test]
fn test_crlf_input() {
    let restored = roundtrip(b">win\r\nACGT\r\nAC\r\n");
    // The header keeps its carriage return; the sequence loses all of them.
    assert_eq!(restored, b">win\r\nACGTAC\n");
}

#[test]
fn test_header_only_and_empty_records() {
    let restored = roundtrip(b">only header>>next\nGA\n");
    assert_eq!(restored, b">only header\n\n>next\nGA\n");
}

#[test]
fn test_non_acgt_substituted_by_default() {
    let restored = roundtrip(b">soft\nacgtNNRY\n");
    assert_eq!(restored, b">soft\nAAAAAAAA\n");
}

#[test]
fn test_gzipped_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fasta.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(MULTI_RECORD_DATA.as_bytes()).unwrap();
    fs::write(&input, encoder.finish().unwrap()).unwrap();

    let archive = temp_dir.path().join("gz.f");
    compress_file(&compress_config(&input, Some(archive.clone()))).unwrap();

    let output = temp_dir.path().join("gz.fasta");
    decompress_file(&decompress_config(&archive, Some(output.clone()))).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), MULTI_RECORD_RENDERED);
}

#[test]
fn test_concatenated_gzip_members() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("multi.fa.gz");
    let mut data = Vec::new();
    for member in [">a\nACGT\n", ">b\nGGGG\n"] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(member.as_bytes()).unwrap();
        data.extend(encoder.finish().unwrap());
    }
    fs::write(&input, data).unwrap();

    let archive = temp_dir.path().join("multi.f");
    let summary = compress_file(&compress_config(&input, Some(archive.clone()))).unwrap();
    assert_eq!(summary.records, 2);

    let output = temp_dir.path().join("multi.fasta");
    decompress_file(&decompress_config(&archive, Some(output.clone()))).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), ">a\nACGT\n>b\nGGGG\n");
}

#[test]
fn test_refuses_to_overwrite_input() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("seq.f");
    fs::write(&archive, MULTI_RECORD_DATA).unwrap();
    assert!(compress_file(&compress_config(&archive, None)).is_err());
    assert_eq!(fs::read_to_string(&archive).unwrap(), MULTI_RECORD_DATA);

    let fasta = temp_dir.path().join("seq.fasta");
    fs::write(&fasta, MULTI_RECORD_DATA).unwrap();
    assert!(decompress_file(&decompress_config(&fasta, None)).is_err());
    assert_eq!(fs::read_to_string(&fasta).unwrap(), MULTI_RECORD_DATA);
}

#[test]
fn test_reject_policy_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fasta");
    fs::write(&input, ">ok\nACGT\n>bad\nACGTN\n").unwrap();

    let archive = temp_dir.path().join("strict.f");
    let config = CompressConfig {
        policy: BasePolicy::Reject,
        ..compress_config(&input, Some(archive.clone()))
    };
    let err = compress_file(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodecError>(),
        Some(CodecError::InvalidBase { byte: b'N', position: 4 })
    ));
    assert!(!archive.exists());
}

#[test]
fn test_empty_input_gives_empty_archive() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("empty.fasta");
    fs::write(&input, "").unwrap();

    let summary = compress_file(&compress_config(&input, None)).unwrap();
    assert_eq!(summary.records, 0);
    assert_eq!(fs::metadata(&summary.output).unwrap().len(), 0);

    let output = temp_dir.path().join("restored.fasta");
    let summary = decompress_file(&decompress_config(
        &temp_dir.path().join("empty.f"),
        Some(output.clone()),
    ))
    .unwrap();
    assert_eq!(summary.records, 0);
    assert!(fs::read(&output).unwrap().is_empty());
}

#[test]
fn test_truncated_archive_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.fasta");
    fs::write(&input, MULTI_RECORD_DATA).unwrap();

    let archive = temp_dir.path().join("cut.f");
    compress_file(&compress_config(&input, Some(archive.clone()))).unwrap();
    let bytes = fs::read(&archive).unwrap();
    fs::write(&archive, &bytes[..bytes.len() - 1]).unwrap();

    let output = temp_dir.path().join("cut.fasta");
    let err = decompress_file(&decompress_config(&archive, Some(output.clone()))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodecError>(),
        Some(CodecError::TruncatedContainer { record: 1, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.fasta");
    assert!(compress_file(&compress_config(&input, None)).is_err());
    assert!(decompress_file(&decompress_config(&input, None)).is_err());
}

#[test]
fn test_stdin_requires_output_path() {
    assert!(compress_file(&compress_config(Path::new("-"), None)).is_err());
}
