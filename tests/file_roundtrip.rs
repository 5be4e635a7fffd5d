use std::fs;
use std::path::Path;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tempfile::TempDir;

use huffman_file_compression::{compress_file, decompress_file, DecodingError, Error, HuffmanSave};


/// Archives must go to relative paths, so work below the current directory.
fn scratch_dir() -> TempDir {
    tempfile::tempdir_in(".")
        .unwrap_or_else(|e| panic!("Could not create scratch directory:\n{e}"))
}


fn round_trip(dir: &Path, name: &str, data: &[u8]) -> Vec<u8> {

    let source = dir.join(name);
    let archive = dir.join(format!("{name}.huff"));
    let restored = dir.join(format!("{name}.out"));

    fs::write(&source, data).unwrap();

    let report = compress_file(&source, &archive).unwrap();
    assert_eq!(report.original_bytes, data.len() as u64);
    assert_eq!(report.archive_bytes, fs::metadata(&archive).unwrap().len());

    let written = decompress_file(&archive, &restored).unwrap();
    assert_eq!(written, data.len());

    fs::read(&restored).unwrap()
}


#[test]
fn check_empty_file() {

    let dir = scratch_dir();

    assert!(round_trip(dir.path(), "empty", &[]).is_empty());

    let save = HuffmanSave::from_bytes(&fs::read(dir.path().join("empty.huff")).unwrap()).unwrap();
    assert!(save.frequencies.is_empty());
    assert!(save.encoding.is_empty());
}


#[test]
fn check_single_symbol_file() {

    let dir = scratch_dir();

    let data = vec![b'z'; 4321];

    assert_eq!(round_trip(dir.path(), "zzz", &data), data);

    let save = HuffmanSave::from_bytes(&fs::read(dir.path().join("zzz.huff")).unwrap()).unwrap();
    assert_eq!(save.encoding.len_bits(), 4321);
}


#[test]
fn check_text_and_binary_files() {

    let dir = scratch_dir();

    let text = "It was the best of times, it was the worst of times.\n".repeat(200);
    assert_eq!(round_trip(dir.path(), "text", text.as_bytes()), text.as_bytes());

    let mut rng = StdRng::seed_from_u64(0);
    let binary: Vec<u8> = (0..50_000).map(|_| rng.gen()).collect();
    assert_eq!(round_trip(dir.path(), "binary", &binary), binary);
}


#[test]
fn check_absolute_destination_rejected() {

    let dir = scratch_dir();
    let source = dir.path().join("source");
    fs::write(&source, b"data").unwrap();

    let absolute = fs::canonicalize(dir.path()).unwrap().join("out.huff");

    assert!(matches!(compress_file(&source, &absolute), Err(Error::AbsoluteDestination(_))));
    assert!(!absolute.exists());
}


#[test]
fn check_missing_source() {

    let dir = scratch_dir();

    let result = compress_file(&dir.path().join("nope"), &dir.path().join("out.huff"));

    assert!(matches!(result, Err(Error::InvalidSource { .. })));
    assert!(!dir.path().join("out.huff").exists());

    let result = decompress_file(&dir.path().join("nope.huff"), &dir.path().join("out"));

    assert!(matches!(result, Err(Error::InvalidSource { .. })));
}


#[test]
fn check_corrupt_archive_leaves_no_output() {

    let dir = scratch_dir();

    let garbage = dir.path().join("garbage.huff");
    fs::write(&garbage, b"\x01\x02").unwrap();

    let restored = dir.path().join("garbage.out");

    assert!(matches!(decompress_file(&garbage, &restored), Err(Error::Format(_))));
    assert!(!restored.exists());

    // Well-formed archive whose bits stop inside a code
    let source = dir.path().join("abc");
    let archive = dir.path().join("abc.huff");
    fs::write(&source, b"aaaabbc").unwrap();
    compress_file(&source, &archive).unwrap();

    let mut save = HuffmanSave::from_bytes(&fs::read(&archive).unwrap()).unwrap();
    save.encoding = save.encoding.iter_bits().take(save.encoding.len_bits() - 1).collect();
    fs::write(&archive, save.to_bytes().unwrap()).unwrap();

    assert!(matches!(
        decompress_file(&archive, &restored),
        Err(Error::Decoding(DecodingError::InvalidEncoding))
    ));
    assert!(!restored.exists());
}
