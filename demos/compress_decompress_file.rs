use std::env;
use std::fs;
use std::path::PathBuf;

use huffman_file_compression::{compress_file, decompress_file};


fn main() {

    let source = env::args().nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Cargo.toml"));

    let archive = PathBuf::from("target/demo.huff");
    let restored = PathBuf::from("target/demo.out");

    fs::create_dir_all("target")
        .unwrap_or_else(|err| panic!("Could not create target directory: {}", err));

    // Compress

    let report = compress_file(&source, &archive)
        .unwrap_or_else(|err| panic!("Could not compress {}: {}", source.display(), err));

    // Decompress

    decompress_file(&archive, &restored)
        .unwrap_or_else(|err| panic!("Could not decompress {}: {}", archive.display(), err));

    let original = fs::read(&source)
        .unwrap_or_else(|err| panic!("Could not read file {}", err));
    let decompressed = fs::read(&restored)
        .unwrap_or_else(|err| panic!("Could not read file {}", err));

    assert_eq!(original, decompressed);

    println!("{}: {} bytes -> {} bytes ({} encoded bits)",
        source.display(), report.original_bytes, report.archive_bytes, report.encoded_bits);
}
