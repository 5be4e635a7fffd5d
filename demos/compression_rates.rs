use huffman_file_compression::{compress, decompress};


fn main() {

    let samples: [(&str, Vec<u8>); 4] = [
        ("repeated byte", vec![b'x'; 64 * 1024]),
        ("english text", "The quick brown fox jumps over the lazy dog. ".repeat(1500).into_bytes()),
        ("two symbols", (0..64 * 1024).map(|i| if i % 7 == 0 { b'1' } else { b'0' }).collect()),
        ("all byte values", (0..64 * 1024).map(|i| (i % 256) as u8).collect()),
    ];

    for (name, data) in samples {

        let save = compress(&data)
            .unwrap_or_else(|err| panic!("Could not compress {name}: {err}"));

        let compressed = save.to_bytes()
            .unwrap_or_else(|err| panic!("Could not serialize {name}: {err}"));

        assert_eq!(decompress(&save).unwrap_or_else(|err| panic!("Could not decompress {name}: {err}")), data);

        println!("{name}\n  Original size: {} KiB\n  Compressed size: {} KiB\n  Compression rate: {:.2}",
            data.len() / 1024, compressed.len() / 1024, data.len() as f64 / compressed.len() as f64);
    }
}
