//! File-level entry points used by the `huffzip` and `huffunzip` binaries.
//!
//! Destinations are written through a temporary file in the same directory
//! and renamed into place once complete, so a failed run never leaves a
//! partial output behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{compress, decompress, Error, HuffmanSave};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {

    pub original_bytes: u64,
    pub archive_bytes: u64,
    pub encoded_bits: u64

}

impl CompressionReport {

    /// Original size divided by archive size. Zero for an empty source.
    pub fn ratio(&self) -> f64 {
        if self.archive_bytes == 0 {
            0.0
        } else {
            self.original_bytes as f64 / self.archive_bytes as f64
        }
    }

}


/// Checks that `path` names an existing regular file.
pub fn validate_source(path: &Path) -> Result<(), Error> {

    let metadata = fs::metadata(path)
        .map_err(|source| Error::InvalidSource { path: path.to_path_buf(), source })?;

    if !metadata.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    Ok(())
}


/// Compressed files may only be written below the working directory.
pub fn validate_destination(path: &Path) -> Result<(), Error> {

    if path.has_root() {
        return Err(Error::AbsoluteDestination(path.to_path_buf()));
    }

    Ok(())
}


pub fn compress_file(source: &Path, destination: &Path) -> Result<CompressionReport, Error> {

    validate_source(source)?;
    validate_destination(destination)?;

    let data = fs::read(source)?;

    let save = compress(&data)?;
    let bytes = save.to_bytes()?;

    write_atomically(destination, |out| out.write_all(&bytes))?;

    let report = CompressionReport {
        original_bytes: data.len() as u64,
        archive_bytes: bytes.len() as u64,
        encoded_bits: save.encoding.len_bits() as u64
    };

    let ratio = format!("{:.2}", report.ratio());

    info!(
        source = %source.display(),
        destination = %destination.display(),
        original = report.original_bytes,
        compressed = report.archive_bytes,
        ratio = %ratio,
        "compressed"
    );

    Ok(report)
}


/// Returns the number of bytes written to `destination`.
pub fn decompress_file(archive: &Path, destination: &Path) -> Result<usize, Error> {

    validate_source(archive)?;

    let save = HuffmanSave::read_from(BufReader::new(File::open(archive)?))?;

    debug!(symbols = save.frequencies.len(), bits = save.encoding.len_bits(), "read archive");

    let decoded = decompress(&save)?;

    write_atomically(destination, |out| out.write_all(&decoded))?;

    info!(
        archive = %archive.display(),
        destination = %destination.display(),
        bytes = decoded.len(),
        "decompressed"
    );

    Ok(decoded.len())
}


fn write_atomically<F>(destination: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut BufWriter<&File>) -> std::io::Result<()>
{

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir)?;

    {
        let mut out = BufWriter::new(temp.as_file());
        write(&mut out)?;
        out.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(destination).map_err(|e| e.error)?;

    Ok(())
}
