use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::min_heap::HeapError;
use crate::DecodingError;


#[derive(Debug, Error)]
pub enum Error {

    #[error("cannot read source file {}: {source}", path.display())]
    InvalidSource { path: PathBuf, source: io::Error },

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("destination {} must be a relative path", .0.display())]
    AbsoluteDestination(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("malformed archive: {0}")]
    Format(#[from] bincode::Error),

    #[error("corrupt archive: {0}")]
    Decoding(#[from] DecodingError),

    #[error("byte {0:#04x} has no code in the tree")]
    MissingCode(u8),

    #[error("priority queue misuse: {0}")]
    Heap(#[from] HeapError),

}
