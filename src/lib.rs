//! Lossless Huffman compression of arbitrary byte streams.
//!
//! The compressed form ([`HuffmanSave`]) keeps only the encoded bits and the
//! byte frequency table. The tree itself is never stored: both directions
//! rebuild it with [`tree::build_tree`], whose tie-breaking is deterministic.

mod archive;
mod bitvec;
mod error;
pub mod files;
pub mod logging;
mod min_heap;
pub mod tree;

use std::collections::{BTreeMap, HashMap};
use std::ptr;

use thiserror::Error;
use tracing::{debug, trace};

pub use archive::HuffmanSave;
pub use bitvec::{BitIndexError, BitIterator, BitVec, BitVecFormatError};
pub use error::Error;
pub use files::{compress_file, decompress_file, CompressionReport};
pub use min_heap::{HeapError, MinHeap};
pub use tree::Node;


/// Occurrence count of every byte value present in the source.
pub type FrequencyTable = BTreeMap<u8, usize>;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodingError {

    #[error("encoded bits end in the middle of a code")]
    InvalidEncoding,

    #[error("expected {expected} bits for a single-symbol archive, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("frequency table lists byte {value:#04x} with a count of zero")]
    ZeroFrequency { value: u8 },

    #[error("decoded {found} bytes but the frequency table accounts for {expected}")]
    SymbolCountMismatch { expected: usize, found: usize },

    #[error("archive has no symbols but carries {found} encoded bits")]
    UnexpectedBits { found: usize },

    #[error("frequency counts overflow the addressable size")]
    FrequencyOverflow,

}


pub fn value_frequencies(data: &[u8]) -> FrequencyTable {

    let mut frequencies = FrequencyTable::new();

    for &byte in data {

        frequencies.entry(byte)
            .and_modify(|counter| *counter += 1)
            .or_insert(1);
    }

    frequencies
}


pub fn compress(data: &[u8]) -> Result<HuffmanSave, Error> {

    let frequencies = value_frequencies(data);

    debug!(distinct = frequencies.len(), total = data.len(), "counted byte frequencies");

    let encoding = match frequencies.len() {

        0 => BitVec::new(),

        // A lone symbol has no code, so the bit count stores the repetitions
        1 => data.iter().map(|_| true).collect(),

        _ => {

            let root = tree::build_tree(&frequencies)?;
            let codes = tree::code_table(&root);

            for (value, code) in &codes {
                trace!(value, %code, "code assigned");
            }

            encode_with(&codes, data)?
        },
    };

    debug!(bits = encoding.len_bits(), "encoded source");

    Ok(HuffmanSave::new(encoding, frequencies))
}


/// Rewrites `data` as the concatenation of each byte's code.
fn encode_with(codes: &HashMap<u8, BitVec>, data: &[u8]) -> Result<BitVec, Error> {

    let mut encoded = BitVec::with_capacity(data.len());

    for &byte in data {
        let code = codes.get(&byte).ok_or(Error::MissingCode(byte))?;
        encoded.extend_from_bits(code);
    }

    Ok(encoded)
}


pub fn decompress(save: &HuffmanSave) -> Result<Vec<u8>, Error> {

    let encoding = &save.encoding;

    if let Some((&value, _)) = save.frequencies.iter().find(|&(_, &count)| count == 0) {
        return Err(DecodingError::ZeroFrequency { value }.into());
    }

    // Every partial sum taken while building the tree is bounded by this total
    let total = save.original_len().ok_or(DecodingError::FrequencyOverflow)?;

    let mut entries = save.frequencies.iter();

    match (entries.next(), entries.next()) {

        (None, _) => {

            if !encoding.is_empty() {
                return Err(DecodingError::UnexpectedBits { found: encoding.len_bits() }.into());
            }

            Ok(Vec::new())
        },

        (Some((&value, &count)), None) => {

            if encoding.len_bits() != count {
                return Err(DecodingError::LengthMismatch { expected: count, found: encoding.len_bits() }.into());
            }

            debug!(value, count, "single-symbol archive");

            Ok(vec![value; count])
        },

        _ => {

            let root = tree::build_tree(&save.frequencies)?;

            let decoded = walk_tree(&root, encoding)?;

            if decoded.len() != total {
                return Err(DecodingError::SymbolCountMismatch { expected: total, found: decoded.len() }.into());
            }

            Ok(decoded)
        },
    }
}


/// Follows `encoding` down from `root`, emitting a byte at every leaf.
fn walk_tree(root: &Node, encoding: &BitVec) -> Result<Vec<u8>, DecodingError> {

    // Each decoded byte consumes at least one bit
    let mut decoded = Vec::with_capacity(root.count().min(encoding.len_bits()));

    let mut node = root;

    for bit in encoding.iter_bits() {

        if let Node::Parent { left, right, .. } = node {

            let next_node: &Node = if bit { right } else { left };
            match next_node {

                Node::Parent { .. } => {
                    node = next_node;
                },

                Node::Leaf { value, .. } => {
                    decoded.push(*value);
                    node = root;
                },
            }

        } else {
            // Only reachable when the root is a leaf, which the caller rules out
            return Err(DecodingError::InvalidEncoding);
        }
    }

    if !ptr::eq(node, root) {
        return Err(DecodingError::InvalidEncoding);
    }

    Ok(decoded)
}
