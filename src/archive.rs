use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::bitvec::BitVec;
use crate::FrequencyTable;


/// Everything needed to restore a compressed file: the encoded bits and the
/// frequency table the Huffman tree is rebuilt from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanSave {

    pub encoding: BitVec,
    pub frequencies: FrequencyTable

}

impl HuffmanSave {

    pub const fn new(encoding: BitVec, frequencies: FrequencyTable) -> Self {
        Self {
            encoding,
            frequencies
        }
    }


    /// Total number of bytes the archive decodes to, or `None` when the
    /// counts do not fit in a `usize`.
    pub fn original_len(&self) -> Option<usize> {
        self.frequencies.values()
            .try_fold(0_usize, |total, &count| total.checked_add(count))
    }


    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }


    pub fn from_bytes(input: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(input)
    }


    pub fn write_to(&self, writer: impl Write) -> Result<(), bincode::Error> {
        bincode::serialize_into(writer, self)
    }


    pub fn read_from(reader: impl Read) -> Result<Self, bincode::Error> {
        bincode::deserialize_from(reader)
    }

}
