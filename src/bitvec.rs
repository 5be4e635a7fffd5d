use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("bit index {index} out of range for a sequence of {len} bits")]
pub struct BitIndexError {

    pub index: usize,
    pub len: usize

}


#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BitVecFormatError {

    #[error("{len_bits} bits cannot be stored in {bytes} bytes")]
    LengthMismatch { len_bits: usize, bytes: usize },

    #[error("padding bits of the last byte are not zero")]
    DirtyPadding

}


/// Append-only bit sequence with an explicit bit length.
/// Bits are packed most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PackedBits", into = "PackedBits")]
pub struct BitVec {

    /// The actual raw bits
    raw_data: Vec<u8>,
    /// How many bits of padding the last byte contains.
    /// Padding bits have no meaning and are always zero
    last_byte_padding: u8

}

impl BitVec {

    pub fn new() -> Self {
        Self {
            raw_data: Vec::new(),
            last_byte_padding: 0
        }
    }


    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw_data: Vec::with_capacity(least_bytes_repr_for_bits(capacity)),
            last_byte_padding: 0
        }
    }


    pub fn len_bits(&self) -> usize {
        self.raw_data.len() * 8 - self.last_byte_padding as usize
    }


    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }


    pub fn least_len_bytes(&self) -> usize {
        self.raw_data.len()
    }


    pub fn append_bit(&mut self, bit: bool) {

        match self.raw_data.last_mut() {

            Some(last_byte) if self.last_byte_padding != 0 => {
                *last_byte |= (bit as u8) << (self.last_byte_padding - 1);
                self.last_byte_padding -= 1;
            },

            _ => {
                self.raw_data.push((bit as u8) << 7);
                self.last_byte_padding = 7;
            }
        }
    }


    pub fn get(&self, index: usize) -> Result<bool, BitIndexError> {

        if index >= self.len_bits() {
            return Err(BitIndexError { index, len: self.len_bits() });
        }

        Ok(bit_at(self.raw_data[index / 8], index % 8))
    }


    pub fn extend_from_bits(&mut self, bits: &BitVec) {

        if self.last_byte_padding == 0 {

            // The bits are aligned, so whole bytes can be copied

            self.raw_data.extend_from_slice(&bits.raw_data);
            self.last_byte_padding = bits.last_byte_padding;

        } else {

            for bit in bits.iter_bits() {
                self.append_bit(bit)
            }

        }
    }


    pub fn iter_bits(&self) -> BitIterator<'_> {
        BitIterator {
            bits: self,
            i: 0,
        }
    }


    #[cfg(test)]
    fn as_padded_bytes(&self) -> (&[u8], u8) {
        (
            &self.raw_data,
            self.last_byte_padding
        )
    }


    pub fn from_bool_slice(bools: &[bool]) -> Self {

        let mut res = Self::with_capacity(bools.len());

        for &b in bools {
            res.append_bit(b)
        }

        res
    }


    #[cfg(test)]
    fn to_bool_slice(&self) -> Box<[bool]> {
        self.iter_bits()
            .collect()
    }

}


impl fmt::Display for BitVec {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter_bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }

}


impl FromIterator<bool> for BitVec {

    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut res = Self::new();
        for bit in iter {
            res.append_bit(bit);
        }
        res
    }

}


pub const fn least_bytes_repr_for_bits(bit_count: usize) -> usize {
    bit_count / 8 + (bit_count % 8 != 0) as usize
}


const fn bit_at(byte: u8, bit_in_byte_i: usize) -> bool {
    (byte & (1_u8 << (7 - bit_in_byte_i))) != 0
}


/// On-disk shape of a `BitVec`: the exact bit count followed by the packed bytes.
#[derive(Serialize, Deserialize)]
struct PackedBits {

    len_bits: usize,
    bytes: Vec<u8>

}

impl From<BitVec> for PackedBits {

    fn from(bits: BitVec) -> Self {
        Self {
            len_bits: bits.len_bits(),
            bytes: bits.raw_data
        }
    }

}

impl TryFrom<PackedBits> for BitVec {
    type Error = BitVecFormatError;

    fn try_from(packed: PackedBits) -> Result<Self, Self::Error> {

        if packed.bytes.len() != least_bytes_repr_for_bits(packed.len_bits) {
            return Err(BitVecFormatError::LengthMismatch {
                len_bits: packed.len_bits,
                bytes: packed.bytes.len()
            });
        }

        let last_byte_padding = (packed.bytes.len() * 8 - packed.len_bits) as u8;

        if let Some(&last_byte) = packed.bytes.last() {
            let padding_mask = ((1_u16 << last_byte_padding) - 1) as u8;
            if last_byte & padding_mask != 0 {
                return Err(BitVecFormatError::DirtyPadding);
            }
        }

        Ok(Self {
            raw_data: packed.bytes,
            last_byte_padding
        })
    }

}


pub struct BitIterator<'a> {

    bits: &'a BitVec,
    i: usize

}

impl Iterator for BitIterator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {

        if self.i >= self.bits.len_bits() {
            return None;
        }

        let bit = bit_at(self.bits.raw_data[self.i / 8], self.i % 8);

        self.i += 1;

        Some(bit)
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len_bits().saturating_sub(self.i);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIterator<'_> {}


#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;


    #[test]
    fn check_iter() {

        let expected = [true, true, false, true, false, true, false, true];

        let v = BitVec::from_bool_slice(&expected);

        assert_eq!(*v.to_bool_slice(), expected);
        assert_eq!(v.iter_bits().len(), expected.len());
    }


    #[test]
    fn check_coherency() {

        let bools = [false, true, false, true, false, true];

        let v = BitVec::from_bool_slice(&bools);

        assert_eq!(bools.len(), v.len_bits());
        assert_eq!(v.least_len_bytes(), 1);
        assert_eq!(v.as_padded_bytes(), (&[0b0101_0100_u8][..], 2));

        assert_eq!(*v.to_bool_slice(), bools);
    }


    #[test]
    fn check_get() {

        let mut rng = StdRng::seed_from_u64(0);

        let bools: Vec<bool> = (0..77).map(|_| rng.gen_bool(0.5)).collect();

        let v = BitVec::from_bool_slice(&bools);

        for (i, &b) in bools.iter().enumerate() {
            assert_eq!(v.get(i), Ok(b));
        }

        assert_eq!(v.get(77), Err(BitIndexError { index: 77, len: 77 }));
        assert!(BitVec::new().get(0).is_err());
    }


    #[test]
    fn check_length_not_byte_aligned() {

        let mut v = BitVec::new();
        assert!(v.is_empty());
        assert_eq!(v.len_bits(), 0);

        for i in 1..=17 {
            v.append_bit(true);
            assert_eq!(v.len_bits(), i);
        }

        assert_eq!(v.least_len_bytes(), 3);
        assert_eq!(v.to_string(), "1".repeat(17));
    }


    #[test]
    fn check_extend() {

        let a = [true, false, false, true, false];
        let b = [true, false, false, false, false, true];
        let c = [true, false, false, true, false, true, false, false, false, false, true];

        let mut va = BitVec::from_bool_slice(&a);
        let vb = BitVec::from_bool_slice(&b);

        va.extend_from_bits(&vb);

        assert_eq!(*va.to_bool_slice(), c);

        let mut aligned = BitVec::from_bool_slice(&[false; 8]);
        aligned.extend_from_bits(&vb);

        assert_eq!(aligned.len_bits(), 14);
        assert_eq!(aligned.to_string(), "00000000100001");
    }


    #[test]
    fn check_serde() {

        let bools = [true, false, false, true, false, true, false, false, false, false, true];

        let v = BitVec::from_bool_slice(&bools);

        let ser = bincode::serialize(&v).unwrap();

        let des: BitVec = bincode::deserialize(&ser).unwrap();

        assert_eq!(v, des);
        assert_eq!(des.len_bits(), bools.len());
    }


    #[test]
    fn check_rejects_malformed_packing() {

        let too_short = PackedBits { len_bits: 9, bytes: vec![0xFF] };
        assert_eq!(
            BitVec::try_from(too_short),
            Err(BitVecFormatError::LengthMismatch { len_bits: 9, bytes: 1 })
        );

        let dirty = PackedBits { len_bits: 3, bytes: vec![0b1110_0001] };
        assert_eq!(BitVec::try_from(dirty), Err(BitVecFormatError::DirtyPadding));

        let clean = PackedBits { len_bits: 3, bytes: vec![0b1110_0000] };
        assert_eq!(BitVec::try_from(clean).map(|v| v.to_string()), Ok("111".to_string()));
    }

}
