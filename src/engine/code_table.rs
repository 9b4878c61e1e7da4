use std::fmt;

use crate::engine::huffman::{HuffmanNode, HuffmanTree};
use crate::protocol::constants::{ALPHABET_SIZE, MAX_CODE_LENGTH};
use crate::protocol::error::CodecError;

/// A code right-justified in `bits`, `len` bits long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCode {
    pub bits: u64,
    pub len: u8,
}

impl HuffmanCode {
    pub fn is_prefix_of(&self, other: &HuffmanCode) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for HuffmanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in (0..self.len).rev() {
            let bit = if (self.bits >> shift) & 1 == 1 { '1' } else { '0' };
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Unit -> code lookup for one tree
pub struct CodeTable {
    codes: Vec<Option<HuffmanCode>>,
    count: usize,
    max_len: u8,
}

impl CodeTable {
    pub fn build(tree: &HuffmanTree) -> Result<Self, CodecError> {
        let mut table = Self {
            codes: vec![None; ALPHABET_SIZE],
            count: 0,
            max_len: 0,
        };

        // a lone character still needs one bit per occurrence
        if let Some(unit) = tree.single_unit() {
            table.insert(unit, HuffmanCode { bits: 0, len: 1 });
            return Ok(table);
        }

        let mut stack = vec![(tree.root(), 0u64, 0usize)];
        while let Some((id, bits, len)) = stack.pop() {
            match tree.node(id) {
                Some(HuffmanNode::Leaf { unit }) => {
                    if len > MAX_CODE_LENGTH {
                        return Err(CodecError::CodeTooLong { unit, length: len });
                    }
                    table.insert(unit, HuffmanCode { bits, len: len as u8 });
                }
                Some(HuffmanNode::Internal { left, right }) => {
                    stack.push((right, (bits << 1) | 1, len + 1));
                    stack.push((left, bits << 1, len + 1));
                }
                None => {}
            }
        }

        Ok(table)
    }

    fn insert(&mut self, unit: u16, code: HuffmanCode) {
        self.codes[unit as usize] = Some(code);
        self.count += 1;
        self.max_len = self.max_len.max(code.len);
    }

    pub fn get(&self, unit: u16) -> Option<HuffmanCode> {
        self.codes[unit as usize]
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Codes in ascending unit order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, HuffmanCode)> + '_ {
        (0..=u16::MAX)
            .zip(self.codes.iter())
            .filter_map(|(unit, code)| code.map(|c| (unit, c)))
    }
}
