use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{code_table::CodeTable, huffman::HuffmanTree};
use crate::protocol::constants::{CHAR_BITS, FORMAT_VERSION};
use crate::protocol::{CodecError, MetadataHeader};
use crate::storage::ByteStore;
use crate::utils::bits::BitWriter;

/// Size breakdown of one compressed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionInfo {
    pub total_chars: usize,
    pub metadata_bytes: usize,
    pub tree_bytes: usize,
    pub text_bytes: usize,
}

impl CompressionInfo {
    pub fn compressed_bytes(&self) -> usize {
        self.metadata_bytes + self.tree_bytes + self.text_bytes
    }

    /// Compressed size over the raw two bytes per character.
    pub fn ratio(&self) -> f64 {
        if self.total_chars == 0 {
            return 0.0;
        }
        self.compressed_bytes() as f64 / (self.total_chars * 2) as f64
    }
}

impl fmt::Display for CompressionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} char(s) total", self.total_chars)?;
        writeln!(f, "{} byte(s) total", self.compressed_bytes())?;
        writeln!(f, "{} byte(s) for metadata", self.metadata_bytes)?;
        writeln!(f, "{} byte(s) for tree", self.tree_bytes)?;
        write!(f, "{} byte(s) for text", self.text_bytes)
    }
}

/// Builds the complete compressed file in memory.
pub fn encode_to_vec(text: &[u16]) -> Result<(Vec<u8>, CompressionInfo), CodecError> {
    if text.is_empty() {
        return Ok((Vec::new(), CompressionInfo::default()));
    }

    let tree = HuffmanTree::build(text)?;
    let table = CodeTable::build(&tree)?;
    debug!(
        "Built tree: {} codes, longest {} bits",
        table.len(),
        table.max_len()
    );

    // leaves carry a marker and a character, internal nodes a marker only
    let mut tree_bits = BitWriter::with_capacity(table.len() * (CHAR_BITS as usize + 2));
    tree.serialize(&mut tree_bits);

    let mut text_bits = BitWriter::with_capacity(text.len() * table.max_len() as usize);
    for &unit in text {
        let code = table.get(unit).ok_or(CodecError::InvalidArgument(
            "character missing from code table",
        ))?;
        text_bits.push_bits(code.bits, code.len as usize);
    }

    let header = MetadataHeader {
        version: FORMAT_VERSION,
        tree_len: tree_bits.byte_len() as u32,
        tree_last_bits: tree_bits.last_byte_bits(),
        text_last_bits: text_bits.last_byte_bits(),
    };

    let mut out =
        Vec::with_capacity(MetadataHeader::SIZE + tree_bits.byte_len() + text_bits.byte_len());
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(tree_bits.as_slice());
    out.extend_from_slice(text_bits.as_slice());

    let info = CompressionInfo {
        total_chars: text.len(),
        metadata_bytes: MetadataHeader::SIZE,
        tree_bytes: tree_bits.byte_len(),
        text_bytes: text_bits.byte_len(),
    };

    debug!(
        "Encoded {} chars: tree {} bytes ({} bits in last), text {} bytes ({} bits in last)",
        info.total_chars,
        info.tree_bytes,
        header.tree_last_bits,
        info.text_bytes,
        header.text_last_bits
    );

    Ok((out, info))
}

/// Encodes `text` and stores the result under `name` in a single write.
pub fn encode(
    text: &[u16],
    store: &dyn ByteStore,
    name: &str,
) -> Result<CompressionInfo, CodecError> {
    let (bytes, info) = encode_to_vec(text)?;
    store
        .write_all(name, &bytes)
        .map_err(|e| CodecError::storage(name, e))?;
    Ok(info)
}
