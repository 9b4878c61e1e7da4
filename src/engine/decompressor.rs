use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::huffman::{HuffmanNode, HuffmanTree};
use crate::protocol::constants::MIN_FILE_SIZE;
use crate::protocol::{CodecError, MetadataHeader};
use crate::storage::ByteStore;
use crate::utils::bits::BitReader;

/// Structure of a compressed file, without decoding its text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_bytes: usize,
    pub header: [u8; 4],
    pub version: u8,
    pub tree_bytes: usize,
    pub tree_last_bits: u8,
    pub text_bytes: usize,
    pub text_last_bits: u8,
    pub leaf_count: usize,
    pub tree_depth: usize,
}

fn parse(data: &[u8], name: &str) -> Result<(MetadataHeader, HuffmanTree), CodecError> {
    if data.len() < MIN_FILE_SIZE {
        warn!("'{}' is only {} bytes", name, data.len());
        return Err(CodecError::corrupt(name, "file too short"));
    }

    let header = MetadataHeader::decode(data, name)?;
    header.validate(name, data.len())?;

    let reader = BitReader::new(data);
    let tree = HuffmanTree::deserialize(
        &reader,
        MetadataHeader::SIZE * 8,
        header.tree_end_bit(),
        name,
    )
    .inspect_err(|e| warn!("Rejecting '{}': {}", name, e))?;

    Ok((header, tree))
}

fn decode_text(
    tree: &HuffmanTree,
    text: &[u8],
    last_bits: u8,
    name: &str,
) -> Result<Vec<u16>, CodecError> {
    let valid_bits = text.len().saturating_sub(1) * 8 + last_bits as usize;

    // every occurrence of a lone character is a single 0 bit
    if let Some(unit) = tree.single_unit() {
        if text.iter().any(|&b| b != 0) {
            warn!("'{}' has a 1 bit in single-character text", name);
            return Err(CodecError::corrupt(name, "1 bit in single-character text"));
        }
        return Ok(vec![unit; valid_bits]);
    }

    let reader = BitReader::new(text);
    let root = tree.root();
    let mut out = Vec::with_capacity(valid_bits / 2);
    let mut node = root;

    for pos in 0..valid_bits {
        let bit = reader
            .bit(pos)
            .ok_or_else(|| CodecError::corrupt(name, "text region truncated"))?;
        node = tree
            .child(node, bit)
            .ok_or_else(|| CodecError::corrupt(name, "walk reached a missing child"))?;

        if let Some(HuffmanNode::Leaf { unit }) = tree.node(node) {
            out.push(unit);
            node = root;
        }
    }

    if node != root {
        debug!("'{}' ends mid-code, trailing bits ignored", name);
    }

    Ok(out)
}

/// Decodes a complete compressed file held in memory.
pub fn decode_slice(data: &[u8], name: &str) -> Result<Vec<u16>, CodecError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let (header, tree) = parse(data, name)?;
    debug!(
        "'{}': {} leaves, tree {} bytes",
        name,
        tree.leaf_count(),
        header.tree_len
    );

    let text = decode_text(
        &tree,
        &data[header.text_start()..],
        header.text_last_bits,
        name,
    )?;
    debug!("Decoded {} chars from '{}'", text.len(), name);
    Ok(text)
}

/// Reads `name` from `store` and decodes it.
pub fn decode(store: &dyn ByteStore, name: &str) -> Result<Vec<u16>, CodecError> {
    let data = store
        .read_all(name)
        .map_err(|e| CodecError::storage(name, e))?;
    decode_slice(&data, name)
}

/// Validates header and tree and reports the file layout.
pub fn inspect_slice(data: &[u8], name: &str) -> Result<FileSummary, CodecError> {
    if data.is_empty() {
        return Ok(FileSummary::default());
    }

    let (header, tree) = parse(data, name)?;
    let text_start = header.text_start();

    Ok(FileSummary {
        file_bytes: data.len(),
        header: header.encode(),
        version: header.version,
        tree_bytes: header.tree_len as usize,
        tree_last_bits: header.tree_last_bits,
        text_bytes: data.len() - text_start,
        text_last_bits: header.text_last_bits,
        leaf_count: tree.leaf_count(),
        tree_depth: tree.depth(),
    })
}
