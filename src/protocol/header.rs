use crate::protocol::constants::*;
use crate::protocol::error::CodecError;
use tracing::warn;

/// Fixed-size metadata header (4 bytes)
///
/// ```text
/// byte 0: vvvvvv tt   version, tree length bits 17-16
/// byte 1: tttttttt    tree length bits 15-8
/// byte 2: tttttttt    tree length bits 7-0
/// byte 3: aaaa bbbb   valid bits in last tree byte, last text byte
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataHeader {
    pub version: u8,
    pub tree_len: u32,
    pub tree_last_bits: u8,
    pub text_last_bits: u8,
}

impl MetadataHeader {
    pub const SIZE: usize = METADATA_SIZE;

    pub fn decode(buf: &[u8], name: &str) -> Result<Self, CodecError> {
        if buf.len() < Self::SIZE {
            warn!("Metadata header too short: {} bytes", buf.len());
            return Err(CodecError::corrupt(name, "truncated metadata header"));
        }

        Ok(Self {
            version: buf[0] >> 2,
            tree_len: (u32::from(buf[0] & 0x03) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]),
            tree_last_bits: buf[3] >> 4,
            text_last_bits: buf[3] & 0x0F,
        })
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let tree_len = self.tree_len & TREE_SIZE_FIELD_MASK;
        [
            (self.version << 2) | (tree_len >> 16) as u8,
            (tree_len >> 8) as u8,
            tree_len as u8,
            (self.tree_last_bits << 4) | (self.text_last_bits & 0x0F),
        ]
    }

    /// Checks every field against the format limits and the actual file size.
    pub fn validate(&self, name: &str, file_len: usize) -> Result<(), CodecError> {
        if self.version > FORMAT_VERSION {
            warn!("Unsupported format version {} in '{}'", self.version, name);
            return Err(CodecError::UnsupportedVersion {
                name: name.to_string(),
                version: self.version,
            });
        }

        if !(MIN_TREE_SIZE..=MAX_TREE_SIZE).contains(&self.tree_len) {
            warn!("Tree length {} out of range in '{}'", self.tree_len, name);
            return Err(CodecError::corrupt(name, "tree length out of range"));
        }

        if !(1..=8).contains(&self.tree_last_bits) || !(1..=8).contains(&self.text_last_bits) {
            warn!(
                "Bad last-byte bit counts in '{}': tree={} text={}",
                name, self.tree_last_bits, self.text_last_bits
            );
            return Err(CodecError::corrupt(name, "last-byte bit count out of range"));
        }

        // at least one byte of text must follow the tree
        if file_len <= self.text_start() {
            warn!(
                "'{}' is {} bytes, too short for a {}-byte tree",
                name, file_len, self.tree_len
            );
            return Err(CodecError::corrupt(name, "file too short for declared tree"));
        }

        Ok(())
    }

    /// Absolute bit position one past the last valid tree bit.
    pub fn tree_end_bit(&self) -> usize {
        (Self::SIZE + self.tree_len as usize - 1) * 8 + self.tree_last_bits as usize
    }

    /// Byte offset of the text region.
    pub fn text_start(&self) -> usize {
        Self::SIZE + self.tree_len as usize
    }
}
