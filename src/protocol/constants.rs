//! File format constants for hufftext compressed files

/// Highest format version this build can read and the one it writes
pub const FORMAT_VERSION: u8 = 0;

/// Fixed metadata prefix: version, tree length and last-byte bit counts
pub const METADATA_SIZE: usize = 4;

/// Metadata + smallest tree (one leaf, 17 bits) + at least one text byte
pub const MIN_FILE_SIZE: usize = 8;

/// One leaf: a marker bit and 16 bits of character, padded to 3 bytes
pub const MIN_TREE_SIZE: u32 = 3;

/// 65,536 leaves and 65,535 internal markers: 1,179,647 bits
pub const MAX_TREE_SIZE: u32 = 147_456;

/// Tree length is an 18-bit field
pub const TREE_SIZE_FIELD_MASK: u32 = 0x3_FFFF;

/// Number of distinct 16-bit code units
pub const ALPHABET_SIZE: usize = 1 << 16;

/// Bits used to store a leaf's character in the serialized tree
pub const CHAR_BITS: u8 = 16;

/// Width of the register holding a single code
pub const MAX_CODE_LENGTH: usize = 64;
