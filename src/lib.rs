//! Static Huffman compression for UTF-16 text.
//!
//! A compressed file is a 4-byte metadata header, the preorder-serialized
//! code tree, then the concatenated codes of the text. See
//! [`protocol::MetadataHeader`] for the header layout.
//!
//! ```
//! use hufftext::{decode, encode, MemoryStorage};
//!
//! let store = MemoryStorage::new();
//! let text: Vec<u16> = "abracadabra".encode_utf16().collect();
//! let info = encode(&text, &store, "a.huff")?;
//! assert_eq!(info.total_chars, 11);
//! assert_eq!(decode(&store, "a.huff")?, text);
//! # Ok::<(), hufftext::CodecError>(())
//! ```

pub mod config;
pub mod engine;
pub mod protocol;
pub mod storage;
pub mod utils;

pub use engine::{
    decode, decode_slice, encode, encode_to_vec, inspect_slice, CompressionInfo, FileSummary,
};
pub use protocol::CodecError;
pub use storage::{ByteStore, LocalStorage, MemoryStorage};
