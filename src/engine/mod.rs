pub mod freq_list;
pub mod huffman;
pub mod code_table;
pub mod compressor;
pub mod decompressor;

pub use compressor::*;
pub use decompressor::*;
