pub mod bits;

pub use bits::{BitReader, BitWriter};
