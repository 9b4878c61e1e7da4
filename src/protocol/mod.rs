pub mod constants;
pub mod error;
pub mod header;

pub use error::CodecError;
pub use header::MetadataHeader;
