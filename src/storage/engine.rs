use std::io;

/// Named byte blobs: where compressed files come from and go to
pub trait ByteStore {
    fn read_all(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Replaces whatever is stored under `name` with `data`.
    fn write_all(&self, name: &str, data: &[u8]) -> io::Result<()>;
}
