use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::storage::ByteStore;

pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute names replace the root.
    pub fn data_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ByteStore for LocalStorage {
    fn read_all(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = self.data_path(name);
        let data = fs::read(&path)?;
        debug!("Read {} bytes from {:?}", data.len(), path);
        Ok(data)
    }

    fn write_all(&self, name: &str, data: &[u8]) -> io::Result<()> {
        let path = self.data_path(name);
        fs::write(&path, data)?;
        debug!("Wrote {} bytes to {:?}", data.len(), path);
        Ok(())
    }
}
