use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::storage::ByteStore;

/// In-process store, mostly for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, data: Vec<u8>) {
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), data);
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }
}

impl ByteStore for MemoryStorage {
    fn read_all(&self, name: &str) -> io::Result<Vec<u8>> {
        self.get(name).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no blob named '{}'", name))
        })
    }

    fn write_all(&self, name: &str, data: &[u8]) -> io::Result<()> {
        self.insert(name, data.to_vec());
        Ok(())
    }
}
