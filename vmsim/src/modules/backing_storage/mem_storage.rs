use std::io;

use super::BackingStorageModule;

/// In-memory storage, mainly for tests and self-contained demos.
pub struct MemBackingStorage {
    data: Vec<u8>,
}

impl MemBackingStorage {
    /// Zero-filled storage of the given size.
    pub fn new(size: usize) -> Self {
        MemBackingStorage {
            data: vec![0u8; size],
        }
    }

    /// Storage with fixed initial content (e.g. an executable image).
    pub fn from_bytes(data: Vec<u8>) -> Self {
        MemBackingStorage { data }
    }
}

impl BackingStorageModule for MemBackingStorage {
    fn read(&mut self, offset: usize, dest: &mut [u8]) -> io::Result<usize> {
        if offset >= self.data.len() {
            return Ok(0);
        }
        let available = usize::min(dest.len(), self.data.len() - offset);
        dest[..available].copy_from_slice(&self.data[offset..offset + available]);

        Ok(available)
    }

    fn write(&mut self, offset: usize, src: &[u8]) -> io::Result<()> {
        if offset + src.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "write past end of backing storage",
            ));
        }
        self.data[offset..offset + src.len()].copy_from_slice(src);

        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
