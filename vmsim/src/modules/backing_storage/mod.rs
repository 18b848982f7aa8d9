mod file_storage;
mod mem_storage;

use std::io;

pub use file_storage::FileBackingStorage;
pub use mem_storage::MemBackingStorage;

/// A byte-addressable persistent blob accessed by offset, backing either
/// the executable image or the swap store.
pub trait BackingStorageModule {
    /// Reads up to `dest.len()` bytes starting at `offset` into the front of
    /// `dest` and returns how many bytes the storage could supply.
    ///
    /// Short reads only happen at the end of the storage; whether they are
    /// an error is the caller's call.
    fn read(&mut self, offset: usize, dest: &mut [u8]) -> io::Result<usize>;

    /// Writes all of `src` at `offset`. Writing past the end of the storage
    /// is an error, the storage never grows.
    fn write(&mut self, offset: usize, src: &[u8]) -> io::Result<()>;

    /// Size of this storage in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::{BackingStorageModule, FileBackingStorage};

    pub(crate) fn get_test_file_storage(test_name: &str, size: usize) -> FileBackingStorage {
        FileBackingStorage::create(format!("/tmp/{}.tmp", test_name), size).unwrap()
    }

    fn gen_number(i: usize) -> u8 {
        (i * 3 + (i % 3) * 7 + (i % 11) * 51) as u8
    }

    pub(crate) fn check_storage_round_trip<S: BackingStorageModule>(mut storage: S) {
        let size = storage.len();
        let source: Vec<u8> = (0..size).map(gen_number).collect();

        const CHUNK: usize = 32;
        for (i, chunk) in source.chunks(CHUNK).enumerate() {
            storage.write(i * CHUNK, chunk).unwrap();
        }

        let mut dest = vec![0u8; size];
        let read = storage.read(0, &mut dest).unwrap();
        assert_eq!(read, size);
        assert_eq!(dest, source);

        // reads past the end are short, not errors
        let mut tail = [0u8; 16];
        assert_eq!(storage.read(size - 4, &mut tail).unwrap(), 4);
        assert_eq!(&tail[..4], &source[size - 4..]);
        assert_eq!(storage.read(size, &mut tail).unwrap(), 0);

        // writes past the end are rejected
        assert!(storage.write(size - 4, &[0u8; 16]).is_err());
    }
}
