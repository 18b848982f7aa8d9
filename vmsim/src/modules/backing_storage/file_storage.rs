use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use super::BackingStorageModule;

/// File-backed storage, used for the executable image and the swap file.
pub struct FileBackingStorage {
    file: File,

    /// cached file size, so no `metadata` call necessary
    file_size: usize,
}

impl FileBackingStorage {
    /// Opens an existing file read-only (the executable image).
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::options().read(true).open(path)?;
        let file_size = file.metadata()?.len() as usize;

        Ok(Self { file, file_size })
    }

    /// Creates (or truncates) a read/write file of exactly `size` bytes
    /// (the swap file).
    pub fn create<P: AsRef<Path>>(path: P, size: usize) -> io::Result<Self> {
        let file = File::options()
            .read(true)
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;

        file.set_len(size as u64)?;

        Ok(Self {
            file,
            file_size: size,
        })
    }
}

impl BackingStorageModule for FileBackingStorage {
    fn read(&mut self, offset: usize, dest: &mut [u8]) -> io::Result<usize> {
        if offset >= self.file_size {
            return Ok(0);
        }
        let available = usize::min(dest.len(), self.file_size - offset);

        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.read_exact(&mut dest[..available])?;

        Ok(available)
    }

    fn write(&mut self, offset: usize, src: &[u8]) -> io::Result<()> {
        if offset + src.len() > self.file_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "write past end of backing file",
            ));
        }

        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.write_all(src)?;

        Ok(())
    }

    fn len(&self) -> usize {
        self.file_size
    }
}

#[cfg(test)]
mod test {
    use super::super::test::{check_storage_round_trip, get_test_file_storage};
    use super::super::BackingStorageModule;
    use super::FileBackingStorage;

    #[test]
    fn test_file_storage_round_trip() {
        let storage = get_test_file_storage("vmsim_test_file_storage_round_trip", 256);
        check_storage_round_trip(storage);
    }

    #[test]
    fn test_file_storage_reopen_read_only() {
        let path = "/tmp/vmsim_test_file_storage_reopen.tmp";
        {
            let mut storage = FileBackingStorage::create(path, 64).unwrap();
            storage.write(10, b"paged").unwrap();
        }

        let mut storage = FileBackingStorage::open(path).unwrap();
        assert_eq!(storage.len(), 64);

        let mut buffer = [0u8; 5];
        assert_eq!(storage.read(10, &mut buffer).unwrap(), 5);
        assert_eq!(&buffer, b"paged");
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(FileBackingStorage::open("/tmp/vmsim_test_does_not_exist.tmp").is_err());
    }
}
