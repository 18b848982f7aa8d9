use std::io;

use crate::modules::backing_storage::BackingStorageModule;

/// Read-only page source over the executable image.
///
/// The image is addressed by logical offset: page `p` is read at file offset
/// `p * page_size`, so the image layout has to match the page-granular
/// segment layout.
#[derive(Debug)]
pub struct ExecutableImage<S: BackingStorageModule> {
    storage: S,
    page_size: usize,
}

impl<S: BackingStorageModule> ExecutableImage<S> {
    pub(crate) fn new(storage: S, page_size: usize) -> Self {
        ExecutableImage { storage, page_size }
    }

    /// Reads the first-touch content of `page` into `dest`.
    ///
    /// `backed_len` is how many leading bytes the image backs (see
    /// [`SegmentLayout::image_backed_len`](crate::SegmentLayout::image_backed_len));
    /// everything past it is zero-filled. A page that should be fully backed
    /// must yield a full page from the image; a partially backed final page
    /// tolerates a shorter image, missing bytes read as zero.
    pub(crate) fn read_page(
        &mut self,
        page: usize,
        backed_len: usize,
        dest: &mut [u8],
    ) -> io::Result<()> {
        debug_assert_eq!(dest.len(), self.page_size);
        debug_assert!(backed_len <= self.page_size);

        dest.fill(0);
        if backed_len == 0 {
            return Ok(());
        }

        let read = self.storage.read(page * self.page_size, &mut dest[..backed_len])?;
        if backed_len == self.page_size && read < backed_len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "image ends inside a fully backed page",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::ExecutableImage;
    use crate::modules::backing_storage::MemBackingStorage;

    #[test]
    fn test_fully_backed_page_reads_image_bytes() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let mut image = ExecutableImage::new(MemBackingStorage::from_bytes(bytes.clone()), 16);

        let mut dest = [0xffu8; 16];
        image.read_page(1, 16, &mut dest).unwrap();
        assert_eq!(&dest[..], &bytes[16..32]);
    }

    #[test]
    fn test_partial_page_zero_fills_tail() {
        let mut image = ExecutableImage::new(MemBackingStorage::from_bytes(vec![0xaa; 20]), 16);

        let mut dest = [0xffu8; 16];
        image.read_page(1, 8, &mut dest).unwrap();

        // 4 image bytes, then zeros: the image tail and the segment padding
        assert_eq!(&dest[..4], &[0xaa; 4]);
        assert_eq!(&dest[4..], &[0u8; 12]);
    }

    #[test]
    fn test_unbacked_page_is_all_zero() {
        let mut image = ExecutableImage::new(MemBackingStorage::from_bytes(vec![0xaa; 64]), 16);

        let mut dest = [0xffu8; 16];
        image.read_page(2, 0, &mut dest).unwrap();
        assert_eq!(dest, [0u8; 16]);
    }

    #[test]
    fn test_truncated_fully_backed_page_is_an_error() {
        let mut image = ExecutableImage::new(MemBackingStorage::from_bytes(vec![0xaa; 24]), 16);

        let mut dest = [0u8; 16];
        assert!(image.read_page(1, 16, &mut dest).is_err());
    }
}
