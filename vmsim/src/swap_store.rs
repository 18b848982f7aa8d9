use std::io;

use crate::modules::backing_storage::BackingStorageModule;

/// Page-granular backing store for evicted pages.
///
/// Slot `i` occupies storage bytes `[i * page_size, (i + 1) * page_size)`.
/// Slots are handed out in allocation order and never reclaimed: once a page
/// owns a slot it keeps it for the simulator's lifetime.
#[derive(Debug)]
pub struct SwapStore<S: BackingStorageModule> {
    storage: S,
    page_size: usize,

    /// Number of slots allocated so far.
    slot_count: usize,
}

impl<S: BackingStorageModule> SwapStore<S> {
    pub(crate) fn new(storage: S, page_size: usize) -> Self {
        SwapStore {
            storage,
            page_size,
            slot_count: 0,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// How many slots the backing storage can hold in total.
    pub fn capacity(&self) -> usize {
        self.storage.len() / self.page_size
    }

    /// Reads one page out of `slot`. A slot that cannot supply a full page
    /// is an error.
    pub fn read_slot(&mut self, slot: usize, dest: &mut [u8]) -> io::Result<()> {
        debug_assert_eq!(dest.len(), self.page_size);

        let read = self.storage.read(slot * self.page_size, dest)?;
        if read < self.page_size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "swap slot holds less than a full page",
            ));
        }

        Ok(())
    }

    /// Writes one page to swap and returns the slot it landed in:
    /// an existing `slot` is overwritten in place, `None` allocates the next
    /// free slot.
    pub(crate) fn write_slot(&mut self, slot: Option<usize>, src: &[u8]) -> io::Result<usize> {
        debug_assert_eq!(src.len(), self.page_size);

        let (slot, is_new) = match slot {
            Some(slot) => {
                debug_assert!(slot < self.slot_count, "overwriting an unallocated slot");
                (slot, false)
            }
            None => (self.slot_count, true),
        };

        self.storage.write(slot * self.page_size, src)?;
        if is_new {
            self.slot_count += 1;
        }

        Ok(slot)
    }
}
