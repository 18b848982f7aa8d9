use crate::page_table::PageTable;
use crate::SimError;

/// Fixed-capacity byte arena partitioned into page-sized frames.
///
/// Frame occupancy is not stored here: a frame is occupied iff some page
/// descriptor maps it, so allocation derives its view from the page table.
#[derive(Debug)]
pub struct PhysicalMemory {
    data: Box<[u8]>,
    page_size: usize,
}

impl PhysicalMemory {
    pub(crate) fn new(memory_size: usize, page_size: usize) -> Result<Self, SimError> {
        if memory_size == 0 || memory_size % page_size != 0 {
            return Err(SimError::Construction(
                "memory size has to be a non-zero multiple of the page size",
            ));
        }

        Ok(PhysicalMemory {
            data: vec![0u8; memory_size].into_boxed_slice(),
            page_size,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.data.len() / self.page_size
    }

    #[inline]
    pub fn read(&self, frame: usize, offset: usize) -> u8 {
        debug_assert!(offset < self.page_size);
        self.data[frame * self.page_size + offset]
    }

    #[inline]
    pub(crate) fn write(&mut self, frame: usize, offset: usize, value: u8) {
        debug_assert!(offset < self.page_size);
        self.data[frame * self.page_size + offset] = value;
    }

    /// Whole frame content, for flushing to swap.
    pub fn page(&self, frame: usize) -> &[u8] {
        let start = frame * self.page_size;
        &self.data[start..start + self.page_size]
    }

    pub(crate) fn page_mut(&mut self, frame: usize) -> &mut [u8] {
        let start = frame * self.page_size;
        &mut self.data[start..start + self.page_size]
    }

    /// First-fit frame allocation: the lowest frame index no page descriptor
    /// currently maps, or `None` when physical memory is fully occupied.
    pub(crate) fn allocate_frame(&self, page_table: &PageTable) -> Option<usize> {
        (0..self.frame_count()).find(|frame| !page_table.is_frame_mapped(*frame))
    }

    /// Raw arena content, for dumps.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
