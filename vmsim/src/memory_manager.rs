use std::io;

use log::{debug, trace};

use crate::executable_image::ExecutableImage;
use crate::modules::backing_storage::{BackingStorageModule, FileBackingStorage};
use crate::page_table::PageTable;
use crate::physical_memory::PhysicalMemory;
use crate::segment_layout::SegmentLayout;
use crate::swap_store::SwapStore;
use crate::{SimConfig, SimError, SimResult};

/// The translation/fault/eviction engine.
///
/// Owns the page table, the physical memory arena, the swap store and the
/// executable image exclusively; every load/store funnels through
/// [`load`](MemoryManager::load) and [`store`](MemoryManager::store) and all
/// state changes happen inside fault resolution.
pub struct MemoryManager<I: BackingStorageModule, S: BackingStorageModule> {
    layout: SegmentLayout,
    page_table: PageTable,
    physical_memory: PhysicalMemory,
    swap: SwapStore<S>,
    image: ExecutableImage<I>,

    /// Scratch buffer holding one page during fault resolution, so faulting
    /// i/o happens before any state is mutated.
    page_buf: Vec<u8>,
}

impl MemoryManager<FileBackingStorage, FileBackingStorage> {
    /// Opens the executable image read-only and creates the swap file sized
    /// for one slot per logical page.
    pub fn from_files<P: AsRef<std::path::Path>>(
        image_path: P,
        swap_path: P,
        config: SimConfig,
    ) -> SimResult<Self> {
        let layout = SegmentLayout::new(&config)?;

        let image = FileBackingStorage::open(image_path).map_err(SimError::ConstructionIo)?;
        let swap =
            FileBackingStorage::create(swap_path, layout.total_pages() * config.page_size)
                .map_err(SimError::ConstructionIo)?;

        Self::new(image, swap, config)
    }
}

impl<I: BackingStorageModule, S: BackingStorageModule> MemoryManager<I, S> {
    pub fn new(image_storage: I, swap_storage: S, config: SimConfig) -> SimResult<Self> {
        let layout = SegmentLayout::new(&config)?;
        let physical_memory = PhysicalMemory::new(config.memory_size, config.page_size)?;

        // every page can end up in swap exactly once, so this bound is tight
        if swap_storage.len() < layout.total_pages() * config.page_size {
            return Err(SimError::Construction(
                "swap storage too small for one slot per page",
            ));
        }

        debug!(
            "new address space: {} pages of {} bytes, {} frames",
            layout.total_pages(),
            config.page_size,
            physical_memory.frame_count()
        );

        Ok(MemoryManager {
            page_table: PageTable::new(layout.total_pages()),
            swap: SwapStore::new(swap_storage, config.page_size),
            image: ExecutableImage::new(image_storage, config.page_size),
            page_buf: vec![0u8; config.page_size],
            layout,
            physical_memory,
        })
    }

    /// Reads one byte from the given logical address, faulting the page in
    /// first if necessary.
    pub fn load(&mut self, address: usize) -> SimResult<u8> {
        let (page, offset) = self.translate(address)?;
        let frame = self.require_resident(page)?;

        Ok(self.physical_memory.read(frame, offset))
    }

    /// Writes one byte to the given logical address, faulting the page in
    /// first if necessary, and marks the page dirty.
    pub fn store(&mut self, address: usize, value: u8) -> SimResult<()> {
        let (page, offset) = self.translate(address)?;
        let frame = self.require_resident(page)?;

        self.physical_memory.write(frame, offset, value);
        self.page_table.mark_dirty(page);

        Ok(())
    }

    /// Splits a logical address into page number and offset, rejecting
    /// addresses at or past the declared address space size.
    fn translate(&self, address: usize) -> SimResult<(usize, usize)> {
        if address >= self.layout.total_logical_size() {
            return Err(SimError::OutOfRange(address));
        }

        let page = address / self.layout.page_size();
        let offset = address % self.layout.page_size();
        debug_assert!(page < self.page_table.len());

        Ok((page, offset))
    }

    /// Returns the frame of `page`, resolving a page fault if it is not
    /// resident.
    fn require_resident(&mut self, page: usize) -> SimResult<usize> {
        if let Some(frame) = self.page_table.frame_of(page) {
            return Ok(frame);
        }
        self.handle_fault(page)
    }

    /// Page fault resolution.
    ///
    /// Order matters for the all-or-nothing guarantee: the page content is
    /// fetched into the scratch buffer before any frame is freed or any
    /// table entry is touched, so a failing read leaves everything as it
    /// was. A failing victim flush aborts before the victim is invalidated.
    fn handle_fault(&mut self, page: usize) -> SimResult<usize> {
        trace!("page fault on page {}", page);

        let swap_slot = self.page_table.get(page).and_then(|entry| entry.swap_slot);
        match swap_slot {
            // a flushed copy exists, it is at least as recent as the image
            Some(slot) => {
                trace!("loading page {} from swap slot {}", page, slot);
                self.swap
                    .read_slot(slot, &mut self.page_buf)
                    .map_err(|source| SimError::FaultIo { page, source })?;
            }
            None => {
                let backed_len = self.layout.image_backed_len(page);
                trace!("first touch of page {} ({} image bytes)", page, backed_len);
                self.image
                    .read_page(page, backed_len, &mut self.page_buf)
                    .map_err(|source| SimError::FaultIo { page, source })?;
            }
        }

        let frame = match self.physical_memory.allocate_frame(&self.page_table) {
            Some(frame) => frame,
            None => self.evict_victim(page)?,
        };

        self.physical_memory
            .page_mut(frame)
            .copy_from_slice(&self.page_buf);
        self.page_table.install(page, frame);
        debug!("page {} resident in frame {}", page, frame);

        Ok(frame)
    }

    /// Selects and evicts exactly one victim, returning its freed frame.
    ///
    /// Policy: the resident page mapped to the lowest frame index. The
    /// faulting page is not resident, so it can never be selected.
    fn evict_victim(&mut self, faulting_page: usize) -> SimResult<usize> {
        let mut victim: Option<(usize, usize)> = None;
        for (candidate, entry) in self.page_table.iter().enumerate() {
            if candidate == faulting_page {
                continue;
            }
            if let (true, Some(frame)) = (entry.valid, entry.frame) {
                if victim.map_or(true, |(_, lowest)| frame < lowest) {
                    victim = Some((candidate, frame));
                }
            }
        }
        // physical memory is full, so some page must be resident
        let (victim_page, victim_frame) =
            victim.expect("no free frame implies at least one resident page");

        let entry = *self
            .page_table
            .get(victim_page)
            .expect("victim came from this table");
        if entry.dirty {
            let slot = self
                .swap
                .write_slot(entry.swap_slot, self.physical_memory.page(victim_frame))
                .map_err(|source| SimError::FaultIo {
                    page: victim_page,
                    source,
                })?;
            self.page_table.set_swap_slot(victim_page, slot);
            trace!(
                "flushed dirty page {} to swap slot {}",
                victim_page,
                slot
            );
        } else {
            // clean: either never modified, or its swap slot already holds
            // an identical copy
            trace!("evicting clean page {} without flush", victim_page);
        }

        self.page_table.invalidate(victim_page);
        debug!("evicted page {} from frame {}", victim_page, victim_frame);

        Ok(victim_frame)
    }

    // ----- observation, used by dump/printing layers -----

    pub fn layout(&self) -> &SegmentLayout {
        &self.layout
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn physical_memory(&self) -> &PhysicalMemory {
        &self.physical_memory
    }

    pub fn swap_slot_count(&self) -> usize {
        self.swap.slot_count()
    }

    /// Content of one allocated swap slot.
    pub fn read_swap_slot(&mut self, slot: usize) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.layout.page_size()];
        self.swap.read_slot(slot, &mut buffer)?;
        Ok(buffer)
    }
}
