/// Residency state of one logical page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub valid: bool,

    /// Physical frame holding the page. Set exactly while `valid`.
    pub frame: Option<usize>,

    /// Modified since the page was last loaded into its frame.
    /// Only meaningful while `valid`.
    pub dirty: bool,

    /// Swap slot holding the last flushed copy of this page.
    /// Survives eviction and reload; never reclaimed.
    pub swap_slot: Option<usize>,
}

impl PageDescriptor {
    const fn empty() -> Self {
        PageDescriptor {
            valid: false,
            frame: None,
            dirty: false,
            swap_slot: None,
        }
    }
}

/// One descriptor per page across the whole logical address space, indexed
/// by logical page number.
///
/// Mutated only by the memory manager's fault handling and eviction.
#[derive(Debug)]
pub struct PageTable {
    entries: Vec<PageDescriptor>,
}

impl PageTable {
    pub(crate) fn new(total_pages: usize) -> Self {
        PageTable {
            entries: vec![PageDescriptor::empty(); total_pages],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, page: usize) -> Option<&PageDescriptor> {
        self.entries.get(page)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.entries.iter()
    }

    /// Frame of the page if it is resident.
    pub fn frame_of(&self, page: usize) -> Option<usize> {
        self.entries.get(page).and_then(|entry| {
            if entry.valid {
                debug_assert!(entry.frame.is_some(), "valid page without frame");
                entry.frame
            } else {
                None
            }
        })
    }

    /// True iff some descriptor currently maps the given frame.
    pub(crate) fn is_frame_mapped(&self, frame: usize) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.valid && entry.frame == Some(frame))
    }

    /// Marks the page resident in `frame`, clean, keeping its swap slot.
    pub(crate) fn install(&mut self, page: usize, frame: usize) {
        let entry = &mut self.entries[page];
        debug_assert!(!entry.valid, "installing an already resident page");
        entry.valid = true;
        entry.frame = Some(frame);
        entry.dirty = false;
    }

    /// Clears residency, keeping the swap slot for a future reload.
    pub(crate) fn invalidate(&mut self, page: usize) {
        let entry = &mut self.entries[page];
        entry.valid = false;
        entry.frame = None;
        entry.dirty = false;
    }

    pub(crate) fn mark_dirty(&mut self, page: usize) {
        let entry = &mut self.entries[page];
        debug_assert!(entry.valid, "dirtying a non-resident page");
        entry.dirty = true;
    }

    pub(crate) fn set_swap_slot(&mut self, page: usize, slot: usize) {
        self.entries[page].swap_slot = Some(slot);
    }
}
