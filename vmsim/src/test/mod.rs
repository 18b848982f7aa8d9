use crate::modules::backing_storage::MemBackingStorage;
use crate::util::ceil_div;
use crate::{MemoryManager, SimConfig};

mod stress;

/// Builds a fully in-memory simulator around the given image bytes, with a
/// swap store sized for one slot per page.
pub(crate) fn get_test_manager(
    image: Vec<u8>,
    config: SimConfig,
) -> MemoryManager<MemBackingStorage, MemBackingStorage> {
    let total_pages = [
        config.text_size,
        config.data_size,
        config.bss_size,
        config.heap_stack_size,
    ]
    .iter()
    .map(|size| ceil_div(*size, config.page_size))
    .sum::<usize>();

    MemoryManager::new(
        MemBackingStorage::from_bytes(image),
        MemBackingStorage::new(total_pages * config.page_size),
        config,
    )
    .unwrap()
}

/// Four 16-byte segments over 16-byte pages: one page per segment.
pub(crate) fn one_page_per_segment_config(memory_size: usize) -> SimConfig {
    SimConfig {
        text_size: 16,
        data_size: 16,
        bss_size: 16,
        heap_stack_size: 16,
        page_size: 16,
        memory_size,
    }
}
