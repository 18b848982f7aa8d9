mod error;
mod executable_image;
mod memory_manager;
mod page_table;
mod physical_memory;
mod segment_layout;
mod sim_config;
mod swap_store;
mod util;

#[cfg(test)]
mod test;

pub use crate::error::{SimError, SimResult};
pub use crate::executable_image::ExecutableImage;
pub use crate::memory_manager::MemoryManager;
pub use crate::page_table::{PageDescriptor, PageTable};
pub use crate::physical_memory::PhysicalMemory;
pub use crate::segment_layout::{Segment, SegmentLayout};
pub use crate::sim_config::SimConfig;
pub use crate::swap_store::SwapStore;
pub mod modules;
