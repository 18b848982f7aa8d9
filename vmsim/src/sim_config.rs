/// Construction parameters for one simulated address space.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub text_size: usize,
    pub data_size: usize,
    pub bss_size: usize,
    pub heap_stack_size: usize,

    /// Size of one page and of one physical frame.
    pub page_size: usize,

    /// Capacity of the physical memory arena in bytes.
    /// Has to be a non-zero multiple of `page_size`.
    pub memory_size: usize,
}
