use thiserror::Error;

/// Errors returned by [`MemoryManager`](crate::MemoryManager) operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// The logical address lies outside the configured address space.
    ///
    /// The failed access has no side effects; the caller may retry with a
    /// corrected address.
    #[error("address {0} is outside the logical address space")]
    OutOfRange(usize),

    /// The executable image or the swap store could not transfer a full
    /// page for the given logical page.
    ///
    /// Fault resolution is all-or-nothing: when this is returned, the page
    /// table and physical memory are unchanged.
    #[error("i/o fault while paging logical page {page}: {source}")]
    FaultIo {
        page: usize,
        #[source]
        source: std::io::Error,
    },

    /// The simulator was rejected at construction time and never built.
    #[error("invalid construction: {0}")]
    Construction(&'static str),

    /// A backing file could not be opened or sized at construction time.
    #[error("backing file unavailable: {0}")]
    ConstructionIo(#[source] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
