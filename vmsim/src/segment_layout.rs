use crate::util::ceil_div;
use crate::{SimConfig, SimError};

/// The four program segments, in logical address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Text,
    Data,
    Bss,
    HeapStack,
}

impl Segment {
    pub(crate) const ALL: [Segment; 4] =
        [Segment::Text, Segment::Data, Segment::Bss, Segment::HeapStack];

    /// Text and data pages get their first-touch content from the
    /// executable image; bss and heap/stack pages start out zero-filled.
    pub fn is_image_backed(&self) -> bool {
        matches!(self, Segment::Text | Segment::Data)
    }
}

/// Page-granular layout of the four program segments.
///
/// Pages are numbered across the whole logical address space: all text pages
/// first, then data, bss and heap/stack. A segment whose size is not a
/// multiple of the page size still occupies whole pages; the tail of its
/// last page is padding.
#[derive(Debug, Clone)]
pub struct SegmentLayout {
    text_size: usize,
    data_size: usize,
    bss_size: usize,
    heap_stack_size: usize,
    page_size: usize,
}

impl SegmentLayout {
    pub(crate) fn new(config: &SimConfig) -> Result<Self, SimError> {
        if config.page_size == 0 {
            return Err(SimError::Construction("page size has to be non-zero"));
        }

        let layout = SegmentLayout {
            text_size: config.text_size,
            data_size: config.data_size,
            bss_size: config.bss_size,
            heap_stack_size: config.heap_stack_size,
            page_size: config.page_size,
        };

        if layout.total_pages() == 0 {
            return Err(SimError::Construction("address space holds no pages"));
        }

        Ok(layout)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn segment_size(&self, segment: Segment) -> usize {
        match segment {
            Segment::Text => self.text_size,
            Segment::Data => self.data_size,
            Segment::Bss => self.bss_size,
            Segment::HeapStack => self.heap_stack_size,
        }
    }

    pub fn page_count(&self, segment: Segment) -> usize {
        ceil_div(self.segment_size(segment), self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        Segment::ALL
            .iter()
            .map(|segment| self.page_count(*segment))
            .sum()
    }

    /// Upper bound of the logical address space: the sum of the declared
    /// segment sizes, NOT the page-rounded span.
    pub fn total_logical_size(&self) -> usize {
        self.text_size + self.data_size + self.bss_size + self.heap_stack_size
    }

    /// First page number of the given segment.
    pub fn first_page(&self, segment: Segment) -> usize {
        let mut first = 0;
        for other in Segment::ALL {
            if other == segment {
                break;
            }
            first += self.page_count(other);
        }
        first
    }

    /// Segment containing the given page, or `None` for page numbers past
    /// the end of the address space.
    pub fn segment_of_page(&self, page: usize) -> Option<Segment> {
        let mut first = 0;
        for segment in Segment::ALL {
            first += self.page_count(segment);
            if page < first {
                return Some(segment);
            }
        }
        None
    }

    /// How many leading bytes of the given page are backed by the
    /// executable image.
    ///
    /// A full `page_size` for interior text/data pages, the declared-size
    /// remainder for the last page of a text/data segment, zero for bss and
    /// heap/stack pages.
    pub fn image_backed_len(&self, page: usize) -> usize {
        let segment = match self.segment_of_page(page) {
            Some(segment) if segment.is_image_backed() => segment,
            _ => return 0,
        };

        let local = page - self.first_page(segment);
        let remaining = self.segment_size(segment) - local * self.page_size;
        usize::min(remaining, self.page_size)
    }
}
