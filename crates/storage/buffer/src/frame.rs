use page::page::Page;
use page::page_id::PageId;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU32};

/// The ID of a frame is basically just its index in the buffer's vector
pub(crate) type FrameId = usize;

/// A buffer frame is a memory allocation designed to store the contents of a data page in memory,
/// along with other metadata needed by the buffer manager.
///
/// The `page_id` lock doubles as the frame latch: pinning takes it shared, eviction takes it
/// exclusively, so a frame can only be repurposed while nobody is pinning it.
///
/// The `BufferFrame` is the owner of the `Page`. The `Page` is never moved outside of the frame,
/// only borrowed through guards.
#[derive(Debug)]
pub(crate) struct BufferFrame {
    /// The `PageId` corresponding to the `Page` stored in the `page` field.
    /// If frame is empty, this will be `None`
    pub(crate) page_id: RwLock<Option<PageId>>,

    /// The actual `Page` instance.
    pub(crate) page: RwLock<Page>,

    /// Number of outstanding pins. A frame with a non-zero count is never evicted.
    pub(crate) pin_count: AtomicU32,

    /// Set when some pin holder modified the page and it must be written back before reuse.
    pub(crate) dirty: AtomicBool,
}

impl Default for BufferFrame {
    fn default() -> Self {
        Self {
            page_id: RwLock::new(None),
            page: RwLock::new(Page::new_zeroed(PageId::new(0, 0))),
            pin_count: AtomicU32::new(0),
            dirty: AtomicBool::new(false),
        }
    }
}
