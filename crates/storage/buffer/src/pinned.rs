use crate::buffer::BufferManager;
use crate::errors::BufferError;
use crate::frame::FrameId;
use crate::guards::{PageReadGuard, PageWriteGuard};
use file::api::FileManager;
use page::page_id::PageId;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A pin on one buffered page.
///
/// While the handle lives, the frame holding the page cannot be evicted. Call
/// [`PinnedPage::mark_dirty`] after modifying the page so that the buffer writes it back before
/// reusing the frame. The pin is returned with [`PinnedPage::release`], or on drop if the handle
/// was never released explicitly.
pub struct PinnedPage<F: FileManager> {
    buffer: Arc<BufferManager<F>>,
    page_id: PageId,
    frame_id: FrameId,
    dirty: bool,
    released: bool,
}

impl<F: FileManager> PinnedPage<F> {
    pub(crate) fn new(buffer: Arc<BufferManager<F>>, page_id: PageId, frame_id: FrameId) -> Self {
        Self {
            buffer,
            page_id,
            frame_id,
            dirty: false,
            released: false,
        }
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Page number of the pinned page within its file.
    pub fn page_number(&self) -> u32 {
        self.page_id.page_number
    }

    /// Flags the page as modified. The flag is handed to the buffer when the pin is returned.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Shared latch on the page contents.
    pub fn read(&self) -> PageReadGuard<'_> {
        self.buffer.read_guard_from_frame(self.frame_id)
    }

    /// Exclusive latch on the page contents. Does not mark the page dirty by itself.
    pub fn write(&self) -> PageWriteGuard<'_> {
        self.buffer.write_guard_from_frame(self.frame_id)
    }

    /// Returns the pin to the buffer, passing along the dirty flag.
    pub fn release(mut self) -> Result<(), BufferError> {
        self.released = true;
        self.buffer.unpin_page(self.page_id, self.dirty)
    }
}

impl<F: FileManager> Drop for PinnedPage<F> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.buffer.unpin_page(self.page_id, self.dirty) {
            warn!(page_id = %self.page_id, error = %e, "failed to unpin page on drop");
        }
    }
}

impl<F: FileManager> fmt::Debug for PinnedPage<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinnedPage")
            .field("page_id", &self.page_id)
            .field("frame_id", &self.frame_id)
            .field("dirty", &self.dirty)
            .finish()
    }
}
