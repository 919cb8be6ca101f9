//! Provides the implementation for the main buffer leveraged by the engine

use crate::errors::BufferError;
use crate::frame::{BufferFrame, FrameId};
use crate::guards::{PageReadGuard, PageWriteGuard};
use crate::pinned::PinnedPage;
use file::api::FileManager;
use page::page_id::{FileId, PageId};
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Condvar, Mutex, RwLock, TryLockError};
use tracing::{debug, trace};

/// The state of the page in the buffer
#[derive(Debug)]
enum PageState {
    /// Page is currently being loaded from disk
    Loading,
    /// Page has been loaded and available at the provided FrameId
    Ready(FrameId),
    /// The load was abandoned. Waiters go back and look the page up again.
    Failed,
}

/// An entry in the `PageId`->`FrameId` map.
#[derive(Debug)]
struct PageEntry {
    /// State of the page
    state: Mutex<PageState>,
    /// Synchronization conditional variable
    cond_var: Condvar,
}

impl PageEntry {
    fn new(state: PageState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            cond_var: Condvar::new(),
        })
    }

    fn settle(&self, state: PageState) {
        let mut st = self.state.lock().expect("PageEntry poisoned");
        *st = state;
        self.cond_var.notify_all();
    }
}

/// The buffer manager responsible for handling the cache pool of data pages.
///
/// Lock order is frame `page_id` latch first, then `page_map`. The pin path never holds the map
/// lock while latching a frame.
#[derive(Debug)]
pub struct BufferManager<F: FileManager> {
    file_manager: Arc<F>,
    page_map: RwLock<HashMap<PageId, Arc<PageEntry>>>,
    frames: Vec<BufferFrame>,
}

impl<F: FileManager> BufferManager<F> {
    /// Creates a new empty buffer manager with `pool_size` frames.
    pub fn new(file_manager: Arc<F>, pool_size: usize) -> Self {
        let mut frames = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            frames.push(BufferFrame::default());
        }
        Self {
            file_manager,
            frames,
            page_map: RwLock::new(HashMap::new()),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.frames.len()
    }

    pub fn file_manager(&self) -> &Arc<F> {
        &self.file_manager
    }

    /// Pins a page, loading it from its file first if no frame holds it.
    ///
    /// # Errors
    /// `BufferFull` if the page must be loaded and every frame is pinned, `ReadFailed` if the file
    /// manager cannot produce the page, `WriteFailed` if an evicted victim could not be written back.
    pub fn read_page(self: &Arc<Self>, page_id: PageId) -> Result<PinnedPage<F>, BufferError> {
        loop {
            // Check if there is a frame that holds this page
            let possible_page_entry = {
                let map_guard = self.page_map.read().expect("page map poisoned");
                map_guard.get(&page_id).cloned()
            };

            if let Some(page_entry) = possible_page_entry {
                if let Some(frame_id) = self.pin_resident(page_id, &page_entry) {
                    return Ok(PinnedPage::new(Arc::clone(self), page_id, frame_id));
                }
                // Evicted or failed under us, look again.
                continue;
            }

            // Cache miss. Lock the map for write and check nobody added the entry meanwhile.
            let (entry, is_loader_thread) = {
                let mut map = self.page_map.write().expect("page map poisoned");
                if let Some(existing) = map.get(&page_id).cloned() {
                    (existing, false)
                } else {
                    let new_entry = PageEntry::new(PageState::Loading);
                    map.insert(page_id, Arc::clone(&new_entry));
                    (new_entry, true)
                }
            };

            if !is_loader_thread {
                if let Some(frame_id) = self.pin_resident(page_id, &entry) {
                    return Ok(PinnedPage::new(Arc::clone(self), page_id, frame_id));
                }
                continue;
            }

            let frame_id = self.load_page(page_id, &entry)?;
            return Ok(PinnedPage::new(Arc::clone(self), page_id, frame_id));
        }
    }

    /// Appends a new zeroed page to `file_id` and pins it. The caller is expected to initialize
    /// the page and mark it dirty.
    pub fn allocate_page(self: &Arc<Self>, file_id: FileId) -> Result<PinnedPage<F>, BufferError> {
        let page_id = self
            .file_manager
            .allocate_page(file_id)
            .map_err(|source| BufferError::AllocateFailed { file_id, source })?;

        let frame_id = self.claim_frame(page_id)?.ok_or(BufferError::BufferFull)?;
        {
            let mut page = self.frames[frame_id].page.write().expect("frame poisoned");
            page.data_mut().fill(0);
            page.set_page_id(page_id);
        }

        self.page_map
            .write()
            .expect("page map poisoned")
            .insert(page_id, PageEntry::new(PageState::Ready(frame_id)));

        debug!(%page_id, frame_id, "allocated page");
        Ok(PinnedPage::new(Arc::clone(self), page_id, frame_id))
    }

    /// Gives back one pin on `page_id`. A `dirty` unpin marks the frame for write-back.
    pub fn unpin_page(&self, page_id: PageId, dirty: bool) -> Result<(), BufferError> {
        let frame_id = self
            .resident_frame(page_id)
            .ok_or(BufferError::PageNotResident(page_id))?;
        let frame = &self.frames[frame_id];

        let frame_page_id = frame.page_id.read().expect("frame poisoned");
        if *frame_page_id != Some(page_id) {
            return Err(BufferError::PageNotResident(page_id));
        }

        if dirty {
            frame.dirty.store(true, Ordering::Release);
        }

        frame
            .pin_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            })
            .map_err(|_| BufferError::PageNotPinned(page_id))?;

        trace!(%page_id, dirty, "unpinned page");
        Ok(())
    }

    /// Writes back the dirty pages of `file_id` and drops all its pages from the pool.
    ///
    /// # Errors
    /// `PagePinned` if some page of the file is still pinned. Pages visited before it have
    /// already been flushed.
    pub fn flush_file(&self, file_id: FileId) -> Result<(), BufferError> {
        self.evict_file(file_id, true)
    }

    /// Drops all pages of `file_id` from the pool without writing them back.
    pub fn discard_file(&self, file_id: FileId) -> Result<(), BufferError> {
        self.evict_file(file_id, false)
    }

    /// Writes back every dirty page in the pool. Pages stay resident and pinned pages are included.
    pub fn flush_all(&self) -> Result<(), BufferError> {
        for frame in &self.frames {
            let frame_page_id = frame.page_id.read().expect("frame poisoned");
            if let Some(page_id) = *frame_page_id {
                if frame.dirty.load(Ordering::Acquire) {
                    self.write_back(frame, page_id)?;
                }
            }
        }
        Ok(())
    }

    /// Current pin count of `page_id`, zero when the page is not resident.
    pub fn pin_count(&self, page_id: PageId) -> u32 {
        let Some(frame_id) = self.resident_frame(page_id) else {
            return 0;
        };
        let frame = &self.frames[frame_id];
        let frame_page_id = frame.page_id.read().expect("frame poisoned");
        if *frame_page_id == Some(page_id) {
            frame.pin_count.load(Ordering::Acquire)
        } else {
            0
        }
    }

    /// Computes a `PageReadGuard` for a frame.
    pub(crate) fn read_guard_from_frame(&self, frame_id: FrameId) -> PageReadGuard<'_> {
        let guard = self.frames[frame_id].page.read().expect("frame poisoned");
        PageReadGuard { guard }
    }

    /// Computes a `PageWriteGuard` for a frame.
    pub(crate) fn write_guard_from_frame(&self, frame_id: FrameId) -> PageWriteGuard<'_> {
        let guard = self.frames[frame_id].page.write().expect("frame poisoned");
        PageWriteGuard { guard }
    }

    /// Loads `page_id` into a claimed frame on behalf of the thread that inserted the `Loading`
    /// entry. On failure the entry is removed and waiters are woken up to retry.
    fn load_page(&self, page_id: PageId, entry: &Arc<PageEntry>) -> Result<FrameId, BufferError> {
        let frame_id = match self.claim_frame(page_id) {
            Ok(Some(frame_id)) => frame_id,
            Ok(None) => {
                self.abandon_load(page_id, entry);
                return Err(BufferError::BufferFull);
            }
            Err(e) => {
                self.abandon_load(page_id, entry);
                return Err(e);
            }
        };

        let loaded = {
            let mut page = self.frames[frame_id].page.write().expect("frame poisoned");
            let result = self.file_manager.read_page(page_id, page.data_mut());
            page.set_page_id(page_id);
            result
        };

        if let Err(source) = loaded {
            let frame = &self.frames[frame_id];
            *frame.page_id.write().expect("frame poisoned") = None;
            frame.pin_count.store(0, Ordering::Release);
            self.abandon_load(page_id, entry);
            return Err(BufferError::ReadFailed { page_id, source });
        }

        entry.settle(PageState::Ready(frame_id));
        trace!(%page_id, frame_id, "loaded page");
        Ok(frame_id)
    }

    fn abandon_load(&self, page_id: PageId, entry: &Arc<PageEntry>) {
        self.page_map
            .write()
            .expect("page map poisoned")
            .remove(&page_id);
        entry.settle(PageState::Failed);
    }

    /// Waits for the entry to settle, then pins the frame if it still holds `page_id`.
    /// `None` means the caller must look the page up again.
    fn pin_resident(&self, page_id: PageId, entry: &Arc<PageEntry>) -> Option<FrameId> {
        let frame_id = Self::wait_until_ready(entry)?;
        let frame = &self.frames[frame_id];
        let frame_page_id = frame.page_id.read().expect("frame poisoned");
        if *frame_page_id != Some(page_id) {
            return None;
        }
        frame.pin_count.fetch_add(1, Ordering::AcqRel);
        Some(frame_id)
    }

    /// Waits while the page is `Loading`. Returns `None` if the load failed.
    fn wait_until_ready(entry: &Arc<PageEntry>) -> Option<FrameId> {
        let mut state = entry.state.lock().expect("PageEntry poisoned");
        loop {
            match *state {
                PageState::Ready(fid) => return Some(fid),
                PageState::Failed => return None,
                PageState::Loading => {
                    state = entry.cond_var.wait(state).expect("PageEntry poisoned");
                }
            }
        }
    }

    /// Frame currently mapped to `page_id`, without waiting on pages still loading.
    fn resident_frame(&self, page_id: PageId) -> Option<FrameId> {
        let entry = {
            let map = self.page_map.read().expect("page map poisoned");
            map.get(&page_id).cloned()
        }?;
        let state = entry.state.lock().expect("PageEntry poisoned");
        match *state {
            PageState::Ready(frame_id) => Some(frame_id),
            _ => None,
        }
    }

    /// Claims a frame for `for_page_id`, pinned once and clean.
    ///
    /// Empty frames are preferred. Otherwise the first unpinned frame becomes the victim: its page
    /// is written back if dirty and its map entry removed. Frames whose latch is busy are skipped.
    /// `Ok(None)` means every frame is pinned or busy.
    fn claim_frame(&self, for_page_id: PageId) -> Result<Option<FrameId>, BufferError> {
        for (frame_id, frame) in self.frames.iter().enumerate() {
            match frame.page_id.try_write() {
                Ok(mut page_id) => {
                    if page_id.is_none() {
                        *page_id = Some(for_page_id);
                        frame.pin_count.store(1, Ordering::Release);
                        frame.dirty.store(false, Ordering::Release);
                        return Ok(Some(frame_id));
                    }
                }
                Err(TryLockError::WouldBlock) | Err(TryLockError::Poisoned(_)) => continue,
            }
        }

        for (frame_id, frame) in self.frames.iter().enumerate() {
            let mut page_id = match frame.page_id.try_write() {
                Ok(page_id) => page_id,
                Err(_) => continue,
            };
            let Some(victim) = *page_id else {
                continue;
            };
            if frame.pin_count.load(Ordering::Acquire) != 0 {
                continue;
            }

            if frame.dirty.load(Ordering::Acquire) {
                self.write_back(frame, victim)?;
            }
            self.page_map
                .write()
                .expect("page map poisoned")
                .remove(&victim);

            *page_id = Some(for_page_id);
            frame.pin_count.store(1, Ordering::Release);
            frame.dirty.store(false, Ordering::Release);
            debug!(%victim, new_page = %for_page_id, frame_id, "evicted page");
            return Ok(Some(frame_id));
        }

        Ok(None)
    }

    fn write_back(&self, frame: &BufferFrame, page_id: PageId) -> Result<(), BufferError> {
        let page = frame.page.read().expect("frame poisoned");
        self.file_manager
            .write_page(page_id, page.data())
            .map_err(|source| BufferError::WriteFailed { page_id, source })?;
        frame.dirty.store(false, Ordering::Release);
        trace!(%page_id, "wrote back page");
        Ok(())
    }

    fn evict_file(&self, file_id: FileId, write_dirty: bool) -> Result<(), BufferError> {
        for frame in &self.frames {
            let mut frame_page_id = frame.page_id.write().expect("frame poisoned");
            let Some(page_id) = *frame_page_id else {
                continue;
            };
            if page_id.file_id != file_id {
                continue;
            }
            if frame.pin_count.load(Ordering::Acquire) != 0 {
                return Err(BufferError::PagePinned(page_id));
            }
            if write_dirty && frame.dirty.load(Ordering::Acquire) {
                self.write_back(frame, page_id)?;
            }

            self.page_map
                .write()
                .expect("page map poisoned")
                .remove(&page_id);
            *frame_page_id = None;
            frame.dirty.store(false, Ordering::Release);
        }
        debug!(file_id, write_dirty, "evicted file pages");
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
