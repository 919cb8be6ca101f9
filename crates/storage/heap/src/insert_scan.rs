use crate::errors::{HeapError, HeapResult};
use crate::heap_file::HeapFile;
use crate::rid::Rid;
use buffer::buffer::BufferManager;
use buffer::pinned::PinnedPage;
use file::api::FileManager;
use page::MAX_ROW_SIZE;
use std::sync::Arc;
use tracing::debug;

/// Appends records to a heap file, extending the page chain when the last page is full.
///
/// Every page this session pins is considered modified and is written back after unpinning.
#[derive(Debug)]
pub struct InsertFileScan<F: FileManager> {
    heap: HeapFile<F>,
}

impl<F: FileManager> InsertFileScan<F> {
    pub fn new(
        name: &str,
        file_manager: Arc<F>,
        buffer: Arc<BufferManager<F>>,
    ) -> HeapResult<Self> {
        let mut heap = HeapFile::open(name, file_manager, buffer)?;
        if let Some(page) = heap.cur_page.as_mut() {
            page.mark_dirty();
        }
        Ok(Self { heap })
    }

    /// Stores `rec` and returns its id. The record lands on the current page if it fits, else
    /// on the last page of the chain, else on a freshly appended page.
    ///
    /// # Errors
    /// `InvalidRecLen` if `rec` is larger than any page can hold; nothing is pinned or allocated
    /// in that case. Page errors other than lack of space (an empty `rec`, for instance) and
    /// buffer errors are returned unchanged.
    pub fn insert_record(&mut self, rec: &[u8]) -> HeapResult<Rid> {
        if rec.len() > MAX_ROW_SIZE {
            return Err(HeapError::InvalidRecLen {
                len: rec.len(),
                max: MAX_ROW_SIZE,
            });
        }

        if self.heap.cur_page.is_none() {
            match self.heap.last_page()? {
                Some(last_page) => self.switch_to_dirty(last_page)?,
                None => self.append_page()?,
            }
        }

        let slot_no = match self.try_insert(rec)? {
            Some(slot_no) => slot_no,
            None => self.insert_at_tail(rec)?,
        };

        // The session's own view of the current page is authoritative.
        let page_no = self
            .heap
            .cur_page_no()
            .ok_or(HeapError::NoCurrentRecord)?;
        let rid = Rid::new(page_no, slot_no);
        self.heap.cur_rec = Some(rid);

        if let Some(page) = self.heap.cur_page.as_mut() {
            page.mark_dirty();
        }
        self.heap.update_header(|header| {
            let rec_cnt = header.get_rec_cnt()?;
            header.set_rec_cnt(rec_cnt + 1)
        })?;

        Ok(rid)
    }

    pub fn get_rec_cnt(&self) -> HeapResult<u32> {
        self.heap.get_rec_cnt()
    }

    pub fn heap(&self) -> &HeapFile<F> {
        &self.heap
    }

    /// Unpins everything and closes the file, reporting failures instead of logging them.
    pub fn close(self) -> HeapResult<()> {
        self.heap.close()
    }

    /// Inserts on the current page. `None` means the page is out of space.
    fn try_insert(&mut self, rec: &[u8]) -> HeapResult<Option<u32>> {
        let result = self.heap.current_page()?.write().insert_row(rec);
        match result {
            Ok(slot_no) => Ok(Some(slot_no)),
            Err(e) if e.is_no_space() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Retries on the last page if the current one is elsewhere in the chain, then appends.
    fn insert_at_tail(&mut self, rec: &[u8]) -> HeapResult<u32> {
        let last_page = self.heap.last_page()?;
        if let Some(last_page) = last_page {
            if self.heap.cur_page_no() != Some(last_page) {
                self.switch_to_dirty(last_page)?;
                if let Some(slot_no) = self.try_insert(rec)? {
                    return Ok(slot_no);
                }
            }
        }

        self.append_page()?;
        let slot_no = self.heap.current_page()?.write().insert_row(rec)?;
        Ok(slot_no)
    }

    fn switch_to_dirty(&mut self, page_no: u32) -> HeapResult<()> {
        self.heap.switch_to(Some(page_no))?;
        if let Some(page) = self.heap.cur_page.as_mut() {
            page.mark_dirty();
        }
        Ok(())
    }

    /// Allocates a data page, links it after the current page and makes it current.
    /// On an empty chain the new page becomes the first page as well.
    ///
    /// The old page is released only after the header accounts for the new one, so a failed
    /// unpin leaves `last_page` and `page_cnt` in step with the chain.
    fn append_page(&mut self) -> HeapResult<()> {
        let mut new_page = self.heap.buffer.allocate_page(self.heap.file_id())?;
        let new_page_no = new_page.page_number();
        new_page
            .write()
            .initialize(new_page.page_id())?;
        new_page.mark_dirty();

        let mut old_page = self.heap.cur_page.take();
        if let Some(old_page) = old_page.as_mut() {
            old_page.write().set_next_page(Some(new_page_no))?;
            old_page.mark_dirty();
        }
        self.heap.cur_page = Some(new_page);

        self.heap.update_header(|header| {
            if header.first_page()?.is_none() {
                header.set_first_page(Some(new_page_no))?;
            }
            header.set_last_page(Some(new_page_no))?;
            let page_cnt = header.get_page_cnt()?;
            header.set_page_cnt(page_cnt + 1)
        })?;

        debug!(
            file = self.heap.file_name(),
            page_no = new_page_no,
            "appended page to heap file"
        );
        old_page.map(PinnedPage::release).transpose()?;
        Ok(())
    }
}
