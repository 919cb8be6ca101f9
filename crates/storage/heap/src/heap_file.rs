use crate::errors::{HeapError, HeapResult};
use crate::file_header::{FileHeaderInfo, FileHeaderMut, FileHeaderRef};
use crate::open_file::OpenFile;
use crate::rid::Rid;
use binary_helpers::bin_error::BinaryError;
use buffer::buffer::BufferManager;
use buffer::pinned::PinnedPage;
use file::api::FileManager;
use page::page_id::{FileId, PageId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// An open heap file.
///
/// Holds the header page pinned for its whole life, plus at most one data page, the current page.
/// Dropping a `HeapFile` unpins the current page, then the header page, then closes the file.
/// Use [`HeapFile::close`] to see the errors of those steps instead of having them logged.
pub struct HeapFile<F: FileManager> {
    // Field order is drop order.
    pub(crate) cur_page: Option<PinnedPage<F>>,
    pub(crate) header: PinnedPage<F>,
    pub(crate) file: OpenFile<F>,
    pub(crate) buffer: Arc<BufferManager<F>>,
    pub(crate) cur_rec: Option<Rid>,
}

impl<F: FileManager> HeapFile<F> {
    /// Opens the heap file `name`, pinning its header page and its first data page.
    ///
    /// The header is treated as modified from the moment it is pinned, so it is always written
    /// back once the file is closed.
    pub fn open(
        name: &str,
        file_manager: Arc<F>,
        buffer: Arc<BufferManager<F>>,
    ) -> HeapResult<Self> {
        info!(file = name, "opening heap file");
        let file = OpenFile::open(file_manager, name)?;
        let header_id = file.first_page()?;

        let mut header = buffer.read_page(header_id)?;
        header.mark_dirty();

        let first_page = {
            let guard = header.read();
            FileHeaderRef::new(guard.data())?.first_page()?
        };

        let cur_page = match first_page {
            Some(page_no) => Some(buffer.read_page(PageId::new(file.file_id(), page_no))?),
            None => None,
        };

        Ok(Self {
            cur_page,
            header,
            file,
            buffer,
            cur_rec: None,
        })
    }

    pub fn file_name(&self) -> &str {
        self.file.name()
    }

    pub fn file_id(&self) -> FileId {
        self.file.file_id()
    }

    /// Number of live records in the file.
    pub fn get_rec_cnt(&self) -> HeapResult<u32> {
        self.read_header(|header| header.get_rec_cnt())
    }

    /// Copy of the header as currently pinned.
    pub fn header_info(&self) -> HeapResult<FileHeaderInfo> {
        self.read_header(|header| header.snapshot())
    }

    /// Page number of the current page, if one is pinned.
    pub fn cur_page_no(&self) -> Option<u32> {
        self.cur_page.as_ref().map(PinnedPage::page_number)
    }

    /// The record most recently returned or accessed.
    pub fn cur_rec(&self) -> Option<Rid> {
        self.cur_rec
    }

    /// Copies out the record at `rid`, making its page the current page if it is not already.
    ///
    /// # Errors
    /// A page error for which [`HeapError::is_record_not_found`] holds if the slot is deleted or
    /// out of range; buffer errors from unpinning the old page or pinning the new one.
    pub fn get_record(&mut self, rid: Rid) -> HeapResult<Vec<u8>> {
        if self.cur_page_no() != Some(rid.page_no) {
            self.switch_to(Some(rid.page_no))?;
        }

        let record = {
            let guard = self.current_page()?.read();
            guard.row(rid.slot_no)?.to_vec()
        };
        self.cur_rec = Some(rid);

        Ok(record)
    }

    /// Unpins every page and closes the file, reporting the first failure. Every step is
    /// attempted even if an earlier one failed.
    pub fn close(self) -> HeapResult<()> {
        let HeapFile {
            cur_page,
            header,
            file,
            ..
        } = self;

        let name = file.name().to_string();
        let cur_released = cur_page.map(PinnedPage::release).transpose();
        let header_released = header.release();
        let closed = file.close();

        cur_released?;
        header_released?;
        closed?;
        debug!(file = %name, "closed heap file");
        Ok(())
    }

    pub(crate) fn current_page(&self) -> HeapResult<&PinnedPage<F>> {
        self.cur_page.as_ref().ok_or(HeapError::NoCurrentRecord)
    }

    pub(crate) fn first_page(&self) -> HeapResult<Option<u32>> {
        self.read_header(|header| header.first_page())
    }

    pub(crate) fn last_page(&self) -> HeapResult<Option<u32>> {
        self.read_header(|header| header.last_page())
    }

    /// Unpins the current page, then pins `page_no` clean as the new current page.
    /// With `None`, the file is left without a current page.
    pub(crate) fn switch_to(&mut self, page_no: Option<u32>) -> HeapResult<()> {
        if let Some(page) = self.cur_page.take() {
            page.release()?;
        }
        if let Some(page_no) = page_no {
            let page_id = PageId::new(self.file.file_id(), page_no);
            self.cur_page = Some(self.buffer.read_page(page_id)?);
            debug!(%page_id, "switched current page");
        }
        Ok(())
    }

    pub(crate) fn read_header<T>(
        &self,
        read: impl FnOnce(&FileHeaderRef<'_>) -> Result<T, BinaryError>,
    ) -> HeapResult<T> {
        let guard = self.header.read();
        let header = FileHeaderRef::new(guard.data())?;
        Ok(read(&header)?)
    }

    /// Applies `update` to the header and marks the header page dirty.
    pub(crate) fn update_header(
        &mut self,
        update: impl FnOnce(&mut FileHeaderMut<'_>) -> Result<(), BinaryError>,
    ) -> HeapResult<()> {
        {
            let mut guard = self.header.write();
            let mut header = FileHeaderMut::new(guard.data_mut())?;
            update(&mut header)?;
        }
        self.header.mark_dirty();
        Ok(())
    }
}

impl<F: FileManager> fmt::Debug for HeapFile<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapFile")
            .field("file", &self.file)
            .field("header", &self.header)
            .field("cur_page", &self.cur_page)
            .field("cur_rec", &self.cur_rec)
            .finish()
    }
}
