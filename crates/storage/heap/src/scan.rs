use crate::errors::{HeapError, HeapResult};
use crate::heap_file::HeapFile;
use crate::predicate::{Datatype, Operator, ScanPredicate};
use crate::rid::Rid;
use buffer::buffer::BufferManager;
use file::api::FileManager;
use std::sync::Arc;
use tracing::debug;

/// Cursor position saved by [`HeapFileScan::mark_scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScanMark {
    page_no: Option<u32>,
    rec: Option<Rid>,
}

/// Sequential scan over the records of a heap file, optionally filtered by a [`ScanPredicate`].
///
/// The page holding the last returned record stays pinned between calls to
/// [`HeapFileScan::scan_next`]; [`HeapFileScan::end_scan`] or dropping the scan unpins it.
#[derive(Debug)]
pub struct HeapFileScan<F: FileManager> {
    heap: HeapFile<F>,
    predicate: Option<ScanPredicate>,
    mark: Option<ScanMark>,
}

impl<F: FileManager> HeapFileScan<F> {
    /// Opens `name` for scanning. Until [`HeapFileScan::start_scan`] sets a filter, every
    /// record matches.
    pub fn new(
        name: &str,
        file_manager: Arc<F>,
        buffer: Arc<BufferManager<F>>,
    ) -> HeapResult<Self> {
        Ok(Self {
            heap: HeapFile::open(name, file_manager, buffer)?,
            predicate: None,
            mark: None,
        })
    }

    /// Sets the scan filter. Without a `filter` value the scan matches every record.
    ///
    /// # Errors
    /// `BadScanParm` if the parameters do not describe a valid predicate, see [`ScanPredicate::new`].
    /// The previous filter is kept in that case.
    pub fn start_scan(
        &mut self,
        offset: usize,
        length: usize,
        datatype: Datatype,
        filter: Option<&[u8]>,
        op: Operator,
    ) -> HeapResult<()> {
        self.predicate = match filter {
            Some(value) => Some(ScanPredicate::new(offset, length, datatype, value, op)?),
            None => None,
        };
        Ok(())
    }

    /// Unpins the current page and forgets the cursor. Calling it again does nothing.
    pub fn end_scan(&mut self) -> HeapResult<()> {
        self.heap.cur_rec = None;
        if let Some(page) = self.heap.cur_page.take() {
            page.release()?;
            debug!(file = self.heap.file_name(), "scan ended");
        }
        Ok(())
    }

    /// Remembers the current position so that [`HeapFileScan::reset_scan`] can return to it.
    pub fn mark_scan(&mut self) {
        self.mark = Some(ScanMark {
            page_no: self.heap.cur_page_no(),
            rec: self.heap.cur_rec,
        });
    }

    /// Moves the cursor back to the last mark. The next [`HeapFileScan::scan_next`] continues
    /// with the record after the marked one. Without a mark this does nothing.
    pub fn reset_scan(&mut self) -> HeapResult<()> {
        let Some(mark) = self.mark else {
            debug!(file = self.heap.file_name(), "reset without a mark");
            return Ok(());
        };

        if mark.page_no != self.heap.cur_page_no() {
            self.heap.switch_to(mark.page_no)?;
        }
        self.heap.cur_rec = mark.rec;
        Ok(())
    }

    /// Advances to the next record satisfying the predicate and returns its id, or `None` once
    /// the page chain is exhausted.
    ///
    /// Without a current page (after [`HeapFileScan::end_scan`]), the scan starts over at the
    /// first data page. If that page holds no record the scan ends right away, without looking
    /// at later pages.
    pub fn scan_next(&mut self) -> HeapResult<Option<Rid>> {
        let mut slot = match (self.heap.cur_page_no(), self.heap.cur_rec) {
            (None, _) => {
                let Some(first_page) = self.heap.first_page()? else {
                    return Ok(None);
                };
                self.heap.switch_to(Some(first_page))?;

                let first_row = self.heap.current_page()?.read().first_row()?;
                if first_row.is_none() {
                    self.heap.switch_to(None)?;
                    return Ok(None);
                }
                first_row
            }
            (Some(_), Some(rid)) => self.heap.current_page()?.read().next_row(rid.slot_no)?,
            (Some(_), None) => self.heap.current_page()?.read().first_row()?,
        };

        loop {
            let Some(slot_no) = slot else {
                let next_page = self.heap.current_page()?.read().next_page()?;
                let Some(next_page) = next_page else {
                    return Ok(None);
                };
                self.heap.switch_to(Some(next_page))?;
                slot = self.heap.current_page()?.read().first_row()?;
                continue;
            };

            let page = self.heap.current_page()?;
            let rid = Rid::new(page.page_number(), slot_no);
            let matched = {
                let guard = page.read();
                let record = guard.row(slot_no)?;
                self.predicate
                    .as_ref()
                    .is_none_or(|predicate| predicate.matches(record))
            };
            self.heap.cur_rec = Some(rid);

            if matched {
                return Ok(Some(rid));
            }
            slot = self.heap.current_page()?.read().next_row(slot_no)?;
        }
    }

    /// Copy of the record under the cursor.
    pub fn get_record(&self) -> HeapResult<Vec<u8>> {
        let rid = self.heap.cur_rec.ok_or(HeapError::NoCurrentRecord)?;
        let guard = self.heap.current_page()?.read();
        let record = guard.row(rid.slot_no)?.to_vec();
        Ok(record)
    }

    /// Random access by id. Moves the cursor to `rid`.
    pub fn get_record_by_rid(&mut self, rid: Rid) -> HeapResult<Vec<u8>> {
        self.heap.get_record(rid)
    }

    /// Deletes the record under the cursor. The cursor stays put, so the next
    /// [`HeapFileScan::scan_next`] continues after the deleted record.
    pub fn delete_record(&mut self) -> HeapResult<()> {
        let rid = self.heap.cur_rec.ok_or(HeapError::NoCurrentRecord)?;
        let page = self
            .heap
            .cur_page
            .as_mut()
            .ok_or(HeapError::NoCurrentRecord)?;

        page.write().delete_row(rid.slot_no)?;
        page.mark_dirty();

        self.heap.update_header(|header| {
            let rec_cnt = header.get_rec_cnt()?;
            header.set_rec_cnt(rec_cnt.saturating_sub(1))
        })?;
        debug!(%rid, "deleted record");
        Ok(())
    }

    /// Flags the current page as modified.
    pub fn mark_dirty(&mut self) {
        if let Some(page) = self.heap.cur_page.as_mut() {
            page.mark_dirty();
        }
    }

    pub fn get_rec_cnt(&self) -> HeapResult<u32> {
        self.heap.get_rec_cnt()
    }

    pub fn heap(&self) -> &HeapFile<F> {
        &self.heap
    }

    /// Ends the scan and closes the file, reporting failures instead of logging them.
    pub fn close(self) -> HeapResult<()> {
        self.heap.close()
    }
}
