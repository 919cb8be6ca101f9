use crate::PAGE_SIZE;
use crate::errors::page_error::{PageResult, WithPageId};
use crate::page_id::PageId;

/// Wrapper around a fixed-size byte array representing a page.
#[derive(Debug)]
pub struct Page {
    /// Identifier of the page: owning file and page number within it.
    pub(crate) page_id: PageId,
    /// The `PAGE_SIZE` bytes of the page. Boxed and owned by this struct.
    pub(crate) data: Box<[u8; PAGE_SIZE]>,
}

/// Public APIs for the Page struct.
/// All of them report failures as `PageError`, tagged with the id of this page.
impl Page {
    /// Creates a new page with all bytes initialized to zero.
    pub fn new_zeroed(page_id: PageId) -> Self {
        Self {
            page_id,
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    /// Formats the page as an empty data page, unlinked from any chain.
    /// Wipes the previous contents.
    pub fn initialize(&mut self, page_id: PageId) -> PageResult<()> {
        self.data.fill(0);
        self.page_id = page_id;

        self.header_mut()
            .and_then(|mut header| header.default())
            .with_page_id(page_id)
    }

    /// Retrieves the row stored in `slot_index`.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-slot error ([`PageError::is_invalid_slot`](crate::errors::page_error::PageError::is_invalid_slot))
    /// when the slot is out of range or its row has been deleted.
    pub fn row(&self, slot_index: u32) -> PageResult<&[u8]> {
        self.read_row_internal(slot_index)
            .with_page_id(self.page_id)
    }

    /// Inserts `row` and returns the slot index it was stored under.
    ///
    /// Reuses the slot of a deleted row when one exists, and compacts the page when free space
    /// is only available in fragments.
    ///
    /// # Errors
    ///
    /// Fails with a no-space error ([`PageError::is_no_space`](crate::errors::page_error::PageError::is_no_space))
    /// when the page does not have enough free bytes for the row (and a new slot entry, if needed).
    pub fn insert_row(&mut self, row: &[u8]) -> PageResult<u32> {
        self.insert_row_internal(row).with_page_id(self.page_id)
    }

    /// Deletes the row in `slot_index`. The slot stays allocated and can be reused by a later
    /// insert; the bytes are reclaimed when an insert compacts the page.
    pub fn delete_row(&mut self, slot_index: u32) -> PageResult<()> {
        self.delete_row_internal(slot_index)
            .with_page_id(self.page_id)
    }

    /// Lowest slot index holding a live row, or `None` for a page without rows.
    pub fn first_row(&self) -> PageResult<Option<u32>> {
        self.live_slot_from(0).with_page_id(self.page_id)
    }

    /// Next slot index after `slot_index` that holds a live row.
    pub fn next_row(&self, slot_index: u32) -> PageResult<Option<u32>> {
        self.live_slot_from(slot_index.saturating_add(1))
            .with_page_id(self.page_id)
    }

    /// Number of live rows on the page.
    pub fn live_row_count(&self) -> PageResult<usize> {
        self.live_extents()
            .map(|extents| extents.len())
            .with_page_id(self.page_id)
    }

    /// Total free bytes on the page, fragmented space included.
    pub fn free_space(&self) -> PageResult<usize> {
        self.header_ref()
            .and_then(|header| header.get_free_space())
            .map(usize::from)
            .with_page_id(self.page_id)
    }

    /// Page number of the next page in the chain, `None` at the tail.
    pub fn next_page(&self) -> PageResult<Option<u32>> {
        self.next_page_internal().with_page_id(self.page_id)
    }

    /// Links this page to `next_page`, or marks it as the tail of the chain.
    pub fn set_next_page(&mut self, next_page: Option<u32>) -> PageResult<()> {
        self.set_next_page_internal(next_page)
            .with_page_id(self.page_id)
    }

    /// Returns an immutable reference to the underlying data of the page.
    pub fn data(&self) -> &[u8; PAGE_SIZE] {
        &self.data
    }

    /// Returns a mutable reference to the underlying byte array of the page
    pub fn data_mut(&mut self) -> &mut [u8; PAGE_SIZE] {
        &mut self.data
    }
}
