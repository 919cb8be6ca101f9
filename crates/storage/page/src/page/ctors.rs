use crate::PAGE_SIZE;
use crate::errors::page_error::PageResult;
use crate::page::api::Page;
use crate::page_id::PageId;

impl Page {
    /// Wraps bytes read from disk.
    pub fn from_bytes(page_id: PageId, bytes: Box<[u8; PAGE_SIZE]>) -> Self {
        Self {
            page_id,
            data: bytes,
        }
    }

    /// Creates a new, initialized empty data page.
    pub fn new_empty(page_id: PageId) -> PageResult<Self> {
        let mut page = Self::new_zeroed(page_id);
        page.initialize(page_id)?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HEADER_SIZE, MAX_ROW_SIZE};

    #[test]
    fn new_empty_page_has_no_rows_and_full_free_space() {
        let page = Page::new_empty(PageId::new(1, 0)).unwrap();

        assert_eq!(page.page_id(), PageId::new(1, 0));
        assert_eq!(page.first_row().unwrap(), None);
        assert_eq!(page.free_space().unwrap(), PAGE_SIZE - HEADER_SIZE);
        assert_eq!(page.next_page().unwrap(), None);
        assert_eq!(MAX_ROW_SIZE, 3996);
    }

    #[test]
    fn from_bytes_keeps_contents() {
        let page = Page::from_bytes(PageId::new(1, 1), Box::new([5u8; PAGE_SIZE]));

        assert_eq!(page.page_id(), PageId::new(1, 1));
        assert_eq!(page.data()[..], [5u8; PAGE_SIZE][..]);
    }
}
