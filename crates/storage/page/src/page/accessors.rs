use crate::HEADER_SIZE;
use crate::errors::header_error::HeaderError;
use crate::header::{HeaderMut, HeaderRef};
use crate::page::api::Page;
use crate::page_id::PageId;

/// Accessor methods for the `Page` struct.
impl Page {
    /// Returns the unique identifier of the page.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Re-tags the page, e.g. when a buffer frame is reused for another page.
    pub fn set_page_id(&mut self, page_id: PageId) {
        self.page_id = page_id;
    }

    pub(crate) fn header_ref(&self) -> Result<HeaderRef<'_>, HeaderError> {
        HeaderRef::new(&self.data[..HEADER_SIZE])
    }

    pub(crate) fn header_mut(&mut self) -> Result<HeaderMut<'_>, HeaderError> {
        HeaderMut::new(&mut self.data[..HEADER_SIZE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_page_id_replaces_identifier() {
        let mut page = Page::new_zeroed(PageId::new(2, 5));

        page.set_page_id(PageId::new(3, 9));

        assert_eq!(page.page_id(), PageId::new(3, 9));
    }
}
