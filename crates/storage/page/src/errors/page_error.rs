use crate::errors::page_op_error::PageOpError;
use crate::page_id::PageId;

/// Public facing error type returned by the Page module.
#[derive(Debug, thiserror::Error)]
#[error("error on page {page_id}: {source}")]
pub struct PageError {
    /// The page ID on which the error occurred
    pub(crate) page_id: PageId,
    /// The source error
    pub(crate) source: PageOpError,
}

impl PageError {
    /// The page on which the operation failed.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// True when an insert was rejected because the page cannot hold the row.
    pub fn is_no_space(&self) -> bool {
        self.source.is_no_space()
    }

    /// True when the addressed slot is out of range or its row was deleted.
    pub fn is_invalid_slot(&self) -> bool {
        self.source.is_invalid_slot()
    }
}

/// Public facing result type of page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Helper trait to attach page_id context when surfacing errors.
pub(crate) trait WithPageId<T> {
    fn with_page_id(self, page_id: PageId) -> PageResult<T>;
}

impl<T, E: Into<PageOpError>> WithPageId<T> for Result<T, E> {
    fn with_page_id(self, page_id: PageId) -> PageResult<T> {
        self.map_err(|source| PageError {
            page_id,
            source: source.into(),
        })
    }
}
