use crate::errors::delete_error::DeleteError;
use crate::errors::header_error::HeaderError;
use crate::errors::insert_error::InsertError;
use crate::errors::read_row_error::ReadRowError;
use crate::errors::slot_error::SlotError;
use thiserror::Error;

/// Aggregator error type for all possible page related sub-errors
#[derive(Debug, Error)]
pub(crate) enum PageOpError {
    #[error("Error while accessing header")]
    Header(#[from] HeaderError),
    #[error("Error while accessing slot array")]
    Slot(#[from] SlotError),
    #[error("Error while reading row")]
    ReadRow(#[from] ReadRowError),
    #[error("Error while inserting row")]
    Insert(#[from] InsertError),
    #[error("Error while deleting row")]
    DeleteRow(#[from] DeleteError),
}

impl PageOpError {
    /// The slot error at the bottom of the chain, if any.
    fn slot_error(&self) -> Option<&SlotError> {
        match self {
            PageOpError::Slot(e)
            | PageOpError::ReadRow(ReadRowError::SlotError(e))
            | PageOpError::Insert(InsertError::SlotError(e))
            | PageOpError::DeleteRow(DeleteError::SlotError(e)) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn is_invalid_slot(&self) -> bool {
        matches!(self.slot_error(), Some(SlotError::InvalidSlot { .. }))
    }

    pub(crate) fn is_no_space(&self) -> bool {
        matches!(self, PageOpError::Insert(InsertError::NotEnoughSpace { .. }))
    }
}
