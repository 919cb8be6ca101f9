use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use binary_helpers::conversions::ConversionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DeleteError {
    #[error("Error while clearing the row's slot")]
    SlotError(#[from] SlotError),
    #[error("Error while releasing the row's space in the header")]
    HeaderError(#[from] HeaderError),
    #[error("Reclaimed space does not fit the on-page representation")]
    ConversionError(#[from] ConversionError),
}
