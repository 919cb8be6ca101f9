use crate::NO_PAGE;
use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use crate::page::api::Page;

/// Row iteration and the next-page link used to walk a heap file.
impl Page {
    /// First slot at or after `from` that holds a live row.
    pub(super) fn live_slot_from(&self, from: u32) -> Result<Option<u32>, SlotError> {
        let slots = self.slot_array_ref()?;
        for slot_index in from..slots.len() {
            if slots.slot_ref(slot_index)?.is_live()? {
                return Ok(Some(slot_index));
            }
        }
        Ok(None)
    }

    pub(super) fn next_page_internal(&self) -> Result<Option<u32>, HeaderError> {
        let next_page = self.header_ref()?.get_next_page()?;
        Ok((next_page != NO_PAGE).then_some(next_page))
    }

    pub(super) fn set_next_page_internal(&mut self, next_page: Option<u32>) -> Result<(), HeaderError> {
        self.header_mut()?
            .set_next_page(next_page.unwrap_or(NO_PAGE))
    }
}
