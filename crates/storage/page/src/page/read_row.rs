use crate::errors::read_row_error::ReadRowError;
use crate::errors::slot_error::SlotError;
use crate::page::api::Page;

impl Page {
    pub(super) fn read_row_internal(&self, slot_index: u32) -> Result<&[u8], ReadRowError> {
        let (offset, length) = self.live_slot(slot_index)?;

        self.data
            .get(offset..offset + length)
            .ok_or(SlotError::InvalidSlot { slot_index }.into())
    }
}
