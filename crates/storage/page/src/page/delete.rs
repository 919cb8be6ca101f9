use crate::errors::delete_error::DeleteError;
use crate::page::api::Page;
use binary_helpers::conversions::UsizeConversion;

impl Page {
    pub(super) fn delete_row_internal(&mut self, slot_index: u32) -> Result<(), DeleteError> {
        let (offset, length) = self.live_slot(slot_index)?;

        self.slot_array_mut()?.set_slot(slot_index, 0, 0)?;

        // Deleting the physically last row lets free_start fall back to the end of the row below
        // it. Anywhere else the page is left with a gap.
        let free_start = self.header_ref()?.get_free_start()? as usize;
        let new_free_start = if offset + length == free_start {
            Some(self.highest_row_end()?.to_u16()?)
        } else {
            None
        };

        let mut header = self.header_mut()?;
        let free_space = header.view().get_free_space()? as usize + length;
        header.set_free_space(free_space.to_u16()?)?;
        match new_free_start {
            Some(new_free_start) => header.set_free_start(new_free_start)?,
            None => header.set_can_compact(1)?,
        }

        Ok(())
    }
}
