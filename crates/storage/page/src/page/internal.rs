use crate::errors::slot_error::SlotError;
use crate::page::api::Page;
use crate::slot_array::{SlotArrayMut, SlotArrayRef};
use crate::{HEADER_SIZE, PAGE_SIZE};

/// Physical placement of a live row: `(slot_index, start, end)`, end exclusive.
pub(crate) type RowExtent = (u32, usize, usize);

/// Internal methods for the `Page` struct.
impl Page {
    /// Returns an immutable view of the slot array.
    pub(crate) fn slot_array_ref(&self) -> Result<SlotArrayRef<'_>, SlotError> {
        let header = self.header_ref()?;
        let region_start = header.get_free_end()? as usize + 1;
        let slot_count = header.get_slot_count()?;
        let region = self
            .data
            .get(region_start..PAGE_SIZE)
            .ok_or(SlotError::SlotRegionSizeMismatch {
                expected_size: slot_count as usize * crate::slot::SLOT_SIZE,
                actual_size: 0,
            })?;
        SlotArrayRef::new(region, slot_count)
    }

    /// Returns a mutable view of the slot array.
    pub(crate) fn slot_array_mut(&mut self) -> Result<SlotArrayMut<'_>, SlotError> {
        let header = self.header_ref()?;
        let region_start = header.get_free_end()? as usize + 1;
        let slot_count = header.get_slot_count()?;
        let region = self
            .data
            .get_mut(region_start..PAGE_SIZE)
            .ok_or(SlotError::SlotRegionSizeMismatch {
                expected_size: slot_count as usize * crate::slot::SLOT_SIZE,
                actual_size: 0,
            })?;
        SlotArrayMut::new(region, slot_count)
    }

    /// Offset and length of the row in `slot_index`, failing if the slot holds no live row.
    pub(crate) fn live_slot(&self, slot_index: u32) -> Result<(usize, usize), SlotError> {
        let slot = self.slot_array_ref()?.slot_ref(slot_index)?;
        if !slot.is_live()? {
            return Err(SlotError::InvalidSlot { slot_index });
        }
        Ok((slot.offset()? as usize, slot.length()? as usize))
    }

    /// Extents of all live rows, in slot index order.
    pub(crate) fn live_extents(&self) -> Result<Vec<RowExtent>, SlotError> {
        let mut extents = Vec::new();
        for slot in self.slot_array_ref()?.iter() {
            let slot = slot?;
            if slot.is_live()? {
                let start = slot.offset()? as usize;
                extents.push((slot.slot_index(), start, start + slot.length()? as usize));
            }
        }
        Ok(extents)
    }

    /// End of the physically highest live row, or `HEADER_SIZE` when the page holds no rows.
    pub(crate) fn highest_row_end(&self) -> Result<usize, SlotError> {
        Ok(self
            .live_extents()?
            .into_iter()
            .map(|(_, _, end)| end)
            .max()
            .unwrap_or(HEADER_SIZE))
    }

    /// Slides every live row down to the start of the row region, in physical order, closing the
    /// gaps left by deleted rows. Slot indices are preserved; only their offsets change.
    pub(crate) fn compact(&mut self) -> Result<(), SlotError> {
        let mut extents = self.live_extents()?;
        extents.sort_by_key(|&(_, start, _)| start);

        let mut write_head = HEADER_SIZE;
        for (slot_index, start, end) in extents {
            let length = end - start;
            if start != write_head {
                self.data.copy_within(start..end, write_head);
            }
            self.slot_array_mut()?
                .set_slot(slot_index, write_head as u16, length as u16)?;
            write_head += length;
        }

        let mut header = self.header_mut()?;
        header.set_free_start(write_head as u16)?;
        header.set_can_compact(0)?;

        Ok(())
    }
}
