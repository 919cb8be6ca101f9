//! Slot Array Handling for Slotted Pages
//! -------------------------------------
//!
//! Zero-copy views (`SlotArrayRef` and `SlotArrayMut`) into the *slot array region*
//! of a page. The array grows inward from the end of the page, so **logical slot
//! index 0 is the last `SLOT_SIZE` chunk of the region** and indices increase leftwards:
//!
//! ```text
//!   [slot_count - 1]   [slot_count - 2]     ...     [1]   [0]
//!   ^ lower addresses                         higher addresses ^
//!
//!   physical_start = slot_array_len - (slot_index + 1) * SLOT_SIZE
//! ```
//!
//! Adding a slot never moves existing entries. Both views check at construction that
//! the region is exactly `slot_count * SLOT_SIZE` bytes.

use crate::errors::slot_error::SlotError;
use crate::slot::{SLOT_SIZE, SlotMut, SlotRef};
use std::ops::Range;

/// Immutable zero-copy view into the slot array of a slotted page.
#[derive(Debug)]
pub(crate) struct SlotArrayRef<'a> {
    bytes: &'a [u8],
}

impl<'a> SlotArrayRef<'a> {
    pub(super) fn new(bytes: &'a [u8], slot_count: u16) -> Result<Self, SlotError> {
        check_region_size(bytes.len(), slot_count)?;
        Ok(Self { bytes })
    }

    /// Number of slots in the array, live or not.
    pub(crate) fn len(&self) -> u32 {
        (self.bytes.len() / SLOT_SIZE) as u32
    }

    /// Gets an immutable view of the slot at the given index.
    pub(crate) fn slot_ref(&self, slot_index: u32) -> Result<SlotRef<'a>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_index)?;
        SlotRef::from_raw(slot_index, &self.bytes[range])
    }

    /// Iterates over every slot in logical index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Result<SlotRef<'a>, SlotError>> + '_ {
        (0..self.len()).map(move |slot_index| self.slot_ref(slot_index))
    }
}

/// Mutable zero-copy view into the slot array of a slotted page.
#[derive(Debug)]
pub(crate) struct SlotArrayMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SlotArrayMut<'a> {
    pub(super) fn new(bytes: &'a mut [u8], slot_count: u16) -> Result<Self, SlotError> {
        check_region_size(bytes.len(), slot_count)?;
        Ok(Self { bytes })
    }

    /// Gets a mutable view of the slot at the given index.
    pub(crate) fn slot_mut(&mut self, slot_index: u32) -> Result<SlotMut<'_>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_index)?;
        SlotMut::from_raw(&mut self.bytes[range])
    }

    /// Sets both fields of a slot.
    pub(crate) fn set_slot(
        &mut self,
        slot_index: u32,
        slot_offset: u16,
        slot_length: u16,
    ) -> Result<(), SlotError> {
        let mut slot_mut = self.slot_mut(slot_index)?;
        slot_mut.set_length(slot_length)?;
        slot_mut.set_offset(slot_offset)?;
        Ok(())
    }
}

fn check_region_size(actual_size: usize, slot_count: u16) -> Result<(), SlotError> {
    let expected_size = slot_count as usize * SLOT_SIZE;
    if actual_size != expected_size {
        return Err(SlotError::SlotRegionSizeMismatch {
            expected_size,
            actual_size,
        });
    }
    Ok(())
}

fn slot_range(slot_array_size: usize, slot_index: u32) -> Result<Range<usize>, SlotError> {
    let start = (slot_index as usize + 1)
        .checked_mul(SLOT_SIZE)
        .and_then(|end_distance| slot_array_size.checked_sub(end_distance))
        .ok_or(SlotError::InvalidSlot { slot_index })?;
    Ok(start..start + SLOT_SIZE)
}
