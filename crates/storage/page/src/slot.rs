use crate::errors::slot_error::SlotError;
use binary_helpers::le::{read_le, write_le};

/// Fixed-size of a slot in bytes.
pub(crate) const SLOT_SIZE: usize = 4;

const OFFSET_FIELD: usize = 0;
const LENGTH_FIELD: usize = 2;

/// Zero-copy read-only view of one slot entry.
///
/// | Bytes | Field  |
/// |-------|--------|
/// | 0..2  | offset of the row within the page (u16 LE) |
/// | 2..4  | length of the row in bytes (u16 LE) |
///
/// A slot with offset 0 or length 0 refers to a deleted row and may be reused.
#[derive(Debug)]
pub(crate) struct SlotRef<'a> {
    slot_index: u32,
    bytes: &'a [u8; SLOT_SIZE],
}

impl<'a> SlotRef<'a> {
    pub(super) fn from_raw(slot_index: u32, bytes: &'a [u8]) -> Result<Self, SlotError> {
        let bytes = bytes
            .try_into()
            .map_err(|_| SlotError::SlotSizeMismatch {
                expected_size: SLOT_SIZE,
                actual_size: bytes.len(),
            })?;

        Ok(Self { slot_index, bytes })
    }

    #[inline]
    pub(crate) fn slot_index(&self) -> u32 {
        self.slot_index
    }

    #[inline]
    pub(crate) fn offset(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, OFFSET_FIELD)?)
    }

    #[inline]
    pub(crate) fn length(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, LENGTH_FIELD)?)
    }

    /// Whether the slot still points at a live row.
    pub(crate) fn is_live(&self) -> Result<bool, SlotError> {
        Ok(self.offset()? != 0 && self.length()? != 0)
    }
}

/// Zero-copy mutable view of one slot entry. Same layout as [`SlotRef`].
#[derive(Debug)]
pub(crate) struct SlotMut<'a> {
    bytes: &'a mut [u8; SLOT_SIZE],
}

impl<'a> SlotMut<'a> {
    pub(super) fn from_raw(bytes: &'a mut [u8]) -> Result<Self, SlotError> {
        let actual_size = bytes.len();
        let bytes = bytes
            .try_into()
            .map_err(|_| SlotError::SlotSizeMismatch {
                expected_size: SLOT_SIZE,
                actual_size,
            })?;

        Ok(Self { bytes })
    }

    #[inline]
    pub(crate) fn set_offset(&mut self, offset: u16) -> Result<(), SlotError> {
        Ok(write_le::<u16>(self.bytes, OFFSET_FIELD, offset)?)
    }

    #[inline]
    pub(crate) fn set_length(&mut self, length: u16) -> Result<(), SlotError> {
        Ok(write_le::<u16>(self.bytes, LENGTH_FIELD, length)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_ref_reads_offset_and_length() {
        let bytes = [0x01, 0x00, 0x02, 0x00];
        let slot = SlotRef::from_raw(5, &bytes).unwrap();
        assert_eq!(slot.slot_index(), 5);
        assert_eq!(slot.offset().unwrap(), 1);
        assert_eq!(slot.length().unwrap(), 2);
        assert!(slot.is_live().unwrap());
    }

    #[test]
    fn zeroed_slot_is_not_live() {
        let bytes = [0u8; SLOT_SIZE];
        assert!(!SlotRef::from_raw(0, &bytes).unwrap().is_live().unwrap());
    }

    #[test]
    fn slot_ref_from_raw_with_invalid_size_returns_size_mismatch() {
        let bytes = [0x01, 0x02, 0x03];
        let res = SlotRef::from_raw(1, &bytes);
        assert!(matches!(
            res,
            Err(SlotError::SlotSizeMismatch {
                expected_size: 4,
                actual_size: 3
            })
        ));
    }

    #[test]
    fn slot_mut_writes_little_endian_fields() {
        let mut bytes = [0u8; SLOT_SIZE];
        {
            let mut slot = SlotMut::from_raw(&mut bytes).unwrap();
            slot.set_offset(0x0102).unwrap();
            slot.set_length(0x0304).unwrap();
        }
        assert_eq!(bytes, [0x02, 0x01, 0x04, 0x03]);
    }
}
