//! Page Header Definition and Accessors
//! ------------------------------------
//!
//! The header occupies the first **96 bytes** of every data page and stores the
//! metadata required to manage row storage, the slot array, and the link to the
//! next page of the owning heap file.
//!
//! All fields are stored in **little-endian** format and accessed via
//! zero-copy typed wrappers (`HeaderRef` and `HeaderMut`).
//!
//! # Binary Layout
//!
//! | Field          | Type  | Offset           | Description |
//! |----------------|-------|------------------|-------------|
//! | `slot_count`   | u16   | [`SLOT_COUNT`]   | Number of allocated slots (live or reusable). |
//! | `free_start`   | u16   | [`FREE_START`]   | Offset of the first free byte after the row region (grows upward). |
//! | `free_end`     | u16   | [`FREE_END`]     | Offset of the last free byte *before* the slot array region (grows downward). |
//! | `free_space`   | u16   | [`FREE_SPACE`]   | Total free bytes, including gaps left by deleted rows. |
//! | `can_compact`  | u16   | [`CAN_COMPACT`]  | 1 when deleted rows may have left gaps below `free_start`. |
//! | `next_page`    | u32   | [`NEXT_PAGE`]    | Next page in the heap file's chain, [`NO_PAGE`](crate::NO_PAGE) at the tail. |
//!
//! Bytes after `next_page` up to `HEADER_SIZE` are reserved and kept zeroed.
//!
//! # Header Invariants
//!
//! ```text
//! ┌───────────────┬───────────────────────────┬───────────────────────────┐
//! │   Header       │       Row Region          │      Slot Array Region    │
//! │   (96 bytes)   │   (grows upward ↑)        │   (grows downward ↓)      │
//! └───────────────┴───────────────────────────┴───────────────────────────┘
//! ^ offset 0                         free_start          free_end         PAGE_SIZE
//! ```
//!
//! - The slot array occupies `data[(free_end + 1) .. PAGE_SIZE)`; an empty page has
//!   `free_end = PAGE_SIZE - 1`. Allocating a slot decrements `free_end` by `SLOT_SIZE`.
//! - `free_space = PAGE_SIZE - HEADER_SIZE - slot_count * SLOT_SIZE - Σ live row lengths`.
//!   It is not necessarily contiguous; `can_compact` flags fragmentation.
//! - `can_compact = 0` guarantees there are no gaps below `free_start`, so all free space lies
//!   between `free_start` and the slot array.

use crate::errors::header_error::HeaderError;
use crate::{HEADER_SIZE, NO_PAGE, PAGE_SIZE};
use binary_helpers::bin_error::BinaryError;
use binary_helpers::le::{read_le, write_le};
use paste::paste;

/// Immutable view into the header of a page.
#[derive(Debug)]
pub(crate) struct HeaderRef<'a> {
    bytes: &'a [u8; HEADER_SIZE],
}

impl<'a> HeaderRef<'a> {
    /// Creates a new `HeaderRef`, failing if `bytes` is not exactly `HEADER_SIZE` long.
    pub(crate) fn new(bytes: &'a [u8]) -> Result<Self, HeaderError> {
        if bytes.len() != HEADER_SIZE {
            return Err(HeaderError::HeaderSliceSizeMismatch {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        Ok(HeaderRef {
            bytes: bytes.try_into().map_err(BinaryError::from)?,
        })
    }
}

/// Mutable view into the header of a page.
#[derive(Debug)]
pub(crate) struct HeaderMut<'a> {
    bytes: &'a mut [u8; HEADER_SIZE],
}

impl<'a> HeaderMut<'a> {
    /// Creates a new `HeaderMut`, failing if `bytes` is not exactly `HEADER_SIZE` long.
    pub(crate) fn new(bytes: &'a mut [u8]) -> Result<Self, HeaderError> {
        if bytes.len() != HEADER_SIZE {
            return Err(HeaderError::HeaderSliceSizeMismatch {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        Ok(HeaderMut {
            bytes: bytes.try_into().map_err(BinaryError::from)?,
        })
    }

    /// Read-only view of the same bytes, for reading fields while holding the mutable view.
    pub(crate) fn view(&self) -> HeaderRef<'_> {
        HeaderRef { bytes: &*self.bytes }
    }

    /// Initializes the header with default values for a new empty page that is not linked anywhere.
    pub(crate) fn default(&mut self) -> Result<(), HeaderError> {
        self.set_slot_count(0)?;
        self.set_free_start(HEADER_SIZE as u16)?;
        self.set_free_end((PAGE_SIZE - 1) as u16)?;
        self.set_free_space((PAGE_SIZE - HEADER_SIZE) as u16)?;
        self.set_can_compact(0)?;
        self.set_next_page(NO_PAGE)?;
        Ok(())
    }
}

/// Defines header field constants, getters on [`HeaderRef`] and setters on [`HeaderMut`].
///
/// Pattern: `field_id(identifier): field_type(type) = field_offset(usize)`
macro_rules! impl_header_accessors {
    ( $( $field_name:ident : $field_type:ty = $field_offset:expr ; )* ) => {
        paste! {
            $(
                #[doc = concat!("Offset of ", stringify!($field_name), ", type ", stringify!($field_type))]
                pub(crate) const [<$field_name:upper>] : usize = $field_offset;

                impl<'a> HeaderRef<'a> {
                    #[doc = concat!("Getter for field `", stringify!($field_name), "`.")]
                    pub(crate) fn [<get_ $field_name>](&self)
                        -> Result<$field_type, HeaderError>
                    {
                        Ok(read_le::<$field_type>(self.bytes, [<$field_name:upper>])?)
                    }
                }

                impl<'a> HeaderMut<'a> {
                    #[doc = concat!("Setter for field `", stringify!($field_name), "`.")]
                    pub(crate) fn [<set_ $field_name>](&mut self, val: $field_type)
                        -> Result<(), HeaderError>
                    {
                        write_le::<$field_type>(self.bytes, [<$field_name:upper>], val)?;
                        Ok(())
                    }
                }
            )*
        }
    };
}

impl_header_accessors! {
    slot_count : u16 = 0;
    free_start : u16 = 2;
    free_end   : u16 = 4;
    free_space : u16 = 6;
    can_compact : u16 = 8;
    next_page : u32 = 10;
}

#[cfg(test)]
mod header_ref_tests {
    use super::*;

    #[test]
    fn getters_read_each_field_at_its_offset() {
        let mut header_bytes = [0u8; HEADER_SIZE];
        header_bytes[SLOT_COUNT..SLOT_COUNT + 2].copy_from_slice(&0x1122u16.to_le_bytes());
        header_bytes[FREE_START..FREE_START + 2].copy_from_slice(&0x3344u16.to_le_bytes());
        header_bytes[FREE_END..FREE_END + 2].copy_from_slice(&0x5566u16.to_le_bytes());
        header_bytes[FREE_SPACE..FREE_SPACE + 2].copy_from_slice(&0x7788u16.to_le_bytes());
        header_bytes[CAN_COMPACT..CAN_COMPACT + 2].copy_from_slice(&0x0001u16.to_le_bytes());
        header_bytes[NEXT_PAGE..NEXT_PAGE + 4].copy_from_slice(&0xDEADBEEFu32.to_le_bytes());

        let header = HeaderRef::new(&header_bytes).unwrap();

        assert_eq!(header.get_slot_count().unwrap(), 0x1122);
        assert_eq!(header.get_free_start().unwrap(), 0x3344);
        assert_eq!(header.get_free_end().unwrap(), 0x5566);
        assert_eq!(header.get_free_space().unwrap(), 0x7788);
        assert_eq!(header.get_can_compact().unwrap(), 1);
        assert_eq!(header.get_next_page().unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn new_incorrect_slice_size_error_returned() {
        let header_bytes = [0u8; HEADER_SIZE + 1];

        let result = HeaderRef::new(&header_bytes);

        assert!(matches!(
            result,
            Err(HeaderError::HeaderSliceSizeMismatch {
                expected: HEADER_SIZE,
                actual: 97
            })
        ))
    }
}

#[cfg(test)]
mod header_mut_tests {
    use super::*;

    #[test]
    fn setters_round_trip_through_getters() {
        let mut header_bytes = [0u8; HEADER_SIZE];
        let mut header_mut = HeaderMut::new(&mut header_bytes).unwrap();

        header_mut.set_slot_count(3).unwrap();
        header_mut.set_free_start(200).unwrap();
        header_mut.set_next_page(17).unwrap();

        let view = header_mut.view();
        assert_eq!(view.get_slot_count().unwrap(), 3);
        assert_eq!(view.get_free_start().unwrap(), 200);
        assert_eq!(view.get_next_page().unwrap(), 17);
    }

    #[test]
    fn default_resets_a_dirty_header() {
        // Arrange
        let mut header_bytes = [0xFFu8; HEADER_SIZE];

        // Act
        HeaderMut::new(&mut header_bytes)
            .unwrap()
            .default()
            .unwrap();

        // Assert
        let header_ref = HeaderRef::new(&header_bytes).unwrap();
        assert_eq!(header_ref.get_slot_count().unwrap(), 0);
        assert_eq!(header_ref.get_free_start().unwrap(), HEADER_SIZE as u16);
        assert_eq!(header_ref.get_free_end().unwrap(), (PAGE_SIZE - 1) as u16);
        assert_eq!(
            header_ref.get_free_space().unwrap(),
            (PAGE_SIZE - HEADER_SIZE) as u16
        );
        assert_eq!(header_ref.get_can_compact().unwrap(), 0);
        assert_eq!(header_ref.get_next_page().unwrap(), NO_PAGE);
    }
}
