use crate::PAGE_SIZE;
use crate::page::Page;
use crate::page_id::PageId;
use crate::slot::SLOT_SIZE;

mod chain_tests;
mod delete_row_tests;
mod read_row_tests;

/// Helper methods for the test suite, defined on `Page` but only compiled for tests.
impl Page {
    /// Returns a new empty heap page.
    pub(super) fn test_create_empty_heap() -> Page {
        Page::new_empty(PageId::new(1, 1)).unwrap()
    }

    /// Lays out rows exactly as described by `slots`, bypassing the insert logic. Each row is
    /// filled with `index_in_slot_array + 1`. A slot with `len == 0` is left as a deleted slot.
    /// Header bookkeeping (slot_count, free_end, free_start, free_space, can_compact) is set to
    /// match.
    pub(super) fn test_insert_rows(&mut self, slots: Vec<SlotValues>) {
        let slot_count = slots.len();
        {
            let mut header = self.header_mut().unwrap();
            header.set_slot_count(slot_count as u16).unwrap();
            header
                .set_free_end((PAGE_SIZE - slot_count * SLOT_SIZE - 1) as u16)
                .unwrap();
        }

        for (index, slot) in slots.iter().enumerate() {
            self.slot_array_mut()
                .unwrap()
                .set_slot(index as u32, slot.offset as u16, slot.len as u16)
                .unwrap();
            let value = (index + 1) as u8;
            self.data_mut()[slot.offset..slot.offset + slot.len].fill(value);
        }

        let used: usize = slots.iter().map(|s| s.len).sum();
        let highest_end = slots
            .iter()
            .filter(|s| s.len > 0)
            .map(|s| s.offset + s.len)
            .max()
            .unwrap_or(crate::HEADER_SIZE);
        let mut header = self.header_mut().unwrap();
        header.set_free_start(highest_end as u16).unwrap();
        let has_holes = used != highest_end - crate::HEADER_SIZE;
        header.set_can_compact(u16::from(has_holes)).unwrap();
        header
            .set_free_space((PAGE_SIZE - crate::HEADER_SIZE - used - slot_count * SLOT_SIZE) as u16)
            .unwrap();
    }

    /// Asserts that `length` bytes at `offset` all hold `value`, bypassing the slot array.
    pub(super) fn assert_row_values(&self, offset: usize, length: usize, value: u8) {
        assert_eq!(&self.data()[offset..offset + length], vec![value; length].as_slice());
    }

    pub(super) fn assert_slot(&self, slot_index: u32, offset: usize, length: usize) {
        let slot = self.slot_array_ref().unwrap().slot_ref(slot_index).unwrap();
        assert_eq!(slot.offset().unwrap(), offset as u16);
        assert_eq!(slot.length().unwrap(), length as u16);
    }

    pub(super) fn test_free_start(&self) -> usize {
        self.header_ref().unwrap().get_free_start().unwrap() as usize
    }
}

/// Slot values to lay out with [`Page::test_insert_rows`].
pub(super) struct SlotValues {
    pub(super) offset: usize,
    pub(super) len: usize,
}

/// Helpers to break errors apart during assertions and get to the inner most error.
mod tests_error_helpers {
    use crate::errors::delete_error::DeleteError;
    use crate::errors::insert_error::InsertError;
    use crate::errors::page_op_error::PageOpError;
    use crate::errors::read_row_error::ReadRowError;
    use crate::errors::slot_error::SlotError;

    macro_rules! impl_expect_ref {
        ($enum:ty, $fn_name:ident, $variant:ident => $inner:ty) => {
            impl $enum {
                #[track_caller]
                pub fn $fn_name(&self) -> &$inner {
                    match self {
                        Self::$variant(inner) => inner,
                        other => panic!(
                            "expected {}::{}, got {other:?}",
                            stringify!($enum),
                            stringify!($variant),
                        ),
                    }
                }
            }
        };
    }

    impl_expect_ref!(PageOpError, expect_read_row_error, ReadRow => ReadRowError);
    impl_expect_ref!(PageOpError, expect_insert_error, Insert => InsertError);
    impl_expect_ref!(PageOpError, expect_delete_error, DeleteRow => DeleteError);

    impl_expect_ref!(ReadRowError, expect_slot_error, SlotError => SlotError);
    impl_expect_ref!(DeleteError, expect_slot_error, SlotError => SlotError);
}
