use crate::errors::slot_error::SlotError;
use crate::page::Page;
use crate::tests::SlotValues;
use crate::slot::SLOT_SIZE;
use crate::{HEADER_SIZE, PAGE_SIZE};

#[test]
fn delete_row_without_compaction_leaves_other_rows_in_place() {
    let mut page = Page::test_create_empty_heap();
    page.test_insert_rows(vec![
        SlotValues { offset: 96, len: 100 },
        SlotValues { offset: 196, len: 100 },
    ]);

    page.delete_row(0).unwrap();

    page.assert_row_values(196, 100, 2);
    page.assert_slot(0, 0, 0);
    page.assert_slot(1, 196, 100);
    assert_eq!(page.header_ref().unwrap().get_can_compact().unwrap(), 1);
}

#[test]
fn delete_row_defers_compaction_to_the_next_insert_that_needs_it() {
    // Arrange: deleting slot 0 leaves a 100 byte hole below slot 1
    let mut page = Page::test_create_empty_heap();
    page.test_insert_rows(vec![
        SlotValues { offset: 96, len: 100 },
        SlotValues { offset: 196, len: 50 },
    ]);
    page.delete_row(0).unwrap();
    page.assert_slot(1, 196, 50);

    // Act: fits neither the hole nor the tail, only the two combined
    let tail = PAGE_SIZE - 2 * SLOT_SIZE - (HEADER_SIZE + 150);
    let row = vec![7u8; tail + 60];
    let slot = page.insert_row(&row).unwrap();

    // Assert
    assert_eq!(slot, 0);
    page.assert_row_values(96, 50, 2);
    page.assert_slot(1, 96, 50);
    page.assert_slot(0, 146, row.len());
    assert_eq!(page.header_ref().unwrap().get_can_compact().unwrap(), 0);
}

#[test]
fn deleting_physically_last_row_pulls_free_start_back() {
    let mut page = Page::test_create_empty_heap();
    page.test_insert_rows(vec![
        SlotValues { offset: 96, len: 100 },
        SlotValues { offset: 196, len: 50 },
    ]);

    page.delete_row(1).unwrap();

    assert_eq!(page.test_free_start(), 196);
    assert_eq!(page.header_ref().unwrap().get_can_compact().unwrap(), 0);
}

#[test]
fn delete_returns_row_bytes_to_free_space() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(&[1u8; 64]).unwrap();
    let before = page.free_space().unwrap();

    page.delete_row(0).unwrap();

    assert_eq!(page.free_space().unwrap(), before + 64);
}

#[test]
fn deleting_a_deleted_row_is_an_invalid_slot() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(&[1u8; 8]).unwrap();
    page.delete_row(0).unwrap();

    let err = page.delete_row(0).unwrap_err();

    assert!(err.is_invalid_slot());
    assert!(matches!(
        err.source.expect_delete_error().expect_slot_error(),
        SlotError::InvalidSlot { slot_index: 0 }
    ));
}

#[test]
fn deleting_out_of_range_slot_is_an_invalid_slot() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(&[1u8; 8]).unwrap();

    let err = page.delete_row(5).unwrap_err();

    assert!(err.is_invalid_slot());
}
