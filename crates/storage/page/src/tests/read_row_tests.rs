use crate::errors::slot_error::SlotError;
use crate::page::Page;
use crate::tests::SlotValues;

#[test]
fn row_returns_bytes_referenced_by_slot() {
    let mut page = Page::test_create_empty_heap();
    page.test_insert_rows(vec![
        SlotValues { offset: 96, len: 10 },
        SlotValues { offset: 200, len: 4 },
    ]);

    assert_eq!(page.row(0).unwrap(), &[1u8; 10]);
    assert_eq!(page.row(1).unwrap(), &[2u8; 4]);
}

#[test]
fn row_of_deleted_slot_is_an_invalid_slot() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(b"hello").unwrap();
    page.delete_row(0).unwrap();

    let err = page.row(0).unwrap_err();

    assert!(err.is_invalid_slot());
    assert!(matches!(
        err.source.expect_read_row_error().expect_slot_error(),
        SlotError::InvalidSlot { slot_index: 0 }
    ));
}

#[test]
fn row_past_slot_count_is_an_invalid_slot() {
    let page = Page::test_create_empty_heap();

    let err = page.row(0).unwrap_err();

    assert!(err.is_invalid_slot());
    assert!(!err.is_no_space());
}
