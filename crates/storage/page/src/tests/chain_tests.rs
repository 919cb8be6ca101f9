use crate::page::Page;
use crate::page_id::PageId;

#[test]
fn first_and_next_row_skip_deleted_slots() {
    // Arrange
    let mut page = Page::test_create_empty_heap();
    for i in 0..5u8 {
        page.insert_row(&[i; 4]).unwrap();
    }
    page.delete_row(0).unwrap();
    page.delete_row(2).unwrap();

    // Act
    let mut visited = Vec::new();
    let mut cursor = page.first_row().unwrap();
    while let Some(slot) = cursor {
        visited.push(slot);
        cursor = page.next_row(slot).unwrap();
    }

    // Assert
    assert_eq!(visited, vec![1, 3, 4]);
    assert_eq!(page.live_row_count().unwrap(), 3);
}

#[test]
fn next_row_after_last_slot_is_none() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(&[1u8; 4]).unwrap();

    assert_eq!(page.next_row(0).unwrap(), None);
    assert_eq!(page.next_row(u32::MAX).unwrap(), None);
}

#[test]
fn page_with_only_deleted_rows_has_no_first_row() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(&[1u8; 4]).unwrap();
    page.delete_row(0).unwrap();

    assert_eq!(page.first_row().unwrap(), None);
}

#[test]
fn next_page_link_can_be_set_and_cleared() {
    let mut page = Page::test_create_empty_heap();
    assert_eq!(page.next_page().unwrap(), None);

    page.set_next_page(Some(7)).unwrap();
    assert_eq!(page.next_page().unwrap(), Some(7));

    page.set_next_page(None).unwrap();
    assert_eq!(page.next_page().unwrap(), None);
}

#[test]
fn initialize_wipes_rows_and_link() {
    let mut page = Page::test_create_empty_heap();
    page.insert_row(&[1u8; 4]).unwrap();
    page.set_next_page(Some(3)).unwrap();

    page.initialize(PageId::new(2, 9)).unwrap();

    assert_eq!(page.page_id(), PageId::new(2, 9));
    assert_eq!(page.first_row().unwrap(), None);
    assert_eq!(page.next_page().unwrap(), None);
    assert_eq!(page.free_space().unwrap(), crate::PAGE_SIZE - crate::HEADER_SIZE);
}
