use super::*;
use crate::errors::HeapError;
use file::errors::FileError;

#[test]
fn open_pins_header_and_first_page() {
    // Arrange
    let env = TestEnv::with_file("t.tbl");
    let file_id = env.fm.file_id("t.tbl").unwrap();

    // Act
    let heap = env.open("t.tbl");

    // Assert
    assert_eq!(env.buffer.pin_count(PageId::new(file_id, 0)), 1);
    assert_eq!(env.buffer.pin_count(PageId::new(file_id, 1)), 1);
    assert_eq!(heap.cur_page_no(), Some(1));
    assert_eq!(heap.cur_rec(), None);
    assert!(heap.header.is_dirty());
    assert!(!heap.current_page().unwrap().is_dirty());
}

#[test]
fn drop_unpins_everything_and_closes_the_file() {
    let env = TestEnv::with_file("t.tbl");
    let file_id = env.fm.file_id("t.tbl").unwrap();

    {
        let _heap = env.open("t.tbl");
        assert_eq!(env.fm.file_catalog().open_count(file_id), Some(1));
    }

    assert_eq!(env.total_pins("t.tbl"), 0);
    assert_eq!(env.fm.file_catalog().open_count(file_id), Some(0));
}

#[test]
fn close_unpins_everything_and_closes_the_file() {
    let env = TestEnv::with_file("t.tbl");
    let file_id = env.fm.file_id("t.tbl").unwrap();
    let heap = env.open("t.tbl");

    heap.close().unwrap();

    assert_eq!(env.total_pins("t.tbl"), 0);
    assert_eq!(env.fm.file_catalog().open_count(file_id), Some(0));
}

#[test]
fn open_missing_file_fails_with_file_error() {
    let env = TestEnv::new(4);

    let result = HeapFile::open("missing.tbl", Arc::clone(&env.fm), Arc::clone(&env.buffer));

    assert!(matches!(
        result,
        Err(HeapError::File(FileError::NotFound(name))) if name == "missing.tbl"
    ));
}

#[test]
fn get_record_returns_inserted_bytes() {
    let env = TestEnv::with_file("t.tbl");
    let rids = env.insert_keys("t.tbl", 5);
    let mut heap = env.open("t.tbl");

    let bytes = heap.get_record(rids[3]).unwrap();

    assert_eq!(bytes, record(3));
    assert_eq!(heap.cur_rec(), Some(rids[3]));
}

#[test]
fn get_record_on_another_page_switches_the_current_page() {
    // Arrange
    let env = TestEnv::with_file("t.tbl");
    let rids = env.insert_keys("t.tbl", RECORDS_PER_PAGE + 5);
    let last = *rids.last().unwrap();
    let mut heap = env.open("t.tbl");
    assert_eq!(heap.cur_page_no(), Some(1));

    // Act
    let bytes = heap.get_record(last).unwrap();

    // Assert
    assert_eq!(last.page_no, 2);
    assert_eq!(key_of(&bytes), (RECORDS_PER_PAGE + 4) as i32);
    assert_eq!(heap.cur_page_no(), Some(2));
    assert!(!heap.current_page().unwrap().is_dirty());
    // Still exactly the header and one data page.
    assert_eq!(env.total_pins("t.tbl"), 2);
}

#[test]
fn get_record_on_missing_slot_is_record_not_found() {
    let env = TestEnv::with_file("t.tbl");
    env.insert_keys("t.tbl", 2);
    let mut heap = env.open("t.tbl");

    let error = heap.get_record(Rid::new(1, 7)).unwrap_err();

    assert!(error.is_record_not_found());
    assert_eq!(heap.cur_rec(), None);
}

#[test]
fn rec_cnt_and_header_reflect_inserts() {
    let env = TestEnv::with_file("t.tbl");
    env.insert_keys("t.tbl", 7);

    let heap = env.open("t.tbl");

    assert_eq!(heap.get_rec_cnt().unwrap(), 7);
    let info = heap.header_info().unwrap();
    assert_eq!(info.name, "t.tbl");
    assert_eq!(info.page_cnt, 1);
}

#[test]
fn header_survives_eviction_and_reload() {
    // A pool of 3 frames forces the header out between sessions.
    let env = TestEnv::new(3);
    create_heap_file("t.tbl", &env.fm, &env.buffer).unwrap();
    env.insert_keys("t.tbl", RECORDS_PER_PAGE * 3);

    let heap = env.open("t.tbl");
    let info = heap.header_info().unwrap();

    assert_eq!(info.page_cnt, 3);
    assert_eq!(info.rec_cnt, (RECORDS_PER_PAGE * 3) as u32);
    assert_eq!(info.first_page, Some(1));
    assert_eq!(info.last_page, Some(3));
}
