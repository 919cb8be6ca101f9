//! # heapdb
//!
//! A page-oriented storage engine storing records in heap files.
//!
//! The engine is composed of multiple internal components organized under
//! the `/crates/storage` directory of this workspace:
//!
//! - `page`: slotted data pages chained into heap files.
//! - `file`: the file catalog and page-granular file managers.
//! - `buffer`: the buffer pool handing out page pins.
//! - `heap`: heap files, filtered scans and inserts.
//! - `storage-api`: a facade bundling the above.

pub use buffer;
pub use file;
pub use heap;
pub use page;
pub use storage_api;
