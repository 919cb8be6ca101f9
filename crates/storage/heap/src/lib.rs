//! Heap files: unordered record storage on top of the buffer pool.
//!
//! A heap file is a header page (page 0, see [`file_header`]) followed by a singly linked chain
//! of slotted data pages. [`heap_file::HeapFile`] opens a file and gives random access by
//! [`rid::Rid`]; [`scan::HeapFileScan`] walks the chain with an optional predicate and
//! [`insert_scan::InsertFileScan`] appends records, growing the chain as pages fill up.
//! Files are created and destroyed through [`lifecycle`].
//!
//! Every page a session holds is a `PinnedPage`, so pins are returned on every exit path,
//! including errors and early drops.

pub mod errors;
pub mod file_header;
pub mod heap_file;
pub mod insert_scan;
pub mod lifecycle;
mod open_file;
pub mod predicate;
pub mod rid;
pub mod scan;
#[cfg(test)]
mod tests;
