//! Slotted data pages for heap files.
//!
//! A [`page::Page`] owns a fixed-size byte array laid out as a header, a record region growing
//! upward, and a slot array growing downward from the end of the page. Heap files chain their data
//! pages through the `next_page` header field.

// The header module contains a doc comment with some links to constants defined in the same file. Due to a cargo doc bug,
// adding module documentation here breaks those links. See https://github.com/rust-lang/rust/issues/119965
pub mod header;

/// Slotted structure and related functionality.
pub mod page;

/// Unique identifier for pages.
pub mod page_id;

/// Public error type of page operations.
pub mod errors;

mod insertion_plan;
mod slot;
mod slot_array;
#[cfg(test)]
mod tests;

/// Fixed-size of a page in bytes
pub const PAGE_SIZE: usize = 4096;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 96;

/// Largest row a freshly initialized page can hold: everything but the header and one slot entry.
pub const MAX_ROW_SIZE: usize = PAGE_SIZE - HEADER_SIZE - slot::SLOT_SIZE;

/// Sentinel stored in page-number fields that do not point anywhere.
pub const NO_PAGE: u32 = u32::MAX;
