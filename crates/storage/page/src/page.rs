//! Fixed-size slotted page and its operations.
//!
//! # Memory Layout Overview
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │ Page Header (slot_count, free space pointers, next_page, ...) │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Row Region (grows upward)                                     │
//!   │   variable sized records                                      │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Free Space                                                    │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Slot Array Region (grows downward)                            │
//!   │   fixed-size SLOT_SIZE entries                                │
//!   │   indexed logically left-to-right,                            │
//!   │   stored physically right-to-left                             │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! A row is addressed by its slot index, which stays stable for the lifetime of the row:
//! compaction moves row bytes and rewrites slot offsets but never renumbers slots. Deleting a
//! row zeroes its slot, which later inserts may reuse.
//!
//! Header access goes through `header::HeaderRef` / `header::HeaderMut`, slot access through
//! `slot_array::SlotArrayRef` / `slot_array::SlotArrayMut`.

mod accessors;
mod api;
mod chain;
mod ctors;
mod delete;
mod insert;
mod internal;
mod read_row;

pub use api::Page;
