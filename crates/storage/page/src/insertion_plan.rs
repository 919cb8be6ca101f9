//! Insertion plan for placing a record on a heap page, along with related enums.

/// Where the row bytes of a planned insert go.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InsertionOffset {
    /// Compact the page first, then write at the new `free_start`.
    AfterCompactionFreeStart,
    /// Write at an exact offset; no compaction needed.
    Exact(usize),
}

/// Which slot entry a planned insert uses.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InsertionSlot {
    /// Allocate a new slot at the end of the slot array.
    New,
    /// Reuse the slot of a deleted row.
    Reuse(u32),
}

/// A plan for inserting a new record into a heap page.
#[derive(Debug)]
pub(crate) struct InsertionPlan {
    pub(crate) slot: InsertionSlot,
    pub(crate) offset: InsertionOffset,
}
