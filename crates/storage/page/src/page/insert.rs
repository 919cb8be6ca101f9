use crate::HEADER_SIZE;
use crate::errors::insert_error::InsertError;
use crate::insertion_plan::{InsertionOffset, InsertionPlan, InsertionSlot};
use crate::page::api::Page;
use crate::slot::SLOT_SIZE;
use binary_helpers::conversions::UsizeConversion;

impl Page {
    pub(super) fn insert_row_internal(&mut self, row: &[u8]) -> Result<u32, InsertError> {
        let plan = self.plan_insert(row.len())?;
        self.apply_insertion_plan(plan, row)
    }

    /// Decides which slot and which offset a row of `row_len` bytes would use, without touching
    /// the page. Fails with `NotEnoughSpace` when the total free space cannot hold the row plus,
    /// if no slot can be reused, a new slot entry.
    pub(crate) fn plan_insert(&self, row_len: usize) -> Result<InsertionPlan, InsertError> {
        if row_len == 0 {
            return Err(InsertError::EmptyRow);
        }

        let slot = self.insertion_slot()?;
        let needs_new_slot = slot == InsertionSlot::New;
        let required_total = row_len + if needs_new_slot { SLOT_SIZE } else { 0 };

        let page_free_space = self.header_ref()?.get_free_space()? as usize;
        if page_free_space < required_total {
            return Err(InsertError::NotEnoughSpace {
                row_len,
                page_free_space,
            });
        }

        let offset = self.insertion_offset(row_len, needs_new_slot)?;

        Ok(InsertionPlan { slot, offset })
    }

    /// First slot whose row was deleted, or a new slot if every slot is live.
    fn insertion_slot(&self) -> Result<InsertionSlot, InsertError> {
        for slot in self.slot_array_ref()?.iter() {
            let slot = slot?;
            if !slot.is_live()? {
                return Ok(InsertionSlot::Reuse(slot.slot_index()));
            }
        }

        Ok(InsertionSlot::New)
    }

    /// Finds a contiguous run of `row_len` free bytes. Probes, in order:
    /// 1) the region between `free_start` and the slot array
    /// 2) gaps between live rows (including before the first one)
    /// 3) the gap after the physically last live row
    ///
    /// Falls back to compaction when none of them fits. When `needs_new_slot` is set, the bytes
    /// the new slot entry will occupy are not considered free. Gaps are only searched when the
    /// page is flagged `can_compact`.
    pub(crate) fn insertion_offset(
        &self,
        row_len: usize,
        needs_new_slot: bool,
    ) -> Result<InsertionOffset, InsertError> {
        let header = self.header_ref()?;
        let free_start = header.get_free_start()? as usize;
        let free_end = header.get_free_end()? as usize;
        let fragmented = header.get_can_compact()? != 0;

        // Exclusive upper bound for row bytes.
        let limit = (free_end + 1).saturating_sub(if needs_new_slot { SLOT_SIZE } else { 0 });

        if free_start + row_len <= limit {
            return Ok(InsertionOffset::Exact(free_start));
        }

        // A row reaching into the bytes the new slot entry needs has to be moved out of the way.
        // Without holes below free_start there is nothing to search either.
        if free_start > limit || !fragmented {
            return Ok(InsertionOffset::AfterCompactionFreeStart);
        }

        let mut extents = self.live_extents()?;
        if extents.is_empty() {
            return Ok(InsertionOffset::AfterCompactionFreeStart);
        }
        extents.sort_by_key(|&(_, start, _)| start);

        let mut previous_end = HEADER_SIZE;
        for &(_, start, end) in &extents {
            if start >= previous_end && start - previous_end >= row_len {
                return Ok(InsertionOffset::Exact(previous_end));
            }
            previous_end = previous_end.max(end);
        }

        if previous_end + row_len <= limit {
            return Ok(InsertionOffset::Exact(previous_end));
        }

        Ok(InsertionOffset::AfterCompactionFreeStart)
    }

    /// Executes a plan produced by [`Page::plan_insert`] and returns the slot index used.
    pub(crate) fn apply_insertion_plan(
        &mut self,
        plan: InsertionPlan,
        row: &[u8],
    ) -> Result<u32, InsertError> {
        if plan.offset == InsertionOffset::AfterCompactionFreeStart {
            self.compact()?;
        }

        let mut header = self.header_mut()?;
        let free_start = header.view().get_free_start()? as usize;
        let start_offset = match plan.offset {
            InsertionOffset::Exact(pos) => pos,
            InsertionOffset::AfterCompactionFreeStart => free_start,
        };
        let row_end = start_offset + row.len();

        let (slot_index, slot_bytes) = match plan.slot {
            InsertionSlot::Reuse(index) => (index, 0),
            InsertionSlot::New => {
                let slot_count = header.view().get_slot_count()?;
                header.set_slot_count(slot_count + 1)?;
                let free_end = header.view().get_free_end()?;
                header.set_free_end(free_end - SLOT_SIZE as u16)?;
                (u32::from(slot_count), SLOT_SIZE)
            }
        };

        // Rows placed in a gap may still reach past free_start.
        if row_end > free_start {
            header.set_free_start(row_end.to_u16()?)?;
        }

        let free_space = header.view().get_free_space()? as usize - row.len() - slot_bytes;
        header.set_free_space(free_space.to_u16()?)?;

        self.data[start_offset..row_end].copy_from_slice(row);
        self.slot_array_mut()?
            .set_slot(slot_index, start_offset.to_u16()?, row.len().to_u16()?)?;

        Ok(slot_index)
    }
}
