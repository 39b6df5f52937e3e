/// Offset cursor driving `LIMIT`/`OFFSET` pagination.
///
/// Advances by exactly one step per page no matter how many rows that page
/// held, and never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCursor {
    offset: u64,
    step: u64,
}

impl OffsetCursor {
    pub fn new(step: u64) -> Self {
        OffsetCursor { offset: 0, step }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn advance(&mut self) -> u64 {
        self.offset = self.offset.saturating_add(self.step);
        self.offset
    }

    /// Whether the cursor is still below the exclusive upper bound.
    pub fn is_before(&self, max_offset: u64) -> bool {
        self.offset < max_offset
    }
}
