use std::fmt;

/// Why the driver left the running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cursor reached the configured maximum offset.
    OffsetExhausted,
    /// The sink reported that it had nothing to do for a fetched page.
    NoWorkDone,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::OffsetExhausted => f.write_str("offset exhausted"),
            StopReason::NoWorkDone => f.write_str("no work done"),
        }
    }
}

/// Counters describing one finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_fetched: u64,
    /// Offset of the last page fetched, if any.
    pub last_offset: Option<u64>,
    pub empty_pages: u64,
    pub rows_fetched: u64,
    pub rows_inserted: u64,
    pub final_offset: u64,
    pub stop_reason: StopReason,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages ({} empty), {} rows fetched, {} rows inserted, stopped at offset {} ({})",
            self.pages_fetched,
            self.empty_pages,
            self.rows_fetched,
            self.rows_inserted,
            self.final_offset,
            self.stop_reason
        )
    }
}
