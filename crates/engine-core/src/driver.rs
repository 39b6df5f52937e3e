use crate::{
    batch_log::{BatchEvent, BatchLog, BatchLogger},
    error::DriverError,
    progress::{RunSummary, StopReason},
};
use connectors::sql::base::{destination::PageSink, source::PageSource};
use model::pagination::cursor::OffsetCursor;
use tracing::{Instrument, debug, info, info_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped(StopReason),
}

enum PageResult {
    /// The window held no rows; keep scanning.
    Empty,
    Written { fetched: usize, inserted: u64 },
    /// The sink did nothing with a non-empty page; the run ends here.
    NothingToDo { fetched: usize },
}

/// Walks the source table page by page and copies each page into the sink.
///
/// Offsets start at zero and grow by one batch per visited page, empty pages
/// included, until the cursor reaches `max_offset`. A page the sink declines
/// to write stops the run without advancing. Any fetch or write error ends
/// the run immediately; earlier pages stay committed.
pub struct BatchDriver<S, D> {
    source: S,
    sink: D,
    logger: BatchLogger,
    cursor: OffsetCursor,
    max_offset: u64,
    state: DriverState,
    summary: Progress,
}

#[derive(Debug, Default)]
struct Progress {
    pages_fetched: u64,
    last_offset: Option<u64>,
    empty_pages: u64,
    rows_fetched: u64,
    rows_inserted: u64,
}

impl<S, D> BatchDriver<S, D>
where
    S: PageSource,
    D: PageSink,
{
    pub fn new(source: S, sink: D, batch_size: u64, max_offset: u64, logger: BatchLogger) -> Self {
        let cursor = OffsetCursor::new(batch_size);
        let state = Self::state_for(&cursor, max_offset);

        BatchDriver {
            source,
            sink,
            logger,
            cursor,
            max_offset,
            state,
            summary: Progress::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn offset(&self) -> u64 {
        self.cursor.offset()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs pages until the driver stops.
    pub async fn run(&mut self) -> Result<RunSummary, DriverError> {
        info!(
            source = self.source.table(),
            target = self.sink.table(),
            batch_size = self.cursor.step(),
            max_offset = self.max_offset,
            "Starting backwash"
        );

        let reason = loop {
            match self.step().await? {
                DriverState::Running => continue,
                DriverState::Stopped(reason) => break reason,
            }
        };

        let summary = self.summary(reason);
        info!("Backwash finished: {}", summary);
        Ok(summary)
    }

    /// Processes the page at the current offset, if the driver is still
    /// running, and returns the resulting state.
    pub async fn step(&mut self) -> Result<DriverState, DriverError> {
        if let DriverState::Stopped(_) = self.state {
            return Ok(self.state);
        }

        let offset = self.cursor.offset();
        let span = info_span!("batch", offset);
        let result = self.process_page(offset).instrument(span).await?;

        self.summary.pages_fetched += 1;
        self.summary.last_offset = Some(offset);
        self.state = match result {
            PageResult::Empty => {
                self.summary.empty_pages += 1;
                self.cursor.advance();
                Self::state_for(&self.cursor, self.max_offset)
            }
            PageResult::Written { fetched, inserted } => {
                self.summary.rows_fetched += fetched as u64;
                self.summary.rows_inserted += inserted;
                self.cursor.advance();
                Self::state_for(&self.cursor, self.max_offset)
            }
            PageResult::NothingToDo { fetched } => {
                self.summary.rows_fetched += fetched as u64;
                DriverState::Stopped(StopReason::NoWorkDone)
            }
        };

        Ok(self.state)
    }

    async fn process_page(&self, offset: u64) -> Result<PageResult, DriverError> {
        let mut log = self
            .logger
            .open(offset)
            .map_err(|source| DriverError::Log { offset, source })?;

        record(
            &mut log,
            BatchEvent::FetchStarted {
                table: self.source.table(),
                offset,
            },
        )?;

        let page = self
            .source
            .fetch_page(offset)
            .await
            .map_err(|source| DriverError::Fetch { offset, source })?;

        if page.is_empty() {
            record(&mut log, BatchEvent::EmptyPage { offset })?;
            return Ok(PageResult::Empty);
        }

        let fetched = page.len();
        record(
            &mut log,
            BatchEvent::Fetched {
                rows: fetched,
                target: self.sink.table(),
            },
        )?;

        let outcome = self
            .sink
            .write_page(&page)
            .await
            .map_err(|source| DriverError::Write { offset, source })?;

        if !outcome.attempted {
            record(&mut log, BatchEvent::NothingToInsert)?;
            return Ok(PageResult::NothingToDo { fetched });
        }

        record(
            &mut log,
            BatchEvent::Inserted {
                rows: outcome.inserted,
                target: self.sink.table(),
            },
        )?;
        debug!(
            "Page at offset {} done: {} fetched, {} inserted",
            offset, fetched, outcome.inserted
        );

        Ok(PageResult::Written {
            fetched,
            inserted: outcome.inserted,
        })
    }

    fn summary(&self, stop_reason: StopReason) -> RunSummary {
        RunSummary {
            pages_fetched: self.summary.pages_fetched,
            last_offset: self.summary.last_offset,
            empty_pages: self.summary.empty_pages,
            rows_fetched: self.summary.rows_fetched,
            rows_inserted: self.summary.rows_inserted,
            final_offset: self.cursor.offset(),
            stop_reason,
        }
    }

    fn state_for(cursor: &OffsetCursor, max_offset: u64) -> DriverState {
        if cursor.is_before(max_offset) {
            DriverState::Running
        } else {
            DriverState::Stopped(StopReason::OffsetExhausted)
        }
    }
}

fn record(log: &mut BatchLog, event: BatchEvent<'_>) -> Result<(), DriverError> {
    let offset = log.offset();
    log.record(event)
        .map_err(|source| DriverError::Log { offset, source })
}
