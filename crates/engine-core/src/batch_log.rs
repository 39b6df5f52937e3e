use chrono::Local;
use std::{
    fmt,
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};
use tracing::info;

/// Something worth recording about one page.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    FetchStarted { table: &'a str, offset: u64 },
    EmptyPage { offset: u64 },
    Fetched { rows: usize, target: &'a str },
    NothingToInsert,
    Inserted { rows: u64, target: &'a str },
}

impl fmt::Display for BatchEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchEvent::FetchStarted { table, offset } => {
                write!(f, "Fetching data from {table} with offset {offset}")
            }
            BatchEvent::EmptyPage { offset } => {
                write!(f, "No data at offset {offset}. Moving to the next page.")
            }
            BatchEvent::Fetched { rows, target } => {
                write!(f, "Fetched {rows} rows. Inserting into {target}")
            }
            BatchEvent::NothingToInsert => f.write_str("No data to insert. Exiting."),
            BatchEvent::Inserted { rows, target } => {
                write!(f, "Inserted {rows} rows into {target}")
            }
        }
    }
}

/// Hands out one [`BatchLog`] per offset.
///
/// Events always go to `tracing` with the offset as a field. When a log
/// directory is set, each offset also gets its own `migration_log_<offset>.log`
/// file, truncated when the page starts.
#[derive(Debug, Clone, Default)]
pub struct BatchLogger {
    log_dir: Option<PathBuf>,
}

impl BatchLogger {
    pub fn new(log_dir: Option<PathBuf>) -> Self {
        BatchLogger { log_dir }
    }

    pub fn file_path(&self, offset: u64) -> Option<PathBuf> {
        self.log_dir
            .as_ref()
            .map(|dir| dir.join(format!("migration_log_{offset}.log")))
    }

    pub fn open(&self, offset: u64) -> io::Result<BatchLog> {
        let file = match self.file_path(offset) {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                Some(File::create(path)?)
            }
            None => None,
        };

        Ok(BatchLog { offset, file })
    }
}

/// Log destination for a single page.
#[derive(Debug)]
pub struct BatchLog {
    offset: u64,
    file: Option<File>,
}

impl BatchLog {
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn record(&mut self, event: BatchEvent<'_>) -> io::Result<()> {
        info!(offset = self.offset, "{event}");

        if let Some(file) = self.file.as_mut() {
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
            writeln!(file, "{ts} - INFO - {event}")?;
            file.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_file_per_offset() {
        let dir = tempfile::tempdir().unwrap();
        let logger = BatchLogger::new(Some(dir.path().join("logs")));

        let mut log = logger.open(200).unwrap();
        log.record(BatchEvent::FetchStarted {
            table: "citizens",
            offset: 200,
        })
        .unwrap();
        log.record(BatchEvent::Inserted {
            rows: 42,
            target: "citizens_backwash",
        })
        .unwrap();

        let content =
            fs::read_to_string(dir.path().join("logs").join("migration_log_200.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - Fetching data from citizens with offset 200"));
        assert!(lines[1].ends_with(" - INFO - Inserted 42 rows into citizens_backwash"));
    }

    #[test]
    fn test_reopen_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let logger = BatchLogger::new(Some(dir.path().to_path_buf()));

        let mut log = logger.open(0).unwrap();
        log.record(BatchEvent::EmptyPage { offset: 0 }).unwrap();
        drop(log);

        let mut log = logger.open(0).unwrap();
        log.record(BatchEvent::NothingToInsert).unwrap();
        drop(log);

        let content = fs::read_to_string(logger.file_path(0).unwrap()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("No data to insert. Exiting."));
    }

    #[test]
    fn test_empty_page_message_does_not_claim_to_stop() {
        let msg = BatchEvent::EmptyPage { offset: 300 }.to_string();
        assert_eq!(msg, "No data at offset 300. Moving to the next page.");
    }

    #[traced_test]
    #[test]
    fn test_without_dir_only_traces() {
        let logger = BatchLogger::new(None);
        assert_eq!(logger.file_path(100), None);

        let mut log = logger.open(100).unwrap();
        log.record(BatchEvent::Fetched {
            rows: 7,
            target: "citizens_backwash",
        })
        .unwrap();

        assert!(logs_contain("offset=100"));
        assert!(logs_contain("Fetched 7 rows. Inserting into citizens_backwash"));
    }
}
