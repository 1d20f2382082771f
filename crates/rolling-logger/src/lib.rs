//! Rolling file logger
//!
//! Installs a `tracing` subscriber that writes to stderr and to one log
//! file per local day, keeping a bounded number of files on disk and the
//! most recent lines in memory. `log` records are bridged into `tracing`,
//! so crates using either facade end up in the same files.

use chrono::{Local, NaiveDate};
use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Daily files kept on disk
pub const MAX_LOG_FILES: usize = 7;
/// Lines kept in memory for `recent_lines`
pub const RING_CAPACITY: usize = 512;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Logger I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Logger already initialized")]
    AlreadyInitialized,
    #[error("Logger not initialized")]
    NotInitialized,
}

static SINK: OnceLock<LogSink> = OnceLock::new();

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    if SINK.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let sink = LogSink::new(log_dir, app_name, MAX_LOG_FILES, RING_CAPACITY)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(sink.clone()))
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    SINK.set(sink).map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!("Logger initialized for {}", app_name);
    Ok(())
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    SINK.get().ok_or(LoggerError::NotInitialized)?;
    log::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    SINK.get().ok_or(LoggerError::NotInitialized)?;
    log::error!("{}", message);
    Ok(())
}

/// Most recent formatted lines, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    SINK.get().map(LogSink::recent_lines).unwrap_or_default()
}

/// Fixed-capacity line buffer
#[derive(Debug)]
pub struct RingBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        if self.capacity == 0 {
            return;
        }
        let mut lines = self.lines.lock().unwrap_or_else(|p| p.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|p| p.into_inner());
        lines.iter().cloned().collect()
    }
}

struct OpenFile {
    date: NaiveDate,
    file: File,
}

struct SinkInner {
    dir: PathBuf,
    prefix: String,
    max_files: usize,
    current: Mutex<Option<OpenFile>>,
    ring: RingBuffer,
}

/// Destination for formatted events: the current day's file plus the ring
#[derive(Clone)]
pub struct LogSink {
    inner: Arc<SinkInner>,
}

impl LogSink {
    pub fn new(dir: PathBuf, prefix: &str, max_files: usize, ring_capacity: usize) -> Result<Self, LoggerError> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            inner: Arc::new(SinkInner {
                dir,
                prefix: prefix.to_string(),
                max_files,
                current: Mutex::new(None),
                ring: RingBuffer::new(ring_capacity),
            }),
        })
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.inner.ring.snapshot()
    }

    /// Path of the file used for `date`
    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.inner.dir.join(file_name(&self.inner.prefix, date))
    }

    /// Append `buf` to the file for `date`, rolling over when the day changes
    pub fn write_at(&self, date: NaiveDate, buf: &[u8]) -> io::Result<()> {
        let inner = &self.inner;
        let mut current = inner.current.lock().unwrap_or_else(|p| p.into_inner());

        if current.as_ref().map(|open| open.date) != Some(date) {
            let path = self.file_for(date);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            *current = Some(OpenFile { date, file });
            prune(&inner.dir, &inner.prefix, inner.max_files)?;
        }
        if let Some(open) = current.as_mut() {
            open.file.write_all(buf)?;
        }

        for line in String::from_utf8_lossy(buf).lines() {
            if !line.is_empty() {
                inner.ring.push(line.to_string());
            }
        }
        Ok(())
    }
}

/// Writer handed to the fmt layer for each event
pub struct SinkWriter {
    sink: LogSink,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_at(Local::now().date_naive(), buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut current = self.sink.inner.current.lock().unwrap_or_else(|p| p.into_inner());
        match current.as_mut() {
            Some(open) => open.file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { sink: self.clone() }
    }
}

fn file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.log", prefix, date.format("%Y-%m-%d"))
}

/// Delete the oldest `<prefix>-YYYY-MM-DD.log` files beyond `max_files`.
/// Returns the removed paths.
pub fn prune(dir: &Path, prefix: &str, max_files: usize) -> io::Result<Vec<PathBuf>> {
    let head = format!("{}-", prefix);
    let mut logs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(&head))
                .and_then(|rest| rest.strip_suffix(".log"))
                .map(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok())
                .unwrap_or(false)
        })
        .collect();

    if logs.len() <= max_files {
        return Ok(Vec::new());
    }
    // Dates are zero-padded, so name order is chronological
    logs.sort();
    let excess = logs.len() - max_files;
    let removed: Vec<PathBuf> = logs.drain(..excess).collect();
    for path in &removed {
        fs::remove_file(path)?;
    }
    Ok(removed)
}
