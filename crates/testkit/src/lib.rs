#![warn(missing_docs)]
//! Deterministic testing surfaces: JSONL event recording and readback.

use anyhow::{Context, Result};
use replanter_core::SimTick;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Primary event record captured by headless runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: String,
    /// Structured payload.
    pub payload: serde_json::Value,
}

impl EventRecord {
    /// Build a record from any serializable payload.
    pub fn new<T: Serialize>(tick: SimTick, kind: &str, payload: &T) -> Result<Self> {
        Ok(Self {
            tick,
            kind: kind.to_string(),
            payload: serde_json::to_value(payload)?,
        })
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every record from a JSONL log, skipping blank lines.
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read event log {}", path.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{}:{}: invalid record", path.display(), idx + 1))
        })
        .collect()
}
