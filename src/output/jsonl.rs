//! JSON-lines record sink
//!
//! Writes one JSON object per line. Each line is serialized up front and then
//! written with a single `write_all` while holding the writer lock.

use crate::extract::EnrichedRecord;
use crate::output::traits::{FailureRecord, OutputError, OutputResult, RecordSink};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

/// Record sink producing line-delimited JSON
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Creates a sink around any writer, typically standard output
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink, returning the writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|_| OutputError::Write("writer lock poisoned".to_string()))
    }

    fn write_line<T: Serialize>(&self, value: &T) -> OutputResult<()> {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| OutputError::Write("writer lock poisoned".to_string()))?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

impl JsonLinesSink<Vec<u8>> {
    /// Returns the lines written so far to an in-memory buffer
    pub fn lines(&self) -> Vec<String> {
        match self.writer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer)
                .lines()
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    fn emit(&self, record: &EnrichedRecord) -> OutputResult<()> {
        self.write_line(record)
    }

    fn emit_failure(&self, failure: &FailureRecord) -> OutputResult<()> {
        self.write_line(failure)
    }

    fn finalize(&self) -> OutputResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| OutputError::Write("writer lock poisoned".to_string()))?;
        writer.flush()?;
        Ok(())
    }
}
