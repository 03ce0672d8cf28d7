//! Tick sinks writing to `io::Write`
//!
//! `TickSink::record` cannot fail, so both sinks keep the first write error
//! and stop writing; `finish` hands it back together with the writer.

use std::io::{self, Write};

use fuzzbot_core::{TickReport, TickSink};
use serde::{Deserialize, Serialize};

/// Serialisable form of a [`TickReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub timestamp_ms: u64,
    pub left_sensor: f32,
    pub right_sensor: f32,
    pub turn: f32,
    pub go: f32,
    pub left_speed: f32,
    pub right_speed: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl From<&TickReport> for TickRecord {
    fn from(report: &TickReport) -> Self {
        Self {
            timestamp_ms: report.timestamp,
            left_sensor: report.left_input,
            right_sensor: report.right_input,
            turn: report.output.turn,
            go: report.output.go,
            left_speed: report.command.left,
            right_speed: report.command.right,
            fallback: report.fallback.map(|err| err.to_string()),
        }
    }
}

/// Writes the human-readable tick line
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, error: None }
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> TickSink for ConsoleSink<W> {
    fn record(&mut self, report: &TickReport) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.writer, "{report}") {
            self.error = Some(err);
        }
    }
}

/// Writes one JSON [`TickRecord`] per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    records: u64,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: 0,
            error: None,
        }
    }

    /// Records written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_record(&mut self, record: &TickRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> TickSink for JsonLinesSink<W> {
    fn record(&mut self, report: &TickReport) {
        if self.error.is_some() {
            return;
        }
        match self.write_record(&TickRecord::from(report)) {
            Ok(()) => self.records += 1,
            Err(err) => self.error = Some(err),
        }
    }
}
