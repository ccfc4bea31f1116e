//! Decision Logger
//!
//! Append-only JSONL log of every dispatch and wake the engine hands out.

use bevy_ecs::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use triage_types::{CallSite, DecisionKind, DecisionRecord, PawnId, ZoneId};

/// Resource for logging decisions to a JSONL file
#[derive(Resource)]
pub struct DecisionLogger {
    writer: Option<BufWriter<File>>,
    /// Records handed out so far; record ids are numbered from it
    record_count: u64,
}

impl DecisionLogger {
    /// Truncates `path` and logs to it
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Counts records but writes nothing
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Appends one decision under the next `dec_` id.
    pub fn record(
        &mut self,
        tick: u64,
        zone: Option<ZoneId>,
        agent: PawnId,
        agent_name: &str,
        call_site: CallSite,
        kind: DecisionKind,
    ) -> std::io::Result<()> {
        self.record_count += 1;
        let record = DecisionRecord {
            record_id: format!("dec_{:08}", self.record_count),
            tick,
            zone,
            agent,
            agent_name: agent_name.to_string(),
            call_site,
            kind,
        };
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{}", record.to_jsonl()?)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for DecisionLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to flush decision log");
        }
    }
}
