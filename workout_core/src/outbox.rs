//! Outbox for compiled payloads awaiting upload.
//!
//! Payloads are appended to a JSONL (JSON Lines) file with file locking so
//! the uploader and several compiler runs can share it safely.

use crate::{Result, WorkoutPayload};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One queued payload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub workout_name: String,
    pub estimated_duration_secs: f64,
    /// The request body exactly as it will be posted
    pub payload: serde_json::Value,
}

impl OutboxEntry {
    pub fn new(payload: &WorkoutPayload) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            queued_at: Utc::now(),
            workout_name: payload.workout_name.clone(),
            estimated_duration_secs: payload.estimated_duration_in_secs,
            payload: serde_json::to_value(payload)?,
        })
    }
}

/// Sink trait for queueing payloads
pub trait PayloadSink {
    fn append(&mut self, entry: &OutboxEntry) -> Result<()>;
}

/// JSONL-based outbox with file locking
pub struct JsonlOutbox {
    path: PathBuf,
}

impl JsonlOutbox {
    /// Create a new outbox for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl PayloadSink for JsonlOutbox {
    fn append(&mut self, entry: &OutboxEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Queued payload {} ({})", entry.id, entry.workout_name);
        Ok(())
    }
}

/// Read all queued entries from an outbox file
pub fn read_outbox(path: &Path) -> Result<Vec<OutboxEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<OutboxEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Skipping outbox line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from outbox", entries.len());
    Ok(entries)
}
