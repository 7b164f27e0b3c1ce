//! JSONL file helpers.
//!
//! One record per line, serialized as JSON. This is the interchange format
//! for the CLI and for handing chain windows to auditors. The chain's own
//! hashes carry integrity, so no framing or per-line checksums wrap the
//! lines; a corrupted line surfaces as a parse error with its line number.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;

use chainseal_core::{AuditLogEntry, EntryDraft};

use crate::error::StoreError;

/// Reads finished entries from a JSONL file, in file order.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns [`StoreError::Io`] when the file cannot be read and
/// [`StoreError::Parse`] with the 1-based line number when a line is not a
/// valid entry.
pub fn read_entries<P: AsRef<Path>>(path: P) -> Result<Vec<AuditLogEntry>, StoreError> {
    read_lines(path)
}

/// Reads draft entries from a JSONL file, in file order.
///
/// # Errors
///
/// Same failure modes as [`read_entries`].
pub fn read_drafts<P: AsRef<Path>>(path: P) -> Result<Vec<EntryDraft>, StoreError> {
    read_lines(path)
}

fn read_lines<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, StoreError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|err| StoreError::Parse {
            line: idx + 1,
            message: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Append-only JSONL writer for finished entries.
pub struct JsonlWriter {
    writer: BufWriter<File>,
}

impl JsonlWriter {
    /// Opens a file for appending, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Creates the file, truncating any existing content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Appends one entry as a line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] when the entry cannot be encoded
    /// and [`StoreError::Io`] on write failure.
    pub fn append(&mut self, entry: &AuditLogEntry) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(entry).map_err(|err| StoreError::Serialize(err.to_string()))?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes buffered lines and closes the writer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on flush failure.
    pub fn finish(mut self) -> Result<(), StoreError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
