//! JSON flat-file store.
//!
//! # Responsibility
//! - Serialize the full record map into one JSON document on disk.
//! - Treat a missing file as an empty, never-saved book.
//!
//! # Invariants
//! - Every call opens, reads or writes, and closes the file; no handle is kept.
//! - Documents newer than `LATEST_FORMAT_VERSION` are rejected, not guessed.
//! - Writes truncate the file in place. A crash mid-write can leave a
//!   truncated document behind.

use super::{check_keys, BookStore, RecordMap, StoreError, StoreResult};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Current on-disk document version.
pub const LATEST_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct BookDocumentRef<'a> {
    format_version: u32,
    records: &'a RecordMap,
}

#[derive(Deserialize)]
struct BookDocument {
    records: RecordMap,
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

/// Address book store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn decode_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Decode {
            path: self.path.clone(),
            source,
        }
    }

    fn decode(&self, bytes: &[u8]) -> StoreResult<RecordMap> {
        let probe: VersionProbe =
            serde_json::from_slice(bytes).map_err(|err| self.decode_error(err))?;
        if probe.format_version > LATEST_FORMAT_VERSION {
            return Err(StoreError::UnsupportedFormatVersion {
                found: probe.format_version,
                latest_supported: LATEST_FORMAT_VERSION,
            });
        }

        let document: BookDocument =
            serde_json::from_slice(bytes).map_err(|err| self.decode_error(err))?;
        check_keys(&document.records)?;
        Ok(document.records)
    }
}

impl BookStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<RecordMap>> {
        let started_at = Instant::now();

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=book_load module=store status=absent");
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=book_load module=store status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match self.decode(&bytes) {
            Ok(records) => {
                info!(
                    "event=book_load module=store status=ok records={} bytes={} duration_ms={}",
                    records.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(records))
            }
            Err(err) => {
                error!(
                    "event=book_load module=store status=error error_code=decode_failed duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    fn save(&self, records: &RecordMap) -> StoreResult<()> {
        let started_at = Instant::now();
        let document = BookDocumentRef {
            format_version: LATEST_FORMAT_VERSION,
            records,
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(StoreError::Encode)?;

        if let Err(err) = std::fs::write(&self.path, &bytes) {
            error!(
                "event=book_save module=store status=error error_code=write_failed error={}",
                err
            );
            return Err(self.io_error(err));
        }

        info!(
            "event=book_save module=store status=ok records={} bytes={} duration_ms={}",
            records.len(),
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
