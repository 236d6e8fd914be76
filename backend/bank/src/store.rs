//! # Record Store
//!
//! One CSV file per collection, header row first.
//!
//! ## Behavior
//!
//! - No in-memory cache, every call re-reads the whole file
//! - Reading a missing file creates it with the header row only
//! - Reads swallow I/O and parse failures into an empty list, writes return them
//! - Every write rewrites the whole file in canonical column order, then reads it back to verify
//!
//! ## Known Gaps
//!
//! - No locking: concurrent writers are last-writer-wins, a reader mid-write may see a truncated file
//! - Writes are not atomic, a crash mid-write can leave a partial file
//! - Append reads through the swallowing path, so an unreadable file gets replaced by the new row alone
use std::{
    fmt, fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    error::StoreError,
    records::{Bill, Record, TRUE},
};

pub struct RecordStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("path", &self.path)
            .finish()
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(R::FILE_NAME),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every row in file order, or nothing if the file can't be read.
    pub fn read_all(&self) -> Vec<R> {
        self.try_read_all().unwrap_or_else(|e| {
            warn!("Error reading {}: {e}", self.path.display());
            Vec::new()
        })
    }

    pub fn try_read_all(&self) -> Result<Vec<R>, StoreError> {
        if !self.path.exists() {
            info!("Creating {} with headers", self.path.display());

            self.write_bytes(&render::<R>(&[])?)?;
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;

        let mut records: Vec<R> = parse(&bytes)?;
        records.iter_mut().for_each(R::normalize);

        debug!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    pub fn append(&self, record: R) -> Result<(), StoreError> {
        let mut records = self.read_all();
        records.push(record);

        self.write_all(&records)
    }

    /// Mutates the first row, in file order, whose key equals `key`.
    ///
    /// Leaves the file untouched when nothing matches.
    pub fn update_first<F>(&self, key: &str, mutate: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut R),
    {
        let mut records = self.read_all();

        let Some(record) = records.iter_mut().find(|record| record.key() == key) else {
            return Err(StoreError::NotFound(key.to_string()));
        };

        mutate(record);
        let updated = record.clone();

        self.write_all(&records)?;
        Ok(updated)
    }

    pub fn write_all(&self, records: &[R]) -> Result<(), StoreError> {
        let normalized: Vec<R> = records
            .iter()
            .cloned()
            .map(|mut record| {
                record.normalize();
                record
            })
            .collect();

        let bytes = render(&normalized)?;
        self.write_bytes(&bytes)?;

        let written = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        if written != bytes {
            return Err(StoreError::Verification);
        }

        debug!("Wrote {} rows to {}", normalized.len(), self.path.display());
        Ok(())
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        fs::write(&self.path, bytes).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl RecordStore<Bill> {
    pub fn checkout(&self, bill_name: &str) -> Result<Bill, StoreError> {
        self.update_first(bill_name, |bill| {
            let previous = std::mem::replace(&mut bill.checked_out, TRUE.to_string());
            info!("Bill {bill_name} CheckedOut {previous} -> true");
        })
    }
}

/// Header-keyed rows, lenient about short rows and missing columns.
pub(crate) fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for row in reader.records() {
        let mut row = row?;

        while row.len() < headers.len() {
            row.push_field("");
        }

        rows.push(row.deserialize(Some(&headers))?);
    }

    Ok(rows)
}

fn render<R: Record>(records: &[R]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::io("<buffer>", e.into_error()))
}
