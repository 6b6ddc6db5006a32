use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::appetite::ThresholdError;

/// Boundary failures while reading persisted record collections.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("metric '{metric}' rejected: {source}")]
    Threshold {
        metric: String,
        #[source]
        source: ThresholdError,
    },
}

/// Entry-time checks applied before a record may join a [`RecordSet`].
pub trait EntryValidation {
    fn validate_entry(&self) -> Result<(), LoadError> {
        Ok(())
    }
}

/// Parse a JSON array of records and run entry validation on every element.
pub fn load_json<T, R>(reader: R) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned + EntryValidation,
    R: Read,
{
    let records: Vec<T> = serde_json::from_reader(reader)?;
    for record in &records {
        record.validate_entry()?;
    }
    Ok(records)
}

pub fn load_json_path<T, P>(path: P) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned + EntryValidation,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    load_json(file)
}

/// Owned record collection that is only ever replaced wholesale.
///
/// A failed load leaves the previous collection untouched.
#[derive(Debug, Clone)]
pub struct RecordSet<T> {
    records: Vec<T>,
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> RecordSet<T>
where
    T: DeserializeOwned + EntryValidation,
{
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn replace(&mut self, records: Vec<T>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<T> {
        &mut self.records
    }

    /// Replace the collection from a JSON array, returning the new record count.
    pub fn replace_from_json<R: Read>(&mut self, reader: R) -> Result<usize, LoadError> {
        match load_json(reader) {
            Ok(records) => {
                debug!(count = records.len(), "record set replaced");
                self.records = records;
                Ok(self.records.len())
            }
            Err(err) => {
                warn!(error = %err, kept = self.records.len(), "record load rejected");
                Err(err)
            }
        }
    }

    pub fn replace_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let file = File::open(path)?;
        self.replace_from_json(file)
    }
}
