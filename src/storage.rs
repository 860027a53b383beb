use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::errors::AppError;

/// The append-only logs, one per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLog {
    Consent,
    Profile,
    MealsPlanned,
}

impl RecordLog {
    pub fn file_name(self) -> &'static str {
        match self {
            RecordLog::Consent => "consent_data.csv",
            RecordLog::Profile => "information_data.csv",
            RecordLog::MealsPlanned => "meals_planned_data.csv",
        }
    }
}

/// Flat CSV files under one data directory. Appends are not synchronized:
/// two writers on the same log can interleave rows or both write a header.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_of(&self, log: RecordLog) -> PathBuf {
        self.dir.join(log.file_name())
    }

    /// Writes one row, plus the header row when the log does not exist yet.
    pub fn append<R: Serialize>(&self, log: RecordLog, record: &R) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_of(log);
        let fresh = !path.is_file();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(fresh)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!(log = log.file_name(), fresh, "record appended");
        Ok(())
    }

    /// A missing log means no data yet.
    pub fn load_all<R: DeserializeOwned>(&self, log: RecordLog) -> Result<Vec<R>, AppError> {
        let path = self.path_of(log);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<R>, csv::Error>>()?;
        Ok(rows)
    }
}
