// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::compare::{ComparisonRecord, ComparisonTable};
use crate::export::ExportTable;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

/// What gets written for a comparison: the raw record plus its tabular layout.
#[derive(Serialize)]
struct ComparisonOutput<'a> {
    record: &'a ComparisonRecord,
    table: &'a ComparisonTable,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves an export table as `syllabus_export_<stamp>.json`
    pub fn save_export(&self, table: &ExportTable) -> Result<PathBuf, StorageError> {
        let path = self.stamped_path("syllabus_export", "json");
        self.write_json(&path, table)?;
        tracing::info!("Saved export ({} rows) to {}", table.rows.len(), path.display());
        Ok(path)
    }

    /// Saves a comparison record and its table as `comparison_<stamp>.json`
    pub fn save_comparison(
        &self,
        record: &ComparisonRecord,
        table: &ComparisonTable,
    ) -> Result<PathBuf, StorageError> {
        let path = self.stamped_path("comparison", "json");
        self.write_json(&path, &ComparisonOutput { record, table })?;
        tracing::info!("Saved comparison to {}", path.display());
        Ok(path)
    }

    /// Saves the plain-text comparison report as `comparison_<stamp>.txt`
    pub fn save_report(&self, report: &str) -> Result<PathBuf, StorageError> {
        let path = self.stamped_path("comparison", "txt");
        fs::write(&path, report).map_err(StorageError::IoError)?;
        tracing::info!("Saved comparison report to {}", path.display());
        Ok(path)
    }

    fn stamped_path(&self, prefix: &str, extension: &str) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        self.base_dir.join(format!("{}_{}.{}", prefix, stamp, extension))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(path, json).map_err(StorageError::IoError)
    }
}
