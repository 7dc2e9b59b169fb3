use std::fs;
use std::path::PathBuf;
use crate::common::error::{InventoryError, Result};
use crate::common::vehicle::RawVehicle;

/// Source of unvalidated vehicle records. `None` entries are absent (null) records.
pub trait RecordSource {
    /// Read every raw record, in source order
    fn load_records(&self) -> Result<Vec<Option<RawVehicle>>>;

    /// Human-readable name of the source, used in diagnostics
    fn describe(&self) -> String;
}

/// JSON array of vehicle objects stored in a file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl RecordSource for JsonFileSource {
    fn load_records(&self) -> Result<Vec<Option<RawVehicle>>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| InventoryError::load_failure(self.path.display(), e))?;

        parse_records(&content)
            .map_err(|e| InventoryError::load_failure(self.path.display(), e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Option<RawVehicle>>,
}

impl MemorySource {
    pub fn new(records: Vec<Option<RawVehicle>>) -> Self {
        MemorySource { records }
    }
}

impl RecordSource for MemorySource {
    fn load_records(&self) -> Result<Vec<Option<RawVehicle>>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Parse a JSON array of raw vehicle records
pub fn parse_records(json: &str) -> Result<Vec<Option<RawVehicle>>> {
    Ok(serde_json::from_str(json)?)
}
