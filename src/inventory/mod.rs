// In-memory vehicle inventory: load pipeline, store and derived-view queries

pub mod validator;
pub mod loader;
pub mod queries;
pub mod statistics;

use std::fmt;
use crate::common::error::{InventoryError, Result};
use crate::common::vehicle::{RawVehicle, Vehicle};
use self::loader::RecordSource;
use self::validator::{ValidationReport, VehicleValidator};

pub use self::queries::SortKey;
pub use self::statistics::{FieldStatistics, InventoryStatistics};

/// A record dropped by the load pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based position in the input
    pub position: usize,
    pub report: ValidationReport,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------------------------------- VALIDATION ERROR -----------------------")?;
        writeln!(f, "CAR NO. {}", self.position)?;
        for (field, message) in self.report.errors() {
            writeln!(f, "{} {}", field, message)?;
        }
        Ok(())
    }
}

/// Result of building an inventory from raw records
#[derive(Debug)]
pub struct LoadOutcome {
    pub inventory: Inventory,
    pub rejected: Vec<RejectedRecord>,
}

/// Ordered store of validated vehicles
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    vehicles: Vec<Vehicle>,
    validator: VehicleValidator,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from vehicles that are already known to be valid
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Inventory {
            vehicles,
            validator: VehicleValidator::new(),
        }
    }

    /// Validate raw records in input order, keeping the valid ones
    pub fn from_raw(records: Vec<Option<RawVehicle>>) -> LoadOutcome {
        let validator = VehicleValidator::new();
        let total = records.len();
        let mut vehicles = Vec::with_capacity(total);
        let mut rejected = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let position = index + 1;
            match validator.validate_into(record) {
                Ok(vehicle) => vehicles.push(vehicle),
                Err(report) => {
                    tracing::debug!(position, errors = %report, "Rejected vehicle record");
                    rejected.push(RejectedRecord { position, report });
                }
            }
        }

        tracing::info!(loaded = vehicles.len(), rejected = rejected.len(), total, "Inventory loaded");

        LoadOutcome {
            inventory: Inventory { vehicles, validator },
            rejected,
        }
    }

    /// Read records from a source and run the load pipeline.
    /// A source that cannot be read fails the whole load.
    pub fn load(source: &dyn RecordSource) -> Result<LoadOutcome> {
        tracing::debug!(source = %source.describe(), "Loading vehicle records");
        let records = source.load_records()?;
        Ok(Self::from_raw(records))
    }

    /// Validate and append a record. Absent or invalid records leave the store untouched.
    pub fn add(&mut self, record: Option<RawVehicle>) -> Result<()> {
        let Some(record) = record else {
            return Err(InventoryError::invalid_input("car is null"));
        };

        let vehicle = self.validator
            .validate_into(Some(record))
            .map_err(|report| InventoryError::Validation(report.to_string()))?;

        tracing::debug!(model = %vehicle.model, "Vehicle added");
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// All vehicles in insertion order
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.vehicles.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
