use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use crate::common::vehicle::{RawVehicle, Vehicle};

/// Upper-case letters and spaces only
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z ]+$").unwrap());

pub const CAR_FIELD: &str = "car";
pub const MODEL_FIELD: &str = "model";
pub const COMPONENTS_FIELD: &str = "components";

/// Pattern every model and component name must match
pub fn name_pattern() -> &'static Regex {
    &NAME_PATTERN
}

/// Check a model or component name
pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

/// Field-keyed outcome of validating one record. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<(&'static str, String)>,
}

impl ValidationReport {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Message recorded for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    /// Errors in the order the checks ran
    pub fn errors(&self) -> &[(&'static str, String)] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter()
            .map(|(field, message)| format!("{} {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Base trait for record validators
pub trait Validator<T> {
    /// Run every check against a possibly absent record
    fn validate(&self, item: Option<&T>) -> ValidationReport;
}

/// Structural checks for vehicle records
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleValidator;

impl VehicleValidator {
    pub fn new() -> Self {
        VehicleValidator
    }

    /// Validate and, on success, turn the raw record into a vehicle
    pub fn validate_into(&self, raw: Option<RawVehicle>) -> std::result::Result<Vehicle, ValidationReport> {
        let report = self.validate(raw.as_ref());
        if report.has_errors() {
            return Err(report);
        }

        match raw {
            Some(RawVehicle { model: Some(model), price, color, mileage, components: Some(components) }) => {
                Ok(Vehicle { model, price, color, mileage, components })
            }
            // A clean report guarantees presence of model and components
            _ => Err(report),
        }
    }

    fn check_model(model: Option<&String>, report: &mut ValidationReport) {
        let valid = model.is_some_and(|m| is_valid_name(m));
        if !valid {
            let shown = model.map_or_else(|| "null".to_string(), Clone::clone);
            report.add(MODEL_FIELD, format!("not valid: {}", shown));
        }
    }

    fn check_components(components: Option<&Vec<String>>, report: &mut ValidationReport) {
        let valid = components.is_some_and(|list| list.iter().all(|c| is_valid_name(c)));
        if !valid {
            let shown = components.map_or_else(
                || "null".to_string(),
                |list| format!("[{}]", list.join(", "))
            );
            report.add(COMPONENTS_FIELD, format!("not valid: {}", shown));
        }
    }
}

impl Validator<RawVehicle> for VehicleValidator {
    fn validate(&self, item: Option<&RawVehicle>) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(vehicle) = item else {
            report.add(CAR_FIELD, "null");
            return report;
        };

        Self::check_model(vehicle.model.as_ref(), &mut report);
        Self::check_components(vehicle.components.as_ref(), &mut report);
        report
    }
}
