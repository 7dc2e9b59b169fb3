use std::fmt;
use std::str::FromStr;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use crate::common::error::{InventoryError, Result};

/// Vehicle price. Totally ordered so it can be sorted, grouped and compared exactly.
pub type Price = OrderedFloat<f64>;

/// Vehicle color. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Black,
    White,
    Green,
}

impl Color {
    /// All colors in menu order
    pub const ALL: [Color; 4] = [Color::Red, Color::Black, Color::White, Color::Green];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Black => "BLACK",
            Color::White => "WHITE",
            Color::Green => "GREEN",
        }
    }

    /// Map a 1-based menu number to a color
    pub fn from_menu_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Color::Red),
            2 => Some(Color::Black),
            3 => Some(Color::White),
            4 => Some(Color::Green),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = InventoryError;

    /// Accepts a color name (any case) or its menu number
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u32>() {
            return Color::from_menu_number(number)
                .ok_or_else(|| InventoryError::invalid_input(format!("color option {} does not exist", number)));
        }

        match s.to_uppercase().as_str() {
            "RED" => Ok(Color::Red),
            "BLACK" => Ok(Color::Black),
            "WHITE" => Ok(Color::White),
            "GREEN" => Ok(Color::Green),
            _ => Err(InventoryError::invalid_input(format!("unknown color: {}", s))),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated vehicle record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    pub model: String,
    pub price: Price,
    pub color: Color,
    pub mileage: u32,
    pub components: Vec<String>,
}

impl Vehicle {
    pub fn new<I, S>(model: impl Into<String>, price: f64, color: Color, mileage: u32, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vehicle {
            model: model.into(),
            price: OrderedFloat(price),
            color,
            mileage,
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether the vehicle has a component
    pub fn has_component(&self, component: &str) -> bool {
        self.components.iter().any(|c| c == component)
    }

    /// Copy of this vehicle with its components in lexicographic order
    pub fn with_sorted_components(&self) -> Self {
        let mut vehicle = self.clone();
        vehicle.components.sort();
        vehicle
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle(model={}, price={}, color={}, mileage={}, components=[{}])",
            self.model,
            self.price,
            self.color,
            self.mileage,
            self.components.join(", ")
        )
    }
}

/// Vehicle record as it arrives from a data file or the shell, before validation.
///
/// `model` and `components` may be missing; rejecting those is the validator's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVehicle {
    #[serde(default)]
    pub model: Option<String>,
    pub price: Price,
    pub color: Color,
    pub mileage: u32,
    #[serde(default)]
    pub components: Option<Vec<String>>,
}

impl From<Vehicle> for RawVehicle {
    fn from(vehicle: Vehicle) -> Self {
        RawVehicle {
            model: Some(vehicle.model),
            price: vehicle.price,
            color: vehicle.color,
            mileage: vehicle.mileage,
            components: Some(vehicle.components),
        }
    }
}
