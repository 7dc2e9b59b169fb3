use std::fmt;
use serde::Serialize;
use crate::common::vehicle::{Price, Vehicle};

/// Min/max/average of one numeric field. All three are `None` when there were no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatistics<T> {
    pub count: usize,
    pub min: Option<T>,
    pub max: Option<T>,
    pub average: Option<f64>,
}

impl<T: Copy + Ord> FieldStatistics<T> {
    pub fn from_values<I>(values: I, to_f64: impl Fn(T) -> f64) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut min: Option<T> = None;
        let mut max: Option<T> = None;

        for value in values {
            count += 1;
            sum += to_f64(value);
            min = Some(min.map_or(value, |m| m.min(value)));
            max = Some(max.map_or(value, |m| m.max(value)));
        }

        let average = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        FieldStatistics { count, min, max, average }
    }

    pub fn is_defined(&self) -> bool {
        self.count > 0
    }
}

fn write_stat(f: &mut fmt::Formatter<'_>, label: &str, value: Option<impl fmt::Display>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "{}: {}", label, v),
        None => writeln!(f, "{}: undefined", label),
    }
}

impl<T: fmt::Display> fmt::Display for FieldStatistics<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stat(f, "MIN", self.min.as_ref())?;
        write_stat(f, "MAX", self.max.as_ref())?;
        write_stat(f, "AVG", self.average)
    }
}

/// Mileage and price statistics over the whole inventory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStatistics {
    pub mileage: FieldStatistics<u32>,
    pub price: FieldStatistics<Price>,
}

impl InventoryStatistics {
    pub fn compute(vehicles: &[Vehicle]) -> Self {
        InventoryStatistics {
            mileage: FieldStatistics::from_values(vehicles.iter().map(|v| v.mileage), f64::from),
            price: FieldStatistics::from_values(vehicles.iter().map(|v| v.price), |p: Price| p.into_inner()),
        }
    }
}

impl fmt::Display for InventoryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MILEAGE")?;
        write!(f, "{}", self.mileage)?;
        writeln!(f, "PRICE")?;
        write!(f, "{}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::vehicle::Color;
    use ordered_float::OrderedFloat;

    #[test]
    fn test_field_statistics() {
        let stats = FieldStatistics::from_values([500u32, 2500, 1500], f64::from);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Some(500));
        assert_eq!(stats.max, Some(2500));
        assert_eq!(stats.average, Some(1500.0));
    }

    #[test]
    fn test_empty_statistics_are_undefined() {
        let stats = InventoryStatistics::compute(&[]);
        assert!(!stats.mileage.is_defined());
        assert_eq!(stats.price.min, None);
        assert_eq!(stats.price.average, None);

        let text = stats.to_string();
        assert!(text.contains("MIN: undefined"));
        assert!(text.contains("AVG: undefined"));
    }

    #[test]
    fn test_inventory_statistics() {
        let vehicles = vec![
            Vehicle::new("MAZDA", 160.0, Color::White, 2500, ["BLUETOOTH"]),
            Vehicle::new("BMW", 125.0, Color::Red, 1500, ["ABS"]),
        ];
        let stats = InventoryStatistics::compute(&vehicles);

        assert_eq!(stats.price.min, Some(OrderedFloat(125.0)));
        assert_eq!(stats.price.max, Some(OrderedFloat(160.0)));
        assert_eq!(stats.price.average, Some(142.5));
        assert_eq!(stats.mileage.average, Some(2000.0));

        let text = stats.to_string();
        assert_eq!(
            text,
            "MILEAGE\nMIN: 1500\nMAX: 2500\nAVG: 2000\nPRICE\nMIN: 125\nMAX: 160\nAVG: 142.5\n"
        );
    }
}
