use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use crate::common::error::{ErrorCode, InventoryError, Result};
use crate::common::vehicle::{Color, Price, Vehicle};
use crate::inventory_ensure;
use super::Inventory;
use super::statistics::InventoryStatistics;

/// Field to sort vehicles by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Model,
    Price,
    Mileage,
    Color,
}

impl SortKey {
    /// All keys in menu order
    pub const ALL: [SortKey; 4] = [SortKey::Model, SortKey::Price, SortKey::Mileage, SortKey::Color];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Model => "MODEL",
            SortKey::Price => "PRICE",
            SortKey::Mileage => "MILEAGE",
            SortKey::Color => "COLOR",
        }
    }

    /// Map a 1-based menu number to a key
    pub fn from_menu_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(SortKey::Model),
            2 => Some(SortKey::Price),
            3 => Some(SortKey::Mileage),
            4 => Some(SortKey::Color),
            _ => None,
        }
    }
}

impl FromStr for SortKey {
    type Err = InventoryError;

    /// Accepts a key name (any case) or its menu number
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u32>() {
            return SortKey::from_menu_number(number)
                .ok_or_else(|| InventoryError::invalid_input(format!("sort type option {} does not exist", number)));
        }

        match s.to_uppercase().as_str() {
            "MODEL" => Ok(SortKey::Model),
            "PRICE" => Ok(SortKey::Price),
            "MILEAGE" => Ok(SortKey::Mileage),
            "COLOR" => Ok(SortKey::Color),
            _ => Err(InventoryError::invalid_input(format!("unknown sort type: {}", s))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Inventory {
    /// Stable ascending sort of a copy of the store. `descending` reverses the
    /// ascending result, so equal keys also come out in reverse store order.
    pub fn sort(&self, key: SortKey, descending: bool) -> Vec<Vehicle> {
        let mut sorted = self.vehicles.clone();

        match key {
            SortKey::Model => sorted.sort_by(|a, b| a.model.cmp(&b.model)),
            SortKey::Price => sorted.sort_by_key(|v| v.price),
            SortKey::Mileage => sorted.sort_by_key(|v| v.mileage),
            SortKey::Color => sorted.sort_by_key(|v| v.color),
        }

        if descending {
            sorted.reverse();
        }

        sorted
    }

    /// Vehicles with `mileage >= min_mileage`
    pub fn filter_by_min_mileage(&self, min_mileage: u32) -> Vec<Vehicle> {
        self.vehicles.iter()
            .filter(|v| v.mileage >= min_mileage)
            .cloned()
            .collect()
    }

    /// Vehicle count per color, highest count first. Equal counts keep first-seen order.
    pub fn group_by_color_count(&self) -> Vec<(Color, usize)> {
        let mut counts: Vec<(Color, usize)> = Vec::new();

        for vehicle in &self.vehicles {
            match counts.iter_mut().find(|(color, _)| *color == vehicle.color) {
                Some((_, count)) => *count += 1,
                None => counts.push((vehicle.color, 1)),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Most expensive vehicle of each model. On a price tie the first in store order wins.
    pub fn group_by_model_max_price(&self) -> BTreeMap<String, Vehicle> {
        let mut result: BTreeMap<String, Vehicle> = BTreeMap::new();

        for vehicle in &self.vehicles {
            match result.get_mut(&vehicle.model) {
                Some(current) if vehicle.price > current.price => *current = vehicle.clone(),
                Some(_) => {}
                None => {
                    result.insert(vehicle.model.clone(), vehicle.clone());
                }
            }
        }

        result
    }

    /// Mileage and price statistics. Undefined on an empty store.
    pub fn summary_statistics(&self) -> InventoryStatistics {
        InventoryStatistics::compute(&self.vehicles)
    }

    /// Every vehicle priced at the inventory's maximum price, in store order
    pub fn records_with_max_price(&self) -> Result<Vec<Vehicle>> {
        let max_price = self.vehicles.iter()
            .map(|v| v.price)
            .max()
            .ok_or_else(|| InventoryError::empty_inventory("no most expensive car in an empty inventory"))?;

        Ok(self.vehicles.iter()
            .filter(|v| v.price == max_price)
            .cloned()
            .collect())
    }

    /// Copies of all vehicles with their components sorted. The store keeps its order.
    pub fn with_components_sorted(&self) -> Vec<Vehicle> {
        self.vehicles.iter()
            .map(Vehicle::with_sorted_components)
            .collect()
    }

    /// Component name to every vehicle that has it, vehicles in store order
    pub fn component_index(&self) -> BTreeMap<String, Vec<Vehicle>> {
        let mut index: BTreeMap<String, Vec<Vehicle>> = BTreeMap::new();

        for vehicle in &self.vehicles {
            let distinct: BTreeSet<&String> = vehicle.components.iter().collect();
            for component in distinct {
                index.entry(component.clone())
                    .or_default()
                    .push(vehicle.clone());
            }
        }

        index
    }

    /// Vehicles with `low <= price <= high`. Fails when `low >= high`.
    pub fn records_with_price_between(&self, low: impl Into<Price>, high: impl Into<Price>) -> Result<Vec<Vehicle>> {
        let low = low.into();
        let high = high.into();
        inventory_ensure!(low < high, ErrorCode::InvalidRange, "price range {} - {} is not valid", low, high);

        Ok(self.vehicles.iter()
            .filter(|v| v.price >= low && v.price <= high)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_support::{model_fleet, price_fleet, tied_fleet};
    use ordered_float::OrderedFloat;

    fn models(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.model.as_str()).collect()
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("1".parse::<SortKey>().unwrap(), SortKey::Model);
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("Mileage".parse::<SortKey>().unwrap(), SortKey::Mileage);
        assert_eq!("4".parse::<SortKey>().unwrap(), SortKey::Color);
        assert!("5".parse::<SortKey>().is_err());
        assert!("speed".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_by_model_descending() {
        let inventory = Inventory::from_vehicles(model_fleet());
        assert_eq!(models(&inventory.sort(SortKey::Model, true)), vec!["MAZDA", "MAZDA", "BMW"]);
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let inventory = Inventory::from_vehicles(price_fleet());
        let sorted = inventory.sort(SortKey::Price, false);
        assert_eq!(models(&sorted), vec!["MAZDA", "BMW", "BMW", "MAZDA"]);
        assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_sort_by_color_uses_declaration_order() {
        let inventory = Inventory::from_vehicles(price_fleet());
        let colors: Vec<Color> = inventory.sort(SortKey::Color, false).iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![Color::Red, Color::Black, Color::Black, Color::White]);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending_including_ties() {
        let inventory = Inventory::from_vehicles(tied_fleet());
        for key in SortKey::ALL {
            let mut ascending = inventory.sort(key, false);
            ascending.reverse();
            assert_eq!(inventory.sort(key, true), ascending, "key {}", key);
        }

        // The two 170 BMWs: ascending keeps store order, descending flips it
        let descending = inventory.sort(SortKey::Price, true);
        assert_eq!(descending[0].color, Color::Red);
        assert_eq!(descending[1].color, Color::Black);
    }

    #[test]
    fn test_sort_does_not_touch_store() {
        let inventory = Inventory::from_vehicles(price_fleet());
        let _ = inventory.sort(SortKey::Mileage, true);
        assert_eq!(inventory.vehicles(), price_fleet().as_slice());
    }

    #[test]
    fn test_filter_by_min_mileage() {
        let inventory = Inventory::from_vehicles(price_fleet());
        assert_eq!(models(&inventory.filter_by_min_mileage(2000)), vec!["MAZDA"]);
        assert_eq!(models(&inventory.filter_by_min_mileage(2500)), vec!["MAZDA"]);
        assert_eq!(inventory.filter_by_min_mileage(0).len(), 4);
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn test_filter_by_min_mileage_is_idempotent() {
        let inventory = Inventory::from_vehicles(price_fleet());
        let once = inventory.filter_by_min_mileage(1000);
        let twice = Inventory::from_vehicles(once.clone()).filter_by_min_mileage(1000);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_group_by_color_count() {
        let inventory = Inventory::from_vehicles(price_fleet());
        let counts = inventory.group_by_color_count();

        assert_eq!(counts, vec![(Color::Black, 2), (Color::Red, 1), (Color::White, 1)]);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), inventory.len());
    }

    #[test]
    fn test_group_by_color_count_empty() {
        assert!(Inventory::new().group_by_color_count().is_empty());
    }

    #[test]
    fn test_group_by_model_max_price() {
        let inventory = Inventory::from_vehicles(vec![
            Vehicle::new("MAZDA", 160.0, Color::White, 2500, ["AIR CONDITIONING", "BLUETOOTH", "ALLOY WHEELS"]),
            Vehicle::new("BMW", 125.0, Color::Red, 1500, ["ABS"]),
        ]);
        let grouped = inventory.group_by_model_max_price();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["MAZDA"].price, OrderedFloat(160.0));
        assert_eq!(grouped["BMW"], Vehicle::new("BMW", 125.0, Color::Red, 1500, ["ABS"]));
    }

    #[test]
    fn test_group_by_model_max_price_tie_keeps_first() {
        let inventory = Inventory::from_vehicles(tied_fleet());
        let grouped = inventory.group_by_model_max_price();
        assert_eq!(grouped["BMW"].color, Color::Black);
        assert_eq!(grouped["MAZDA"].price, OrderedFloat(160.0));
    }

    #[test]
    fn test_records_with_max_price() {
        let single = Inventory::from_vehicles(price_fleet()).records_with_max_price().unwrap();
        assert_eq!(models(&single), vec!["MAZDA"]);

        let tied = Inventory::from_vehicles(tied_fleet()).records_with_max_price().unwrap();
        assert_eq!(models(&tied), vec!["BMW", "BMW"]);
        assert_eq!(tied[0].color, Color::Black);
        assert_eq!(tied[1].color, Color::Red);
    }

    #[test]
    fn test_records_with_max_price_empty() {
        let err = Inventory::new().records_with_max_price().unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::EmptyInventory);
    }

    #[test]
    fn test_with_components_sorted() {
        let inventory = Inventory::from_vehicles(tied_fleet());
        let sorted: Vec<Vec<String>> = inventory.with_components_sorted()
            .into_iter()
            .map(|v| v.components)
            .collect();

        assert_eq!(sorted, vec![
            vec!["ABS".to_string()],
            vec!["AIR CONDITIONING".to_string(), "ALLOY WHEELS".to_string(), "BLUETOOTH".to_string()],
            vec!["ABLUETOOTH".to_string(), "AIR CON".to_string()],
            vec!["ABS".to_string()],
        ]);

        // Store keeps insertion order
        assert_eq!(inventory.vehicles()[2].components, vec!["AIR CON", "ABLUETOOTH"]);
    }

    #[test]
    fn test_with_components_sorted_is_idempotent() {
        let inventory = Inventory::from_vehicles(vec![Vehicle::new("KIA", 1.0, Color::Green, 1, ["B", "A", "C"])]);
        let once = inventory.with_components_sorted();
        assert_eq!(once[0].components, vec!["A", "B", "C"]);

        let twice = Inventory::from_vehicles(once.clone()).with_components_sorted();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_component_index() {
        let fleet = tied_fleet();
        let inventory = Inventory::from_vehicles(fleet.clone());
        let index = inventory.component_index();

        assert_eq!(index.len(), 6);
        assert_eq!(index["ABS"], vec![fleet[0].clone(), fleet[3].clone()]);
        assert_eq!(index["BLUETOOTH"], vec![fleet[1].clone()]);
        assert_eq!(index["ABLUETOOTH"], vec![fleet[2].clone()]);

        for vehicle in inventory.vehicles() {
            for component in &vehicle.components {
                assert!(index[component].contains(vehicle));
            }
        }
        for (component, vehicles) in &index {
            assert!(vehicles.iter().all(|v| v.has_component(component)));
        }
    }

    #[test]
    fn test_component_index_lists_vehicle_once_per_component() {
        let inventory = Inventory::from_vehicles(vec![Vehicle::new("KIA", 1.0, Color::Green, 1, ["ABS", "ABS"])]);
        assert_eq!(inventory.component_index()["ABS"].len(), 1);
    }

    #[test]
    fn test_records_with_price_between() {
        let fleet = tied_fleet();
        let inventory = Inventory::from_vehicles(fleet.clone());

        let result = inventory.records_with_price_between(110.0, 200.0).unwrap();
        assert_eq!(result, vec![fleet[0].clone(), fleet[1].clone(), fleet[3].clone()]);

        // Bounds are inclusive
        let result = inventory.records_with_price_between(100.0, 160.0).unwrap();
        assert_eq!(models(&result), vec!["MAZDA", "MAZDA"]);
    }

    #[test]
    fn test_records_with_price_between_partitions_store() {
        let inventory = Inventory::from_vehicles(price_fleet());
        let (low, high) = (OrderedFloat(105.0), OrderedFloat(130.0));
        let inside = inventory.records_with_price_between(low, high).unwrap();

        for vehicle in inventory.vehicles() {
            let in_range = vehicle.price >= low && vehicle.price <= high;
            assert_eq!(inside.contains(vehicle), in_range);
        }
    }

    #[test]
    fn test_records_with_price_between_invalid_range() {
        let inventory = Inventory::from_vehicles(price_fleet());
        for (low, high) in [(200.0, 110.0), (150.0, 150.0)] {
            let err = inventory.records_with_price_between(low, high).unwrap_err();
            assert_eq!(err.error_code(), ErrorCode::InvalidRange);
        }
    }
}
