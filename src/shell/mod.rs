// Numbered-menu interactive shell over an inventory

pub mod console;
pub mod render;

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;
use crate::common::error::{InventoryError, Result};
use crate::common::vehicle::RawVehicle;
use crate::inventory::Inventory;
use crate::inventory::validator::name_pattern;
use self::console::Console;

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    AddVehicle,
    PrintAll,
    PrintSorted,
    PrintByMinMileage,
    PrintColorCounts,
    PrintMostExpensivePerModel,
    PrintStatistics,
    PrintMaxPrice,
    PrintSortedComponents,
    PrintComponentIndex,
    PrintPriceRange,
    Exit,
}

impl FromStr for MenuOption {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuOption::AddVehicle),
            "2" => Ok(MenuOption::PrintAll),
            "3" => Ok(MenuOption::PrintSorted),
            "4" => Ok(MenuOption::PrintByMinMileage),
            "5" => Ok(MenuOption::PrintColorCounts),
            "6" => Ok(MenuOption::PrintMostExpensivePerModel),
            "7" => Ok(MenuOption::PrintStatistics),
            "8" => Ok(MenuOption::PrintMaxPrice),
            "9" => Ok(MenuOption::PrintSortedComponents),
            "10" => Ok(MenuOption::PrintComponentIndex),
            "11" => Ok(MenuOption::PrintPriceRange),
            "12" => Ok(MenuOption::Exit),
            other => Err(InventoryError::invalid_input(format!("unknown menu option: {}", other))),
        }
    }
}

const MENU: &str = "\
Menu - enter the number:
1 - Add new car.
2 - Print all cars.
3 - Print sorted cars.
4 - Print all cars with mileage higher than x.
5 - Print how many cars are in certain colors.
6 - Print the most expensive car in models.
7 - Print statistics.
8 - Print car/cars with the biggest price.
9 - Print cars with sorted components.
10 - Print map of components and cars with that component.
11 - Print cars with price between A and B.
12 - Exit";

/// One interactive session. Owns the inventory and the console for its whole run.
pub struct Session<R, W> {
    inventory: Inventory,
    console: Console<R, W>,
    show_timing: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(inventory: Inventory, input: R, output: W) -> Self {
        Session {
            inventory,
            console: Console::new(input, output),
            show_timing: false,
        }
    }

    /// Print the execution time after each option
    pub fn with_timing(mut self, show_timing: bool) -> Self {
        self.show_timing = show_timing;
        self
    }

    /// Run the menu loop until exit or end of input. Returns the inventory and the output sink.
    pub fn run(mut self) -> Result<(Inventory, W)> {
        self.console.println(format!("Vehicle inventory - {} cars loaded", self.inventory.len()))?;

        loop {
            self.console.println(MENU)?;
            self.console.println("Enter number:")?;

            let line = match self.console.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) if e.is_recoverable() => {
                    self.console.println(format!("❌ {}", e))?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let option = match line.parse::<MenuOption>() {
                Ok(option) => option,
                Err(_) => {
                    self.console.println("Invalid option in menu. Enter number again.")?;
                    continue;
                }
            };

            if option == MenuOption::Exit {
                break;
            }

            let start_time = Instant::now();
            match self.execute(option) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    tracing::debug!(?option, error = %e, "Menu option failed");
                    self.console.println(format!("❌ {}", e))?;
                }
                Err(e) => return Err(e),
            }

            if self.show_timing {
                self.print_elapsed(start_time)?;
            }
        }

        self.console.println("The End")?;
        Ok((self.inventory, self.console.into_output()))
    }

    fn execute(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::AddVehicle => self.add_vehicle(),
            MenuOption::PrintAll => render::write_vehicles(self.console.output(), self.inventory.vehicles()),
            MenuOption::PrintSorted => {
                let descending = self.console.read_bool("Descending? ")?;
                let key = self.console.read_sort_key()?;
                let sorted = self.inventory.sort(key, descending);
                render::write_vehicles(self.console.output(), &sorted)
            }
            MenuOption::PrintByMinMileage => {
                let min_mileage = self.console.read_int("Enter X:")?;
                let filtered = self.inventory.filter_by_min_mileage(min_mileage);
                render::write_vehicles(self.console.output(), &filtered)
            }
            MenuOption::PrintColorCounts => {
                let counts = self.inventory.group_by_color_count();
                render::write_color_counts(self.console.output(), &counts)
            }
            MenuOption::PrintMostExpensivePerModel => {
                let grouped = self.inventory.group_by_model_max_price();
                render::write_model_max_price(self.console.output(), &grouped)
            }
            MenuOption::PrintStatistics => {
                let stats = self.inventory.summary_statistics();
                write!(self.console.output(), "{}", stats)?;
                Ok(())
            }
            MenuOption::PrintMaxPrice => {
                let vehicles = self.inventory.records_with_max_price()?;
                render::write_vehicles(self.console.output(), &vehicles)
            }
            MenuOption::PrintSortedComponents => {
                let vehicles = self.inventory.with_components_sorted();
                render::write_vehicles(self.console.output(), &vehicles)
            }
            MenuOption::PrintComponentIndex => {
                let index = self.inventory.component_index();
                render::write_component_index(self.console.output(), &index)
            }
            MenuOption::PrintPriceRange => {
                let low = self.console.read_decimal("Enter A:")?;
                let high = self.console.read_decimal("Enter B:")?;
                let vehicles = self.inventory.records_with_price_between(low, high)?;
                render::write_vehicles(self.console.output(), &vehicles)
            }
            MenuOption::Exit => Ok(()),
        }
    }

    fn add_vehicle(&mut self) -> Result<()> {
        let model = self.console.read_string("Enter car model name:", name_pattern())?;
        let mileage = self.console.read_int("Enter car mileage")?;
        let color = self.console.read_color()?;
        let components = self.console.read_components()?;
        let price = self.console.read_decimal("Enter car price:")?;

        self.inventory.add(Some(RawVehicle {
            model: Some(model),
            price,
            color,
            mileage,
            components: Some(components),
        }))?;

        self.console.println("✅ Car added")
    }

    fn print_elapsed(&mut self, start_time: Instant) -> Result<()> {
        let duration = start_time.elapsed();
        let duration_ms = duration.as_millis();
        let duration_us = duration.as_micros();

        if duration_ms > 0 {
            self.console.println(format!("⏱️  Executed in {:.2}ms", duration.as_secs_f64() * 1000.0))
        } else if duration_us > 100 {
            self.console.println(format!("⏱️  Executed in {}μs", duration_us))
        } else {
            self.console.println("⏱️  Executed in <100μs")
        }
    }
}
