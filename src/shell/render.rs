// Text rendering of derived views, shared by the menu shell and one-shot commands

use std::collections::BTreeMap;
use std::io::Write;
use crate::common::error::Result;
use crate::common::vehicle::{Color, Vehicle};

pub fn write_vehicles(out: &mut impl Write, vehicles: &[Vehicle]) -> Result<()> {
    if vehicles.is_empty() {
        writeln!(out, "(no vehicles)")?;
        return Ok(());
    }

    for vehicle in vehicles {
        writeln!(out, "{}", vehicle)?;
    }
    Ok(())
}

pub fn write_color_counts(out: &mut impl Write, counts: &[(Color, usize)]) -> Result<()> {
    if counts.is_empty() {
        writeln!(out, "(no vehicles)")?;
    }

    for (color, count) in counts {
        writeln!(out, "{}: {}", color, count)?;
    }
    Ok(())
}

pub fn write_model_max_price(out: &mut impl Write, grouped: &BTreeMap<String, Vehicle>) -> Result<()> {
    if grouped.is_empty() {
        writeln!(out, "(no vehicles)")?;
    }

    for (model, vehicle) in grouped {
        writeln!(out, "{}: {}", model, vehicle)?;
    }
    Ok(())
}

pub fn write_component_index(out: &mut impl Write, index: &BTreeMap<String, Vec<Vehicle>>) -> Result<()> {
    if index.is_empty() {
        writeln!(out, "(no components)")?;
    }

    for (component, vehicles) in index {
        writeln!(out, "{} ({}):", component, vehicles.len())?;
        for vehicle in vehicles {
            writeln!(out, "  {}", vehicle)?;
        }
    }
    Ok(())
}
