use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::Context;
use clap::{Parser, Subcommand};
use car_inventory::shell::render;
use car_inventory::{
    init_tracing, CliOverrides, Inventory, InventoryConfig, JsonFileSource, Session, SortKey,
};

/// Car Inventory - load, validate and query a vehicle list
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON file with the vehicle records
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Configuration file (defaults to ./inventory.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,
    /// Print all cars
    List,
    /// Print cars sorted by a key
    Sort {
        /// MODEL, PRICE, MILEAGE or COLOR (or its number)
        key: String,
        /// Sort from highest to lowest
        #[arg(short, long)]
        descending: bool,
    },
    /// Print cars with mileage higher than the given value
    Mileage {
        min: u32,
    },
    /// Print how many cars there are in each color
    Colors,
    /// Print the most expensive car of each model
    Models,
    /// Print mileage and price statistics
    Stats,
    /// Print the car or cars with the biggest price
    MaxPrice,
    /// Print cars with sorted components
    SortedComponents,
    /// Print every component with the cars that have it
    Components,
    /// Print cars with price between LOW and HIGH
    PriceRange {
        low: f64,
        high: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        data_file: cli.data_file.clone(),
        verbose: cli.verbose,
    };
    let config = InventoryConfig::load(cli.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;

    init_tracing(&config.log_filter)?;
    tracing::debug!(?config, "Configuration resolved");

    let source = JsonFileSource::new(&config.data_file);
    let outcome = Inventory::load(&source)
        .with_context(|| format!("Failed to load inventory from {}", config.data_file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for rejected in &outcome.rejected {
        write!(out, "{}", rejected)?;
    }

    let inventory = outcome.inventory;
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let (inventory, _) = Session::new(inventory, stdin.lock(), out)
                .with_timing(config.show_timing)
                .run()?;
            tracing::debug!(vehicles = inventory.len(), "Session ended");
        }
        command => run_command(&inventory, command, &mut out)?,
    }

    Ok(())
}

fn run_command(inventory: &Inventory, command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Shell => unreachable!("shell is handled by main"),
        Commands::List => render::write_vehicles(out, inventory.vehicles())?,
        Commands::Sort { key, descending } => {
            let key: SortKey = key.parse()?;
            render::write_vehicles(out, &inventory.sort(key, descending))?;
        }
        Commands::Mileage { min } => {
            render::write_vehicles(out, &inventory.filter_by_min_mileage(min))?;
        }
        Commands::Colors => render::write_color_counts(out, &inventory.group_by_color_count())?,
        Commands::Models => render::write_model_max_price(out, &inventory.group_by_model_max_price())?,
        Commands::Stats => write!(out, "{}", inventory.summary_statistics())?,
        Commands::MaxPrice => render::write_vehicles(out, &inventory.records_with_max_price()?)?,
        Commands::SortedComponents => render::write_vehicles(out, &inventory.with_components_sorted())?,
        Commands::Components => render::write_component_index(out, &inventory.component_index())?,
        Commands::PriceRange { low, high } => {
            render::write_vehicles(out, &inventory.records_with_price_between(low, high)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
