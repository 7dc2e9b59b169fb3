// Car Inventory Library
// In-memory vehicle inventory with validation, queries and an interactive menu

// Common modules
pub mod common {
    pub mod error;
    pub mod vehicle;
    pub mod config;
    pub mod logging;
}

// Inventory engine and menu shell
pub mod inventory;
pub mod shell;

// Re-export commonly used types for convenience
pub use common::error::{ErrorCode, InventoryError, Result};
pub use common::vehicle::{Color, Price, RawVehicle, Vehicle};
pub use common::config::{CliOverrides, InventoryConfig};
pub use common::logging::init_tracing;

pub use inventory::{
    Inventory,
    InventoryStatistics,
    LoadOutcome,
    RejectedRecord,
    SortKey,
};
pub use inventory::loader::{JsonFileSource, RecordSource};
pub use shell::Session;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
