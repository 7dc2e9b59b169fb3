use std::fmt;
use thiserror::Error;

/// Inventory error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    // General errors
    SystemError = 2,
    Internal = 4,
    BadParameter = 10,
    SerializationError = 40,

    // Input errors
    InvalidInput = 1100,
    InvalidRange = 1101,

    // Inventory errors
    ValidationFailed = 1200,
    EmptyInventory = 1201,
    LoadFailure = 1202,
}

impl ErrorCode {
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }

    pub fn from_u32(value: u32) -> Self {
        match value {
            2 => ErrorCode::SystemError,
            4 => ErrorCode::Internal,
            10 => ErrorCode::BadParameter,
            40 => ErrorCode::SerializationError,
            1100 => ErrorCode::InvalidInput,
            1101 => ErrorCode::InvalidRange,
            1200 => ErrorCode::ValidationFailed,
            1201 => ErrorCode::EmptyInventory,
            1202 => ErrorCode::LoadFailure,
            _ => ErrorCode::Internal, // Unknown error codes default to Internal
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::SystemError => write!(f, "system error"),
            ErrorCode::Internal => write!(f, "internal error"),
            ErrorCode::BadParameter => write!(f, "bad parameter"),
            ErrorCode::SerializationError => write!(f, "serialization error"),
            ErrorCode::InvalidInput => write!(f, "invalid input"),
            ErrorCode::InvalidRange => write!(f, "invalid range"),
            ErrorCode::ValidationFailed => write!(f, "validation failed"),
            ErrorCode::EmptyInventory => write!(f, "empty inventory"),
            ErrorCode::LoadFailure => write!(f, "load failure"),
        }
    }
}

/// Main inventory error type
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("inventory error {code}: {message}")]
    Inventory {
        code: ErrorCode,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl InventoryError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        InventoryError::Inventory {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        InventoryError::new(ErrorCode::Internal, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        InventoryError::new(ErrorCode::InvalidInput, message)
    }

    pub fn invalid_range(message: impl Into<String>) -> Self {
        InventoryError::new(ErrorCode::InvalidRange, message)
    }

    pub fn empty_inventory(message: impl Into<String>) -> Self {
        InventoryError::new(ErrorCode::EmptyInventory, message)
    }

    pub fn load_failure(source: impl fmt::Display, reason: impl fmt::Display) -> Self {
        InventoryError::new(
            ErrorCode::LoadFailure,
            format!("cannot load '{}': {}", source, reason)
        )
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            InventoryError::Inventory { code, .. } => *code,
            InventoryError::Io(_) => ErrorCode::SystemError,
            InventoryError::Serde(_) => ErrorCode::SerializationError,
            InventoryError::Toml(_) => ErrorCode::SerializationError,
            InventoryError::Validation(_) => ErrorCode::ValidationFailed,
            InventoryError::Config(_) => ErrorCode::BadParameter,
        }
    }

    /// Errors the shell reports and recovers from; everything else ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.error_code(),
            ErrorCode::InvalidInput |
            ErrorCode::InvalidRange |
            ErrorCode::ValidationFailed |
            ErrorCode::EmptyInventory
        )
    }
}

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Macro for creating inventory errors
#[macro_export]
macro_rules! inventory_error {
    ($code:expr, $($arg:tt)*) => {
        $crate::common::error::InventoryError::new($code, format!($($arg)*))
    };
}

/// Macro for early return on error
#[macro_export]
macro_rules! inventory_bail {
    ($code:expr, $($arg:tt)*) => {
        return Err($crate::inventory_error!($code, $($arg)*))
    };
}

/// Macro for ensuring a condition or returning an error
#[macro_export]
macro_rules! inventory_ensure {
    ($cond:expr, $code:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::inventory_bail!($code, $($arg)*);
        }
    };
}
