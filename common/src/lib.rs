pub mod error;
pub mod types;
pub mod config;

pub use error::{ScannerError, Result};
pub use types::*;
pub use config::*;
