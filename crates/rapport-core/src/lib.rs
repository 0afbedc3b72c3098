pub mod config;
pub mod error;

pub use config::RapportConfig;
pub use error::{RapportError, Result};
