pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use config::{ClassifierConfig, FamilyConfig, PrepConfig, SelectionStrategy};
pub use error::{PrepError, Result};
pub use types::*;
