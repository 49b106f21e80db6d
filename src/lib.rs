pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod interfaces;
pub mod utils;

pub use adapters::{BackendClient, LocalStorage};
pub use config::{CliConfig, ServerSettings};
pub use core::csv_parser::parse_csv;
pub use core::import::{CsvImportPipeline, ImportEngine, OutputFormat};
pub use domain::model::Lead;
pub use utils::error::{AppError, Result};
