pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::{build_router, serve};
pub use adapters::storage::{LocalStorage, StagedUpload};
pub use adapters::workbook::WorkbookFormat;
pub use config::Settings;
pub use core::{etl::RosterEngine, pipeline::WorkbookPipeline};
pub use utils::error::{Result, RosterError};
