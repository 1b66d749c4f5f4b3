pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{sheets::SheetsClient, storage::LocalSink};
pub use app::pipelines::sheet_pipeline::SheetPipeline;
pub use config::SyncConfig;
pub use core::etl::SyncEngine;
pub use utils::error::{Result, SyncError};
