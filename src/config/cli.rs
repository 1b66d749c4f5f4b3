use crate::config::SyncConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sheet-sync")]
#[command(about = "Sync a store-locator spreadsheet into JSON and CSV files")]
pub struct CliArgs {
    /// TOML configuration file; without it the GOOGLE_* environment variables are used
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Only check that the sheet is reachable
    #[arg(long)]
    pub check: bool,

    /// Show what would be fetched and written without doing it
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    /// 載入配置並套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<SyncConfig> {
        let mut config = match &self.config {
            Some(path) => SyncConfig::from_file(path)?,
            None => SyncConfig::from_env()?,
        };

        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }

        Ok(config)
    }
}
