//! Command-line options. Every flag is optional; running with no arguments
//! uses `inventory.csv` in the working directory and the per-user config
//! directory.

use clap::Parser;
use std::path::PathBuf;

use crate::export::DEFAULT_EXPORT_FILE;

#[derive(Debug, Clone, Parser)]
#[command(name = "inventory-manager", version, about)]
pub struct Cli {
    /// Default destination for CSV export.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_EXPORT_FILE)]
    pub export_path: PathBuf,

    /// Directory holding theme.conf and keybinds.conf.
    #[arg(long, value_name = "DIR", env = "INVENTORY_MANAGER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log file (defaults to inventory-manager.log in the config directory).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Config directory to use: the flag, else the per-user default, else
    /// the working directory.
    pub fn resolved_config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .or_else(crate::app::default_config_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn resolved_log_file(&self, config_dir: &std::path::Path) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir.join("inventory-manager.log"))
    }
}
