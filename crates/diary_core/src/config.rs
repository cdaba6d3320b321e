//! Runtime configuration for hosts embedding the diary core.
//!
//! # Invariants
//! - Every field has a usable default; hosts override only what they need.

use crate::asset::SAMPLE_ASSET_NAME;
use crate::logging::default_log_level;
use std::path::PathBuf;

/// Default database file name, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "diary.sqlite3";

/// Where the diary keeps its data and how it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryConfig {
    /// SQLite database file holding persisted entries.
    pub db_path: PathBuf,
    /// Directory of `<name>.json` resources; `None` uses the bundled ones.
    pub asset_dir: Option<PathBuf>,
    /// Resource decoded into the initial list.
    pub asset_name: String,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            asset_dir: None,
            asset_name: SAMPLE_ASSET_NAME.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}
