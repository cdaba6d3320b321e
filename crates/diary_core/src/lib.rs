//! Diary core: entry model, sample data, local storage and list state.

pub mod asset;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use asset::{
    AssetError, AssetLoader, AssetResult, AssetSource, BundledAssets, DirectoryAssets,
    SAMPLE_ASSET_NAME,
};
pub use config::{DiaryConfig, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::entry::{Entry, PersistedEntry};
pub use repo::entry_repo::{EntryStore, RepoError, RepoResult, SqliteEntryRepository};
pub use service::list_presenter::{EntryCreationFlow, EntryListPresenter, EntryRow, LIST_TITLE};
pub use service::record_mapper::map_entries;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
