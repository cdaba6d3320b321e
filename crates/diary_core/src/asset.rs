//! Bundled sample data.
//!
//! # Responsibility
//! - Locate named JSON resources shipped with the application.
//! - Decode the sample resource into `Entry` values once, at startup.
//!
//! # Invariants
//! - An absent resource decodes to an empty list, never an error.
//! - A present resource decodes completely or not at all.

use crate::model::entry::Entry;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

/// Name of the sample resource shown before anything is persisted.
pub const SAMPLE_ASSET_NAME: &str = "sample";

const BUNDLED: &[(&str, &[u8])] = &[(SAMPLE_ASSET_NAME, include_bytes!("../assets/sample.json"))];

pub type AssetResult<T> = Result<T, AssetError>;

/// Failure while reading or decoding a resource.
#[derive(Debug)]
pub enum AssetError {
    Io { name: String, source: io::Error },
    Decode { name: String, source: serde_json::Error },
}

impl Display for AssetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { name, source } => write!(f, "failed to read asset `{name}`: {source}"),
            Self::Decode { name, source } => write!(f, "failed to decode asset `{name}`: {source}"),
        }
    }
}

impl Error for AssetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Somewhere named resources can be read from.
pub trait AssetSource {
    /// Returns the raw bytes of `name`, or `Ok(None)` when it does not exist.
    fn read_asset(&self, name: &str) -> AssetResult<Option<Vec<u8>>>;
}

impl<A: AssetSource + ?Sized> AssetSource for &A {
    fn read_asset(&self, name: &str) -> AssetResult<Option<Vec<u8>>> {
        (**self).read_asset(name)
    }
}

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl AssetSource for BundledAssets {
    fn read_asset(&self, name: &str) -> AssetResult<Option<Vec<u8>>> {
        Ok(BUNDLED
            .iter()
            .find(|(bundled_name, _)| *bundled_name == name)
            .map(|(_, bytes)| bytes.to_vec()))
    }
}

/// Resources stored as `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    dir: PathBuf,
}

impl DirectoryAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl AssetSource for DirectoryAssets {
    fn read_asset(&self, name: &str) -> AssetResult<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AssetError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}

/// Decodes one named resource into entries.
pub struct AssetLoader<A: AssetSource> {
    source: A,
    name: String,
}

impl<A: AssetSource> AssetLoader<A> {
    /// Loader for the default sample resource.
    pub fn new(source: A) -> Self {
        Self::with_name(source, SAMPLE_ASSET_NAME)
    }

    pub fn with_name(source: A, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads and decodes the resource.
    ///
    /// # Errors
    /// - `AssetError::Io` when the resource exists but cannot be read.
    /// - `AssetError::Decode` for malformed JSON or a missing/invalid field.
    pub fn load(&self) -> AssetResult<Vec<Entry>> {
        let Some(bytes) = self.source.read_asset(&self.name)? else {
            info!(
                "event=asset_load module=asset status=missing name={}",
                self.name
            );
            return Ok(Vec::new());
        };

        let entries: Vec<Entry> =
            serde_json::from_slice(&bytes).map_err(|source| AssetError::Decode {
                name: self.name.clone(),
                source,
            })?;
        debug!(
            "event=asset_load module=asset status=ok name={} count={}",
            self.name,
            entries.len()
        );
        Ok(entries)
    }
}
