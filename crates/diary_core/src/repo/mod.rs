//! Repository layer over local entry storage.
//!
//! # Responsibility
//! - Define the storage contract the list depends on.
//! - Keep SQL details inside the persistence boundary.

pub mod entry_repo;
