//! Diary domain model.
//!
//! # Responsibility
//! - Define the canonical in-memory entry shape used by the list.
//! - Define the raw row shape produced by local storage.
//!
//! # Invariants
//! - An `Entry` always carries a title, a body and an integral timestamp.
//! - `PersistedEntry` is never shown directly; it is mapped first.

pub mod entry;
