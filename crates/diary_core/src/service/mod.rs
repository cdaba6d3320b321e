//! Use-case layer between storage and the list screen.
//!
//! # Responsibility
//! - Map raw storage rows into displayable entries.
//! - Own the list state the presentation layer renders.

pub mod list_presenter;
pub mod record_mapper;
