//! Storage row to entry mapping.

use crate::model::entry::{Entry, PersistedEntry};
use log::debug;

/// Maps storage rows into entries, dropping incomplete rows.
///
/// Output order follows input order; rejected rows are simply absent.
pub fn map_entries(records: &[PersistedEntry]) -> Vec<Entry> {
    let entries: Vec<Entry> = records.iter().filter_map(Entry::from_persisted).collect();

    let skipped = records.len() - entries.len();
    if skipped > 0 {
        debug!(
            "event=entries_map module=service status=filtered total={} skipped={}",
            records.len(),
            skipped
        );
    }

    entries
}
