//! List screen state.
//!
//! # Responsibility
//! - Hold the ordered entries the list screen displays.
//! - Seed them from the sample asset once, then replace them from storage
//!   every time the screen becomes visible.
//! - Hand entries to renderable rows and forward the "new entry" request.
//!
//! # Invariants
//! - Every failure leaves the current list untouched.
//! - Sample entries are never merged with stored entries.

use crate::asset::{AssetLoader, AssetSource};
use crate::model::entry::Entry;
use crate::repo::entry_repo::EntryStore;
use crate::service::record_mapper::map_entries;
use log::{error, info, warn};

/// Navigation title of the list screen ("diary" in Korean).
pub const LIST_TITLE: &str = "일기장";

/// A presentation-layer row that can display one entry.
pub trait EntryRow {
    fn configure(&mut self, entry: &Entry);
}

/// External flow that creates a new entry (usually a form screen).
///
/// New entries reach the list only through storage and the next `refresh`.
pub trait EntryCreationFlow {
    fn begin(&mut self);
}

/// Presenter behind the diary list screen.
pub struct EntryListPresenter<S: EntryStore, A: AssetSource> {
    store: S,
    assets: AssetLoader<A>,
    entries: Vec<Entry>,
}

impl<S: EntryStore, A: AssetSource> EntryListPresenter<S, A> {
    /// Creates a presenter with an empty list.
    pub fn new(store: S, assets: AssetLoader<A>) -> Self {
        Self {
            store,
            assets,
            entries: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        LIST_TITLE
    }

    /// Loads the sample asset into the list.
    ///
    /// A missing asset yields an empty list. A malformed one is logged and
    /// the current list is kept.
    pub fn initialize(&mut self) {
        match self.assets.load() {
            Ok(entries) => {
                info!(
                    "event=list_initialize module=service status=ok asset={} count={}",
                    self.assets.name(),
                    entries.len()
                );
                self.entries = entries;
            }
            Err(err) => {
                error!(
                    "event=list_initialize module=service status=error asset={} error={}",
                    self.assets.name(),
                    err
                );
            }
        }
    }

    /// Replaces the list with the current storage contents.
    ///
    /// Returns `false` and keeps the current list when storage cannot be read.
    pub fn refresh(&mut self) -> bool {
        match self.store.read_all() {
            Ok(records) => {
                self.entries = map_entries(&records);
                info!(
                    "event=list_refresh module=service status=ok rows={} count={}",
                    records.len(),
                    self.entries.len()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=list_refresh module=service status=error kept={} error={}",
                    self.entries.len(),
                    err
                );
                false
            }
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entry at `index`.
    ///
    /// # Panics
    /// Panics when `index >= self.count()`.
    pub fn entry_at(&self, index: usize) -> &Entry {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Configures `row` with the entry at `index`.
    ///
    /// # Panics
    /// Panics when `index >= self.count()`.
    pub fn configure_row<R: EntryRow + ?Sized>(&self, index: usize, row: &mut R) {
        row.configure(self.entry_at(index));
    }

    /// Forwards the user's "new entry" request to `flow`.
    pub fn request_new_entry<F: EntryCreationFlow + ?Sized>(&self, flow: &mut F) {
        info!("event=entry_create_requested module=service status=start");
        flow.begin();
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryCreationFlow, EntryListPresenter, EntryRow};
    use crate::asset::{AssetLoader, AssetResult, AssetSource};
    use crate::model::entry::{Entry, PersistedEntry};
    use crate::repo::entry_repo::{EntryStore, RepoError, RepoResult};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MemoryStore {
        rows: RefCell<Vec<PersistedEntry>>,
        failing: Cell<bool>,
    }

    impl EntryStore for MemoryStore {
        fn read_all(&self) -> RepoResult<Vec<PersistedEntry>> {
            if self.failing.get() {
                return Err(RepoError::SchemaNotReady {
                    found: 0,
                    expected: 1,
                });
            }
            Ok(self.rows.borrow().clone())
        }

        fn insert(&self, entry: &PersistedEntry) -> RepoResult<()> {
            self.rows.borrow_mut().push(entry.clone());
            Ok(())
        }

        fn count(&self) -> RepoResult<u64> {
            Ok(self.rows.borrow().len() as u64)
        }
    }

    struct Inline(Option<&'static str>);

    impl AssetSource for Inline {
        fn read_asset(&self, _name: &str) -> AssetResult<Option<Vec<u8>>> {
            Ok(self.0.map(|json| json.as_bytes().to_vec()))
        }
    }

    fn presenter(
        asset: Option<&'static str>,
    ) -> EntryListPresenter<MemoryStore, Inline> {
        EntryListPresenter::new(MemoryStore::default(), AssetLoader::new(Inline(asset)))
    }

    #[test]
    fn initialize_loads_sample_entries() {
        let mut presenter = presenter(Some(r#"[{"title":"T1","body":"B1","created_at":1}]"#));
        presenter.initialize();

        assert_eq!(presenter.count(), 1);
        assert_eq!(presenter.entry_at(0), &Entry::new("T1", "B1", 1));
    }

    #[test]
    fn initialize_without_asset_is_empty() {
        let mut presenter = presenter(None);
        presenter.initialize();
        assert_eq!(presenter.count(), 0);
    }

    #[test]
    fn refresh_over_empty_store_clears_sample_entries() {
        let mut presenter = presenter(Some(r#"[{"title":"T1","body":"B1","created_at":1}]"#));
        presenter.initialize();

        assert!(presenter.refresh());
        assert_eq!(presenter.count(), 0);
    }

    #[test]
    fn refresh_failure_keeps_current_list() {
        let mut presenter = presenter(Some(
            r#"[{"title":"T1","body":"B1","created_at":1},{"title":"T2","body":"B2","created_at":2}]"#,
        ));
        presenter.initialize();
        let before = presenter.entries().to_vec();

        presenter.store().failing.set(true);
        assert!(!presenter.refresh());
        assert_eq!(presenter.count(), before.len());
        for (index, entry) in before.iter().enumerate() {
            assert_eq!(presenter.entry_at(index), entry);
        }
    }

    #[test]
    fn refresh_picks_up_new_rows() {
        let mut presenter = presenter(None);
        presenter.initialize();
        presenter
            .store()
            .insert(&PersistedEntry::from(&Entry::new("new", "entry", 42)))
            .unwrap();

        presenter.refresh();
        assert_eq!(presenter.entries(), &[Entry::new("new", "entry", 42)]);
    }

    #[test]
    #[should_panic]
    fn entry_at_out_of_range_panics() {
        let presenter = presenter(None);
        let _ = presenter.entry_at(0);
    }

    #[test]
    fn configure_row_and_new_entry_request_delegate() {
        struct Row(Option<String>);
        impl EntryRow for Row {
            fn configure(&mut self, entry: &Entry) {
                self.0 = Some(entry.title.clone());
            }
        }
        struct Flow(u32);
        impl EntryCreationFlow for Flow {
            fn begin(&mut self) {
                self.0 += 1;
            }
        }

        let mut presenter = presenter(Some(r#"[{"title":"T1","body":"B1","created_at":1}]"#));
        presenter.initialize();

        let mut row = Row(None);
        presenter.configure_row(0, &mut row);
        assert_eq!(row.0.as_deref(), Some("T1"));

        let mut flow = Flow(0);
        presenter.request_new_entry(&mut flow);
        assert_eq!(flow.0, 1);
        assert_eq!(presenter.title(), "일기장");
    }
}
