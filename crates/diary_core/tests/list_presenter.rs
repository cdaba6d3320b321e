use diary_core::db::open_db_in_memory;
use diary_core::{
    AssetLoader, BundledAssets, DirectoryAssets, Entry, EntryListPresenter, EntryStore,
    PersistedEntry, SqliteEntryRepository,
};
use std::fs;
use std::path::Path;

fn write_sample(dir: &Path, json: &str) {
    fs::write(dir.join("sample.json"), json).unwrap();
}

#[test]
fn initialize_decodes_sample_from_directory() {
    let assets = tempfile::tempdir().unwrap();
    write_sample(
        assets.path(),
        r#"[{"title":"T1","body":"B1","created_at":1}]"#,
    );
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut presenter =
        EntryListPresenter::new(&repo, AssetLoader::new(DirectoryAssets::new(assets.path())));
    presenter.initialize();

    assert_eq!(presenter.count(), 1);
    assert_eq!(presenter.entry_at(0), &Entry::new("T1", "B1", 1));
}

#[test]
fn missing_sample_file_yields_empty_list() {
    let assets = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut presenter =
        EntryListPresenter::new(&repo, AssetLoader::new(DirectoryAssets::new(assets.path())));
    presenter.initialize();

    assert_eq!(presenter.count(), 0);
}

#[test]
fn malformed_sample_keeps_previous_list() {
    let assets = tempfile::tempdir().unwrap();
    write_sample(assets.path(), r#"[{"title":"T1","body":"B1""#);
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    repo.insert(&PersistedEntry::from(&Entry::new("kept", "row", 3)))
        .unwrap();

    let mut presenter =
        EntryListPresenter::new(&repo, AssetLoader::new(DirectoryAssets::new(assets.path())));
    assert!(presenter.refresh());
    presenter.initialize();

    assert_eq!(presenter.entries(), &[Entry::new("kept", "row", 3)]);
}

#[test]
fn refresh_replaces_sample_with_stored_entries() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    repo.insert(&PersistedEntry {
        title: Some("A".to_string()),
        body: Some("B".to_string()),
        created_date: Some("abc".to_string()),
    })
    .unwrap();
    repo.insert(&PersistedEntry {
        title: Some("A".to_string()),
        body: Some("B".to_string()),
        created_date: Some("100".to_string()),
    })
    .unwrap();

    let mut presenter = EntryListPresenter::new(&repo, AssetLoader::new(BundledAssets));
    presenter.initialize();
    assert!(presenter.count() > 0);

    assert!(presenter.refresh());
    assert_eq!(presenter.entries(), &[Entry::new("A", "B", 100)]);
}

#[test]
fn refresh_on_empty_store_empties_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut presenter = EntryListPresenter::new(&repo, AssetLoader::new(BundledAssets));
    presenter.initialize();
    presenter.refresh();

    assert_eq!(presenter.count(), 0);
}

#[test]
fn refresh_failure_keeps_sample_entries() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut presenter = EntryListPresenter::new(&repo, AssetLoader::new(BundledAssets));
    presenter.initialize();
    let before = presenter.entries().to_vec();

    conn.execute_batch("DROP TABLE entries;").unwrap();
    assert!(!presenter.refresh());
    assert_eq!(presenter.entries(), before.as_slice());
}

#[test]
fn refresh_drops_unreadable_rows_and_keeps_valid_ones() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO entries (title, body, created_date) VALUES ('good', 'row', '1');
         INSERT INTO entries (title, body, created_date) VALUES ('blob', 'date', x'3132');
         INSERT INTO entries (title, body, created_date) VALUES (CAST(x'ff' AS TEXT), 'b', '2');",
    )
    .unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut presenter = EntryListPresenter::new(&repo, AssetLoader::new(BundledAssets));
    presenter.initialize();

    assert!(presenter.refresh());
    assert_eq!(presenter.entries(), &[Entry::new("good", "row", 1)]);
}
