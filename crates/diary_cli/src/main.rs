//! Terminal front end for the diary list.
//!
//! # Responsibility
//! - Build a `DiaryConfig` from command-line flags.
//! - Drive the list presenter the way the list screen does: seed once,
//!   then refresh from storage, and print every row.

use diary_core::db::open_db;
use diary_core::{
    core_version, init_logging, ping, AssetLoader, AssetSource, BundledAssets, DiaryConfig,
    DirectoryAssets, Entry, EntryCreationFlow, EntryListPresenter, EntryRow, EntryStore,
    PersistedEntry, SqliteEntryRepository,
};
use clap::Parser;
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

const BODY_PREVIEW_CHARS: usize = 48;

/// Entry to write before listing, given by `--add-title`/`--add-body`.
struct NewEntryRequest {
    title: String,
    body: String,
}

/// Writes one entry straight into storage, standing in for the form screen.
struct StoreEntryForm<'a, S: EntryStore> {
    store: &'a S,
    request: NewEntryRequest,
    written: bool,
}

impl<S: EntryStore> EntryCreationFlow for StoreEntryForm<'_, S> {
    fn begin(&mut self) {
        let created_at = unix_now_secs();
        let entry = Entry::new(
            self.request.title.as_str(),
            self.request.body.as_str(),
            created_at,
        );
        match self.store.insert(&PersistedEntry::from(&entry)) {
            Ok(()) => self.written = true,
            Err(err) => {
                warn!("event=entry_create module=cli status=error error={err}");
                eprintln!("could not save entry: {err}");
            }
        }
    }
}

fn unix_now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| secs_to_timestamp(elapsed.as_secs()))
}

/// Saturates at `i64::MAX` instead of wrapping.
fn secs_to_timestamp(secs: u64) -> i64 {
    i64::try_from(secs).unwrap_or(i64::MAX)
}

/// One printed line of the list.
#[derive(Default)]
struct TextRow {
    line: String,
}

impl EntryRow for TextRow {
    fn configure(&mut self, entry: &Entry) {
        let first_line = entry.body.lines().next().unwrap_or_default();
        let mut preview: String = first_line.chars().take(BODY_PREVIEW_CHARS).collect();
        if first_line.chars().count() > BODY_PREVIEW_CHARS {
            preview.push_str("...");
        }
        self.line = format!("{:>12}  {}  | {}", entry.created_at, entry.title, preview);
    }
}

#[derive(Parser)]
#[command(author, version, about = "Lists diary entries", long_about = None)]
struct Cli {
    /// SQLite database file.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
    /// Directory of `<name>.json` sample files; bundled samples when omitted.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,
    /// Sample resource to load.
    #[arg(long, value_name = "NAME")]
    asset_name: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Save a new entry with this title before listing.
    #[arg(long, value_name = "TITLE")]
    add_title: Option<String>,
    /// Body of the new entry.
    #[arg(long, value_name = "BODY", requires = "add_title")]
    add_body: Option<String>,
}

impl Cli {
    fn into_parts(self) -> (DiaryConfig, Option<NewEntryRequest>) {
        let mut config = DiaryConfig::default();
        if let Some(path) = self.db {
            config.db_path = path;
        }
        config.asset_dir = self.assets;
        if let Some(name) = self.asset_name {
            config.asset_name = name;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.log_dir = self.log_dir;

        let body = self.add_body.unwrap_or_default();
        let new_entry = self
            .add_title
            .map(|title| NewEntryRequest { title, body });
        (config, new_entry)
    }
}

fn main() -> ExitCode {
    let (config, new_entry) = Cli::parse().into_parts();

    println!("diary_core ping={} version={}", ping(), core_version());

    let result = match config.asset_dir.clone() {
        Some(dir) => run(&config, DirectoryAssets::new(dir), new_entry),
        None => run(&config, BundledAssets, new_entry),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run<A: AssetSource>(
    config: &DiaryConfig,
    assets: A,
    new_entry: Option<NewEntryRequest>,
) -> Result<(), String> {
    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log dir `{}` is not UTF-8", log_dir.display()))?;
        init_logging(&config.log_level, log_dir).map_err(|err| err.to_string())?;
    }

    let conn = open_db(&config.db_path).map_err(|err| {
        format!(
            "failed to open diary database `{}`: {err}",
            config.db_path.display()
        )
    })?;
    let repo = SqliteEntryRepository::try_new(&conn).map_err(|err| err.to_string())?;

    let mut presenter = EntryListPresenter::new(
        &repo,
        AssetLoader::with_name(assets, config.asset_name.as_str()),
    );
    presenter.initialize();
    print_list(&presenter, "sample");

    if let Some(request) = new_entry {
        let mut form = StoreEntryForm {
            store: &repo,
            request,
            written: false,
        };
        presenter.request_new_entry(&mut form);
        if form.written {
            println!("saved new entry");
        }
    }

    if presenter.refresh() {
        print_list(&presenter, "stored");
    } else {
        println!("storage unavailable; still showing previous list");
    }
    Ok(())
}

fn print_list<S: EntryStore, A: AssetSource>(presenter: &EntryListPresenter<S, A>, source: &str) {
    println!("== {} ({source}, {} entries)", presenter.title(), presenter.count());
    let mut row = TextRow::default();
    for index in 0..presenter.count() {
        presenter.configure_row(index, &mut row);
        println!("{}", row.line);
    }
}
