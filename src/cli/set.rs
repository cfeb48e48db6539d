// src/cli/set.rs
use crate::settings::{default_settings, SettingsResult, SettingsStore, WATCHED_SETTINGS};
use std::path::Path;

pub fn run(db_path: &Path, name: &str, value: &str) -> SettingsResult<()> {
    let mut store = SettingsStore::open(db_path)?;
    let mut settings = store.load(&default_settings())?;

    let parsed = settings.parse_value(name, value)?;
    if settings.set(name, parsed)? {
        store.mark_dirty();
        store.flush(&settings, WATCHED_SETTINGS)?;
        println!("{} = {}", name, parsed);
    } else {
        println!("{} already {}", name, parsed);
    }
    store.checkpoint()
}
