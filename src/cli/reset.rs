// src/cli/reset.rs
use crate::settings::{SettingsResult, SettingsStore};
use std::path::Path;

pub fn run(db_path: &Path) -> SettingsResult<()> {
    let mut store = SettingsStore::open(db_path)?;
    let removed = store.clear()?;
    println!("Removed {} saved settings from {}", removed, db_path.display());
    store.checkpoint()
}
