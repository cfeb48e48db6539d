// src/cli/show.rs
use crate::settings::{default_settings, SettingsResult, SettingsStore};
use rusqlite::types::Value;
use std::collections::HashMap;
use std::path::Path;

pub fn run(db_path: &Path, json: bool) -> SettingsResult<()> {
    let mut store = SettingsStore::open(db_path)?;
    let settings = store.load(&default_settings())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let persisted: HashMap<String, Value> = store.persisted_rows()?.into_iter().collect();

    println!("Settings in {}\n", db_path.display());
    println!("{:<22} {:<8} {:<8} {}", "Name", "Type", "Value", "Stored");
    println!("{}", "-".repeat(52));
    for (name, value) in settings.iter() {
        let stored = match persisted.get(name) {
            Some(Value::Integer(i)) => i.to_string(),
            Some(Value::Null) => "NULL".to_string(),
            Some(other) => format!("{:?}", other),
            None => "-".to_string(),
        };
        println!("{:<22} {:<8} {:<8} {}", name, value.kind(), value, stored);
    }

    let unknown: Vec<&String> = persisted.keys().filter(|k| !settings.contains(k)).collect();
    if !unknown.is_empty() {
        println!("\nIgnored rows: {}", unknown.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "));
    }

    Ok(())
}
