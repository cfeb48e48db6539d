// src/settings/connection.rs

use super::error::SettingsResult;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Opens (creating if needed) the settings database with WAL journaling.
pub fn open_settings_db(path: &Path) -> SettingsResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;

    // PRAGMA settings are per connection; set them on every open.
    let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
    if journal_mode.to_uppercase() != "WAL" {
        bevy::log::warn!(
            "Settings: failed to set WAL mode on {:?}. Current mode: {}",
            path.file_name(),
            journal_mode
        );
    } else {
        bevy::log::debug!("Settings: WAL mode active for {:?}", path.file_name());
    }

    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(Duration::from_millis(5000))?;

    Ok(conn)
}

/// Forces pending WAL pages into the main database file. Run at shutdown.
pub fn checkpoint(conn: &Connection) -> SettingsResult<()> {
    // Returns (busy, log frames, checkpointed frames); only success matters here.
    conn.query_row("PRAGMA wal_checkpoint(RESTART)", [], |_| Ok(()))?;
    bevy::log::debug!("Settings: WAL checkpoint completed");
    Ok(())
}
