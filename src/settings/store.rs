// src/settings/store.rs
//! Durable settings store.
//!
//! Writes are deferred: mutators only call [`SettingsStore::mark_dirty`], and
//! rows reach SQLite when [`SettingsStore::flush`] runs (overlay close, app
//! exit). The dirty flag is cleared at the start of a flush, before the
//! transaction commits, so a failed commit loses that save cycle instead of
//! retrying it on every later flush.

use super::connection;
use super::error::SettingsResult;
use super::sql::{self, ColumnDef};
use super::table::Settings;
use bevy::log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::path::Path;

/// Layout of the key-value table backing the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub key_column: &'static str,
    pub value_column: &'static str,
}

/// `Settings(Name TEXT PRIMARY KEY, Value INTEGER)`
pub const SETTINGS_TABLE: TableSpec = TableSpec {
    name: "Settings",
    key_column: "Name",
    value_column: "Value",
};

pub struct SettingsStore {
    conn: Connection,
    table: TableSpec,
    create_sql: String,
    upsert_sql: String,
    select_sql: String,
    has_unsaved_changes: bool,
}

impl SettingsStore {
    pub fn open(path: &Path) -> SettingsResult<Self> {
        let conn = connection::open_settings_db(path)?;
        info!("Settings: opened store at {:?}", path);
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> SettingsResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> SettingsResult<Self> {
        Self::with_table(conn, SETTINGS_TABLE)
    }

    /// Fails with `InvalidSchema`/`InvalidUpsert` when `table` is malformed.
    pub fn with_table(conn: Connection, table: TableSpec) -> SettingsResult<Self> {
        let create_sql = sql::build_create_table_sql(
            table.name,
            &[
                ColumnDef { name: table.key_column, sql_type: "TEXT", primary_key: true },
                ColumnDef { name: table.value_column, sql_type: "INTEGER", primary_key: false },
            ],
        )?;
        let upsert_sql = sql::build_upsert_sql(table.name, table.key_column, &[table.value_column])?;
        let select_sql = sql::build_select_sql(table.name, &[table.key_column, table.value_column]);

        Ok(Self {
            conn,
            table,
            create_sql,
            upsert_sql,
            select_sql,
            has_unsaved_changes: false,
        })
    }

    #[cfg(test)]
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn mark_dirty(&mut self) {
        self.has_unsaved_changes = true;
    }

    fn ensure_table(&self) -> SettingsResult<()> {
        self.conn.execute(&self.create_sql, [])?;
        Ok(())
    }

    /// Overlay persisted rows onto `defaults`.
    ///
    /// Rows for names missing from `defaults`, and rows whose value cannot be
    /// read as the default's kind, are skipped.
    pub fn load(&mut self, defaults: &Settings) -> SettingsResult<Settings> {
        self.ensure_table()?;

        let mut merged = defaults.clone();
        let mut applied = 0usize;
        for (name, raw) in self.persisted_rows()? {
            let Some(default) = defaults.get(&name) else {
                debug!("Settings: ignoring unknown persisted setting '{}'", name);
                continue;
            };
            match default.coerce_stored(&raw) {
                Some(value) => {
                    merged.insert_coerced(&name, value);
                    applied += 1;
                }
                None => {
                    debug!(
                        "Settings: keeping default for '{}', persisted value {:?} is not a {}",
                        name,
                        raw,
                        default.kind()
                    );
                }
            }
        }

        info!("Settings: loaded {} persisted of {} settings", applied, defaults.len());
        Ok(merged)
    }

    /// Persist every watched name held by `settings` in one transaction.
    /// Returns the number of rows written; 0 when there was nothing to save.
    pub fn flush(&mut self, settings: &Settings, watched: &[&str]) -> SettingsResult<usize> {
        if !self.has_unsaved_changes {
            return Ok(0);
        }
        self.has_unsaved_changes = false;

        self.ensure_table()?;
        let tx = self.conn.transaction()?;
        let mut written = 0usize;
        {
            let mut stmt = tx.prepare_cached(&self.upsert_sql)?;
            for name in watched {
                match settings.get(name) {
                    Some(value) => {
                        stmt.execute(params![name, value])?;
                        written += 1;
                    }
                    None => warn!("Settings: watched setting '{}' has no value, not saved", name),
                }
            }
        }
        tx.commit()?;

        debug!("Settings: flushed {} rows to {}", written, self.table.name);
        Ok(written)
    }

    /// Raw persisted rows, in table order.
    pub fn persisted_rows(&self) -> SettingsResult<Vec<(String, Value)>> {
        self.ensure_table()?;
        let mut stmt = self.conn.prepare(&self.select_sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, Value>(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            match row {
                Ok(pair) => out.push(pair),
                // A non-text key cannot match any setting name.
                Err(e) => debug!("Settings: skipping unreadable row: {}", e),
            }
        }
        Ok(out)
    }

    /// Delete every persisted row. The in-memory state is not touched.
    pub fn clear(&mut self) -> SettingsResult<usize> {
        self.ensure_table()?;
        let removed = self.conn.execute(&sql::build_delete_all_sql(self.table.name), [])?;
        self.has_unsaved_changes = false;
        info!("Settings: removed {} persisted rows", removed);
        Ok(removed)
    }

    pub fn checkpoint(&self) -> SettingsResult<()> {
        connection::checkpoint(&self.conn)
    }
}
