// src/settings/sql.rs
// Statement construction for the settings table. Identifiers are quoted,
// values are always bound as parameters.

use super::error::{SettingsError, SettingsResult};

/// Column of a table the store creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef<'a> {
    pub name: &'a str,
    pub sql_type: &'a str,
    pub primary_key: bool,
}

/// Quote a SQL identifier by wrapping it in double quotes.
/// Embedded double quotes are doubled so the name cannot escape the quoting.
///
/// # Example
/// ```ignore
/// assert_eq!(quote_identifier("Name"), "\"Name\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build a comma-separated list of quoted column names.
pub fn quote_column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build numbered placeholders (?1, ?2, ...).
pub fn build_placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build an idempotent CREATE TABLE statement.
///
/// Fails when the table name is blank, there are no columns, or a column
/// has a blank name.
pub fn build_create_table_sql(table: &str, columns: &[ColumnDef<'_>]) -> SettingsResult<String> {
    if table.trim().is_empty() {
        return Err(SettingsError::InvalidSchema("table name is empty".to_string()));
    }
    if columns.is_empty() {
        return Err(SettingsError::InvalidSchema(format!("table {} has no columns", table)));
    }
    let mut defs = Vec::with_capacity(columns.len());
    for col in columns {
        if col.name.trim().is_empty() {
            return Err(SettingsError::InvalidSchema(format!(
                "table {} has a column without a name",
                table
            )));
        }
        let mut def = format!("{} {}", quote_identifier(col.name), col.sql_type);
        if col.primary_key {
            def.push_str(" PRIMARY KEY");
        }
        defs.push(def);
    }
    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(table),
        defs.join(", ")
    ))
}

/// Build an insert-or-update statement keyed by `key_column`.
/// Parameter `?1` is the key, the following parameters are `value_columns` in order.
///
/// # Example
/// ```ignore
/// let sql = build_upsert_sql("Settings", "Name", &["Value"]).unwrap();
/// assert_eq!(sql, "INSERT INTO \"Settings\" (\"Name\", \"Value\") VALUES (?1, ?2) \
///     ON CONFLICT(\"Name\") DO UPDATE SET \"Value\" = excluded.\"Value\"");
/// ```
pub fn build_upsert_sql(table: &str, key_column: &str, value_columns: &[&str]) -> SettingsResult<String> {
    if table.trim().is_empty() {
        return Err(SettingsError::InvalidUpsert("table name is empty".to_string()));
    }
    if key_column.trim().is_empty() {
        return Err(SettingsError::InvalidUpsert(format!("no key column for {}", table)));
    }
    if value_columns.is_empty() {
        return Err(SettingsError::InvalidUpsert(format!("no value columns for {}", table)));
    }

    let mut all_columns = Vec::with_capacity(value_columns.len() + 1);
    all_columns.push(key_column);
    all_columns.extend_from_slice(value_columns);

    let assignments = value_columns
        .iter()
        .map(|col| {
            let quoted = quote_identifier(col);
            format!("{} = excluded.{}", quoted, quoted)
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) DO UPDATE SET {}",
        quote_identifier(table),
        quote_column_list(&all_columns),
        build_placeholders(all_columns.len()),
        quote_identifier(key_column),
        assignments
    ))
}

pub fn build_select_sql(table: &str, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {}",
        quote_column_list(columns),
        quote_identifier(table)
    )
}

pub fn build_delete_all_sql(table: &str) -> String {
    format!("DELETE FROM {}", quote_identifier(table))
}
