// tests/no_direct_settings_writes.rs
// Fails if runtime code outside the settings store issues SQLite writes, or
// splices values into SQL text instead of binding them.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// The store owns the table; connection setup runs PRAGMAs.
fn may_write(path: &Path) -> bool {
    let p = normalized(path);
    p.ends_with("/settings/store.rs") || p.ends_with("/settings/connection.rs")
}

/// Strip the trailing `#[cfg(test)]` module so tests can seed rows directly.
fn runtime_part(content: &str) -> &str {
    match content.find("#[cfg(test)]") {
        Some(idx) => &content[..idx],
        None => content,
    }
}

fn src_files() -> Vec<PathBuf> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let src_dir = Path::new(manifest_dir).join("src");
    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {:?}", src_dir);
    files
}

#[test]
fn no_direct_settings_writes_in_runtime() {
    let bad_patterns = [
        "conn.execute(",
        ".execute_batch(",
        "stmt.execute(",
        "tx.execute(",
        "Transaction::execute(",
    ];

    let mut offenders: Vec<(String, String)> = Vec::new();
    for file in src_files() {
        if may_write(&file) {
            continue;
        }
        let Ok(content) = fs::read_to_string(&file) else { continue };
        let runtime = runtime_part(&content);
        for pat in &bad_patterns {
            if runtime.contains(pat) {
                offenders.push((normalized(&file), pat.to_string()));
            }
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::from("Direct SQLite writes found outside the settings store:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!("  {} contains pattern '{}': go through SettingsStore instead\n", file, pat));
        }
        panic!("{}", msg);
    }
}

fn looks_like_sql(line: &str) -> bool {
    ["INSERT", "UPDATE", "VALUES", "WHERE", "DELETE"]
        .iter()
        .any(|kw| line.contains(kw))
}

#[test]
fn no_values_spliced_into_sql() {
    let mut offenders = Vec::new();
    for file in src_files() {
        let Ok(content) = fs::read_to_string(&file) else { continue };
        for (i, line) in runtime_part(&content).lines().enumerate() {
            if line.contains("'{}'") && looks_like_sql(line) {
                offenders.push(format!("{}:{}", normalized(&file), i + 1));
            }
        }
    }
    assert!(
        offenders.is_empty(),
        "SQL values must be bound as parameters, found '{{}}' in: {:?}",
        offenders
    );
}
