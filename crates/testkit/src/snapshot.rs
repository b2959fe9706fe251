//! Golden files for layouts and frame logs.
//!
//! Two formats are stored, both with object keys sorted:
//! - `.json`: one pretty-printed value, used for solved layouts;
//! - `.jsonl`: one compact record per line, used for per-frame scene logs so
//!   a mismatch can be reported by frame.
//!
//! Rerun with `XR_PANELS_UPDATE_SNAPSHOTS=1` to rewrite goldens.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "XR_PANELS_UPDATE_SNAPSHOTS";

/// Assert that `value` matches the pretty JSON golden at `path`.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let actual = canonical_json(value)?;
    check_golden(path.as_ref(), &actual)
}

/// Assert that `records` match the JSONL golden at `path`, one line each.
pub fn assert_jsonl_snapshot<P: AsRef<Path>, T: Serialize>(path: P, records: &[T]) -> Result<()> {
    let actual = canonical_jsonl(records)?;
    check_golden(path.as_ref(), &actual)
}

/// Serialize `value` the way `.json` goldens are stored.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let mut s = serde_json::to_string_pretty(&sorted(value)?)
        .context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

/// Serialize `records` the way `.jsonl` goldens are stored.
pub fn canonical_jsonl<T: Serialize>(records: &[T]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(&sorted(record)?).context("Failed to format record")?);
        out.push('\n');
    }
    Ok(out)
}

fn sorted<T: Serialize>(value: &T) -> Result<Value> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    Ok(sort_keys(value))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn check_golden(path: &Path, actual: &str) -> Result<()> {
    if update_requested() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return fs::write(path, actual)
            .with_context(|| format!("Failed to write snapshot {}", path.display()));
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {UPDATE_SNAPSHOTS_ENV}=1 to create it)",
            path.display()
        )
    })?;
    if expected == actual {
        return Ok(());
    }

    match first_differing_line(&expected, actual) {
        Some((line, want, got)) => anyhow::bail!(
            "Snapshot mismatch at {} line {} (run with {UPDATE_SNAPSHOTS_ENV}=1 to update)\n\
             --- expected\n{want}\n--- actual\n{got}",
            path.display(),
            line + 1,
        ),
        None => anyhow::bail!(
            "Snapshot mismatch at {} (line endings differ)",
            path.display()
        ),
    }
}

/// Zero-based index and contents of the first line that differs.
fn first_differing_line<'a>(expected: &'a str, actual: &'a str) -> Option<(usize, &'a str, &'a str)> {
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut index = 0;
    loop {
        match (want.next(), got.next()) {
            (None, None) => return None,
            (w, g) if w != g => {
                return Some((index, w.unwrap_or("<end of file>"), g.unwrap_or("<end of file>")))
            }
            _ => index += 1,
        }
    }
}

fn update_requested() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1" | "true" | "yes")
    )
}
