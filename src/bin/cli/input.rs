//! Collection of archive inputs from arguments and standard input.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use jndi_strip::InputReference;
use serde_json::Value;

/// Fields that carry a path in streamed records, in order of preference.
const PATH_FIELDS: &[&str] = &["FullName", "fullName", "full_name", "Path", "path", "PSPath"];

/// Builds the input list: arguments first, then records from `stdin`.
pub fn collect_inputs(
    paths: &[PathBuf],
    stdin: Option<&mut dyn BufRead>,
) -> std::io::Result<Vec<InputReference>> {
    let mut inputs: Vec<InputReference> = paths.iter().flat_map(|p| expand(p)).collect();

    if let Some(reader) = stdin {
        for line in reader.lines() {
            let line = line?;
            for path in parse_record(&line) {
                inputs.extend(expand(&path));
            }
        }
    }

    Ok(inputs)
}

/// Expands glob patterns; anything that is not a pattern, or matches
/// nothing, is passed through unchanged so it is reported as unresolved.
fn expand(path: &Path) -> Vec<InputReference> {
    let text = path.to_string_lossy();
    if !text.contains(['*', '?', '[']) {
        return vec![InputReference::new(path)];
    }

    match glob::glob(&text) {
        Ok(matches) => {
            let found: Vec<_> = matches
                .filter_map(|m| match m {
                    Ok(p) => Some(InputReference::new(p)),
                    Err(e) => {
                        eprintln!("Warning: {}", e);
                        None
                    }
                })
                .collect();
            if found.is_empty() {
                vec![InputReference::new(path)]
            } else {
                found
            }
        }
        Err(_) => vec![InputReference::new(path)],
    }
}

/// Extracts the paths carried by one line of input.
///
/// A line is either a bare path or JSON: a string, an object with a path
/// field, or an array of those. Blank lines carry nothing.
pub fn parse_record(line: &str) -> Vec<PathBuf> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    if line.starts_with('{') || line.starts_with('[') || line.starts_with('"') {
        if let Ok(value) = serde_json::from_str::<Value>(line) {
            return paths_from_value(&value);
        }
    }
    vec![PathBuf::from(line)]
}

fn paths_from_value(value: &Value) -> Vec<PathBuf> {
    match value {
        Value::String(s) => vec![PathBuf::from(strip_provider(s))],
        Value::Array(items) => items.iter().flat_map(paths_from_value).collect(),
        Value::Object(map) => PATH_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(|s| vec![PathBuf::from(strip_provider(s))])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Removes a PowerShell provider prefix such as
/// `Microsoft.PowerShell.Core\FileSystem::`.
fn strip_provider(s: &str) -> &str {
    match s.find("::") {
        Some(pos) => &s[pos + 2..],
        None => s,
    }
}
