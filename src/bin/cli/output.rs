//! Output formatting for CLI operations.

use jndi_strip::{ResultRecord, ScanRecord};
use serde_json::json;

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats the records of a removal run
    fn format_records(&self, records: &[ResultRecord]) -> String;

    /// Formats scan results
    fn format_scan(&self, records: &[ScanRecord]) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl HumanFormatter {
    fn table(rows: impl IntoIterator<Item = (String, String)> + Clone) -> String {
        let width = rows
            .clone()
            .into_iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0)
            .max("FullName".len());

        let mut output = String::new();
        output.push_str(&format!("{:<width$}  {}\n", "FullName", "Result"));
        output.push_str(&format!("{:<width$}  {}\n", "--------", "------"));
        for (name, result) in rows {
            output.push_str(&format!("{:<width$}  {}\n", name, result));
        }
        output
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_records(&self, records: &[ResultRecord]) -> String {
        if records.is_empty() {
            return "No archives processed\n".to_string();
        }
        let rows: Vec<_> = records
            .iter()
            .map(|r| (r.full_name.display().to_string(), r.result.to_string()))
            .collect();
        Self::table(rows)
    }

    fn format_scan(&self, records: &[ScanRecord]) -> String {
        if records.is_empty() {
            return "No archives scanned\n".to_string();
        }
        let mut rows = Vec::new();
        let mut affected = 0;
        for record in records {
            let name = record.full_name.display().to_string();
            match &record.report {
                Ok(report) if report.is_affected() => {
                    affected += 1;
                    for entry in &report.matches {
                        rows.push((name.clone(), format!("{} found", entry.full_name)));
                    }
                }
                Ok(report) => rows.push((
                    name,
                    format!("clean ({} entries)", report.entry_count),
                )),
                Err(outcome) => rows.push((name, outcome.to_string())),
            }
        }

        let mut output = Self::table(rows);
        output.push_str(&format!(
            "\n{} of {} archives affected\n",
            affected,
            records.len()
        ));
        output
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_records(&self, records: &[ResultRecord]) -> String {
        let items: Vec<_> = records
            .iter()
            .map(|r| {
                json!({
                    "FullName": r.full_name.display().to_string(),
                    "Result": r.result.to_string(),
                    "kind": r.result.kind(),
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string()) + "\n"
    }

    fn format_scan(&self, records: &[ScanRecord]) -> String {
        let items: Vec<_> = records
            .iter()
            .map(|r| match &r.report {
                Ok(report) => json!({
                    "FullName": r.full_name.display().to_string(),
                    "affected": report.is_affected(),
                    "entry_count": report.entry_count,
                    "matches": report.matches.iter().map(|e| e.full_name.as_str()).collect::<Vec<_>>(),
                }),
                Err(outcome) => json!({
                    "FullName": r.full_name.display().to_string(),
                    "error": outcome.to_string(),
                    "kind": outcome.kind(),
                }),
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string()) + "\n"
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}
