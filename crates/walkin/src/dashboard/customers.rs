//! Customer log search and CSV export.

use chrono::{NaiveDate, NaiveDateTime};

use crate::record::CustomerRecord;

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 6] = ["Name", "Phone", "Date", "Time", "Notes", "Added"];

/// Keep the customers whose name or phone contains `term`, ignoring case.
///
/// An empty term keeps everything. File order is preserved.
#[must_use]
pub fn filter_customers<'a>(records: &'a [CustomerRecord], term: &str) -> Vec<&'a CustomerRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record.name.to_lowercase().contains(&needle)
                || record.phone.to_lowercase().contains(&needle)
        })
        .collect()
}

/// How the "Added" column shows a creation time.
#[must_use]
pub fn format_added(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// The six display columns of a customer, in export order.
#[must_use]
pub fn row(record: &CustomerRecord) -> [String; 6] {
    [
        record.name.clone(),
        record.phone.clone(),
        record.date.to_string(),
        record.time.to_string(),
        record.notes.clone(),
        format_added(record.timestamp),
    ]
}

/// Render customers as CSV with a header row.
#[must_use]
pub fn to_csv<'a>(records: impl IntoIterator<Item = &'a CustomerRecord>) -> String {
    let mut out = String::new();
    push_line(&mut out, CSV_HEADER.iter().copied());
    for record in records {
        let cells = row(record);
        push_line(&mut out, cells.iter().map(String::as_str));
    }
    out
}

/// Download name for an export made on `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("customers_{}.csv", date.format("%Y%m%d"))
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_cell(out, cell);
    }
    out.push('\n');
}

/// Whether a spreadsheet would evaluate `cell` as a formula.
fn is_formula_like(cell: &str) -> bool {
    let trimmed = cell.trim_start();
    matches!(trimmed.chars().next(), Some('=' | '+' | '-' | '@'))
}

fn push_cell(out: &mut String, cell: &str) {
    let neutralized;
    let cell = if is_formula_like(cell) {
        neutralized = format!("'{cell}");
        neutralized.as_str()
    } else {
        cell
    };

    if cell.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&cell.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(cell);
    }
}
