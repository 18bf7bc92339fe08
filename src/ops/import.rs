use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::model::TaskRecord;

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not read import file: {0}")]
    Parse(#[from] csv::Error),
}

/// Result of an import operation
#[derive(Debug)]
pub struct ImportResult {
    /// The existing tasks followed by the accepted rows
    pub tasks: Vec<TaskRecord>,
    /// Number of rows that became tasks
    pub accepted: usize,
}

/// One CSV row, keyed by the header line `day,description,type`.
/// Missing columns and short rows deserialize as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportRow {
    day: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl ImportRow {
    /// Convert into a task record, or `None` if the row is unusable.
    fn into_task(self, id: String) -> Option<TaskRecord> {
        let day = parse_day(&self.day?)?;
        let desc = self.description.filter(|d| !d.is_empty())?;
        let kind = self.kind.filter(|k| !k.is_empty())?;
        Some(TaskRecord::new(id, day, desc, kind))
    }
}

/// Parse CSV bytes into new, uncompleted task records.
///
/// Rows are dropped without error when the day has no leading integer of
/// at least 1, or the description or type is empty. Only unreadable input (bad UTF-8, I/O) fails.
pub fn parse_import(bytes: &[u8]) -> Result<Vec<TaskRecord>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let stamp = Utc::now().timestamp_millis();
    let mut tasks = Vec::new();
    for (line, row) in reader.deserialize::<ImportRow>().enumerate() {
        let row = row?;
        match row.into_task(fresh_id(stamp)) {
            Some(task) => tasks.push(task),
            // +2: one for the header, one for 1-based numbering
            None => tracing::debug!(row = line + 2, "skipping unusable import row"),
        }
    }
    Ok(tasks)
}

/// Parse `bytes` and append the accepted rows after `existing`.
pub fn import_tasks(existing: &[TaskRecord], bytes: &[u8]) -> Result<ImportResult, ImportError> {
    let imported = parse_import(bytes)?;
    let accepted = imported.len();
    let mut tasks = existing.to_vec();
    tasks.extend(imported);
    tracing::info!(accepted, total = tasks.len(), "imported tasks");
    Ok(ImportResult { tasks, accepted })
}

/// Read the leading integer of a day cell, so `2.5` and `3 days` give 2
/// and 3. Anything without leading digits, or below 1, is rejected.
fn parse_day(cell: &str) -> Option<u32> {
    let cell = cell.trim_start();
    let (negative, digits) = match cell.as_bytes().first() {
        Some(b'-') => (true, &cell[1..]),
        Some(b'+') => (false, &cell[1..]),
        _ => (false, cell),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let day: u32 = digits[..end].parse().ok()?;
    (!negative && day >= 1).then_some(day)
}

/// Human-readable summary of an import, e.g. `imported 3 tasks`
pub fn imported_message(accepted: usize) -> String {
    let noun = if accepted == 1 { "task" } else { "tasks" };
    format!("imported {} {}", accepted, noun)
}

fn fresh_id(stamp: i64) -> String {
    format!("csv_{}_{}", stamp, Uuid::new_v4().simple())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn day_uses_leading_integer() {
        let csv = "day,description,type\n2.5,Half,DSA\n3 days,Spaced,Apti\n +4,Signed,DSA\nx1,Bad,DSA\n-0,Zero,DSA\n";
        let days: Vec<(u32, String)> = parse_import(csv.as_bytes())
            .unwrap()
            .into_iter()
            .map(|t| (t.day, t.desc))
            .collect();
        assert_eq!(
            days,
            vec![(2, "Half".into()), (3, "Spaced".into()), (4, "Signed".into())]
        );
    }

    #[test]
    fn imported_message_pluralizes() {
        assert_eq!(imported_message(0), "imported 0 tasks");
        assert_eq!(imported_message(1), "imported 1 task");
        assert_eq!(imported_message(12), "imported 12 tasks");
    }

    #[test]
    fn accepts_valid_row() {
        let tasks = parse_import(b"day,description,type\n2,Do X,DSA\n").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].day, 2);
        assert_eq!(tasks[0].desc, "Do X");
        assert_eq!(tasks[0].kind, "DSA");
        assert!(!tasks[0].completed);
        assert!(tasks[0].id.starts_with("csv_"));
    }

    #[test]
    fn drops_non_integer_day() {
        let tasks = parse_import(b"day,description,type\nabc,Do Y,DSA\n").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn drops_rows_missing_description_or_type() {
        let csv = "\
day,description,type
1,,DSA
2,Only description,
3
4,Kept,Apti
";
        let tasks = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].desc, "Kept");
        assert_eq!(tasks[0].day, 4);
    }

    #[test]
    fn drops_day_zero_and_negative() {
        let tasks = parse_import(b"day,description,type\n0,Zero,DSA\n-1,Neg,DSA\n").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn header_whitespace_and_column_order_are_tolerated() {
        let csv = "type, day , description\nDSA, 5 ,Graphs\n";
        let tasks = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].day, 5);
        assert_eq!(tasks[0].desc, "Graphs");
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let csv = "day,description,type\n1,\"Read, then summarize\",Apti\n";
        let tasks = parse_import(csv.as_bytes()).unwrap();
        assert_eq!(tasks[0].desc, "Read, then summarize");
    }

    #[test]
    fn missing_columns_yield_no_tasks() {
        let tasks = parse_import(b"name,notes\n1,hello\n").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn empty_input_yields_no_tasks() {
        assert!(parse_import(b"").unwrap().is_empty());
        assert!(parse_import(b"day,description,type\n").unwrap().is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let csv = "day,description,type\n1,A,DSA\n1,A,DSA\n1,A,DSA\n";
        let tasks = parse_import(csv.as_bytes()).unwrap();
        let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes = b"day,description,type\n1,\xff\xfe,DSA\n";
        assert!(matches!(parse_import(bytes), Err(ImportError::Parse(_))));
    }

    #[test]
    fn import_appends_after_existing() {
        let existing = vec![TaskRecord::new("u1".into(), 1, "Mine".into(), "DSA".into())];
        let result = import_tasks(&existing, b"day,description,type\n2,New,Apti\n").unwrap();
        assert_eq!(result.accepted, 1);
        assert_eq!(result.tasks.len(), 2);
        assert_eq!(result.tasks[0], existing[0]);
        assert_eq!(result.tasks[1].desc, "New");
    }
}
