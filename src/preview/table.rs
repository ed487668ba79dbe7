//! Tabular preview of query results.
//!
//! One column per selected path, one row per returned record. Each cell
//! holds every value the path reached in that record, joined with the value
//! separator; cells that reached nothing show the null placeholder.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::flatten::flatten;
use crate::path::DottedPath;
use crate::query::{QueryExecutor, QueryResult};

/// Presentation knobs for preview cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    pub null_placeholder: String,
    pub value_separator: String,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            null_placeholder: "—".to_string(),
            value_separator: ", ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewColumn {
    pub label: String,
    pub path: DottedPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    /// 1-based row number.
    pub id: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewTable {
    pub columns: Vec<PreviewColumn>,
    pub rows: Vec<PreviewRow>,
}

impl PreviewTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build a preview from records that have already been fetched.
pub fn build_preview(
    records: &[Value],
    paths: &[DottedPath],
    options: &PreviewOptions,
) -> PreviewTable {
    let columns = paths
        .iter()
        .map(|p| PreviewColumn {
            label: p.to_string(),
            path: p.clone(),
        })
        .collect();

    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, record)| PreviewRow {
            id: idx + 1,
            cells: paths
                .iter()
                .map(|p| format_cell(&flatten(record, p), options))
                .collect(),
        })
        .collect();

    PreviewTable { columns, rows }
}

/// Run the query for `object_name` and build a preview of the results.
///
/// With no paths selected there is nothing to preview and the executor is
/// not called.
pub async fn run_preview<E>(
    executor: &E,
    object_name: &str,
    paths: &[DottedPath],
    options: &PreviewOptions,
) -> QueryResult<PreviewTable>
where
    E: QueryExecutor + ?Sized,
{
    if paths.is_empty() {
        return Ok(PreviewTable::default());
    }

    let records = executor.run_query(object_name, paths).await?;
    debug!(
        object = object_name,
        records = records.len(),
        columns = paths.len(),
        "building preview"
    );
    Ok(build_preview(&records, paths, options))
}

/// Render flattened values as one display cell.
pub fn format_cell(values: &[Value], options: &PreviewOptions) -> String {
    let mut parts = Vec::new();
    for value in values {
        collect_display(value, &mut parts);
    }

    if parts.is_empty() {
        options.null_placeholder.clone()
    } else {
        parts.join(options.value_separator.as_str())
    }
}

fn collect_display(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => parts.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                collect_display(item, parts);
            }
        }
        other => parts.push(other.to_string()),
    }
}

impl fmt::Display for PreviewTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.label.chars().count())
            .collect();
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let header: Vec<&str> = self.columns.iter().map(|c| c.label.as_str()).collect();
        write_line(f, &header, &widths)?;

        write!(f, "|")?;
        for width in &widths {
            write!(f, "{}|", "-".repeat(width + 2))?;
        }
        writeln!(f)?;

        for row in &self.rows {
            let cells: Vec<&str> = row.cells.iter().map(String::as_str).collect();
            write_line(f, &cells, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
    write!(f, "|")?;
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        write!(f, " {}{} |", cell, " ".repeat(pad))?;
    }
    writeln!(f)
}
