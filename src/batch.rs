// 📦 Batch Calculation - CSV → charts
// One outcome per row; a bad row never aborts the batch

use crate::birth_date::BirthDate;
use crate::chart::{ChartCalculator, NumerologyChart};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    pub full_name: String,
    pub birth_date: String,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// A CSV record with its line number. Records that could not be read as a
/// `BatchRow` keep whatever fields were present and carry the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub line: usize,
    pub row: BatchRow,
    pub malformed: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Line in the CSV file (header is line 1)
    pub line: usize,
    pub full_name: String,
    pub birth_date: String,
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<NumerologyChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.chart.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub fn load_rows(csv_path: &Path) -> Result<Vec<BatchEntry>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    read_rows(file)
}

/// Read every record. Only I/O failures abort; a record that does not fit
/// the row shape becomes a malformed entry.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<BatchEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();

    let mut entries = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                return Err(e).context("Failed to read batch row");
            }
            Err(e) => {
                entries.push(BatchEntry {
                    line: i + 2,
                    row: BatchRow::default(),
                    malformed: Some(e.to_string()),
                });
                continue;
            }
        };

        let line = record.position().map_or(i + 2, |p| p.line() as usize);
        let entry = match record.deserialize::<BatchRow>(Some(&headers)) {
            Ok(mut row) => {
                if row.customer_email.as_deref().is_some_and(str::is_empty) {
                    row.customer_email = None;
                }
                BatchEntry { line, row, malformed: None }
            }
            Err(e) => {
                let field = |name: &str| {
                    headers
                        .iter()
                        .position(|h| h == name)
                        .and_then(|idx| record.get(idx))
                        .unwrap_or_default()
                        .to_string()
                };
                BatchEntry {
                    line,
                    row: BatchRow {
                        full_name: field("full_name"),
                        birth_date: field("birth_date"),
                        customer_email: None,
                    },
                    malformed: Some(e.to_string()),
                }
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

/// Validate and calculate every row as of `as_of`
pub fn run_batch(entries: &[BatchEntry], calculator: &ChartCalculator, as_of: NaiveDate) -> Vec<BatchOutcome> {
    entries
        .iter()
        .map(|entry| {
            let line = entry.line;
            let row = &entry.row;
            let (chart, error) = if let Some(reason) = &entry.malformed {
                tracing::warn!(line, error = %reason, "batch row malformed");
                (None, Some(reason.clone()))
            } else {
                match BirthDate::validate(&row.birth_date, as_of) {
                    Ok(date) => (Some(calculator.calculate_for(&row.full_name, date, as_of)), None),
                    Err(e) => {
                        tracing::warn!(line, birth_date = %row.birth_date, error = %e, "batch row rejected");
                        (None, Some(e.to_string()))
                    }
                }
            };

            BatchOutcome {
                line,
                full_name: row.full_name.clone(),
                birth_date: row.birth_date.clone(),
                customer_email: row.customer_email.clone(),
                chart,
                error,
            }
        })
        .collect()
}

pub fn summarize(outcomes: &[BatchOutcome]) -> BatchSummary {
    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    BatchSummary {
        total: outcomes.len(),
        succeeded,
        failed: outcomes.len() - succeeded,
    }
}

// ============================================================================
// TESTS
// ============================================================================
