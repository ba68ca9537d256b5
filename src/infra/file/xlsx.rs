use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::usecase::ports::source::{SourceError, TabularSource};

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Trailing empty cells are dropped so short rows read as short.
fn trim_row(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|value| value.is_empty()) {
        row.pop();
    }
    row
}

pub fn read_worksheet_rows(workbook_path: &Path, worksheet: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(workbook_path)
        .with_context(|| format!("failed to open workbook: {}", workbook_path.display()))?;
    let range = workbook
        .worksheet_range(worksheet)
        .with_context(|| format!("failed to read sheet: {worksheet}"))?;

    // calamine ranges start at the first used cell; pad back to A1.
    let (first_row, first_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row];
    rows.extend(range.rows().map(|r| {
        let mut row = vec![String::new(); first_col];
        row.extend(r.iter().map(cell_to_string));
        trim_row(row)
    }));
    Ok(rows)
}

pub struct XlsxSource {
    path: PathBuf,
    worksheet: String,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>, worksheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            worksheet: worksheet.into(),
        }
    }
}

impl TabularSource for XlsxSource {
    fn describe(&self) -> String {
        format!("workbook {}#{}", self.path.display(), self.worksheet)
    }

    fn all_values(&self) -> Result<Vec<Vec<String>>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.display().to_string()));
        }
        read_worksheet_rows(&self.path, &self.worksheet)
            .map_err(|err| SourceError::Unavailable(format!("{err:#}")))
    }
}
