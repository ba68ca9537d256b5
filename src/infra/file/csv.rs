use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::usecase::ports::source::{SourceError, TabularSource};

/// Every line is a row, the header line included. Re-read on every call.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

pub fn read_csv_rows(csv_path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        rows.push(record.iter().map(|value| value.to_string()).collect());
    }
    Ok(rows)
}

impl TabularSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv {}", self.path.display())
    }

    fn all_values(&self) -> Result<Vec<Vec<String>>, SourceError> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.display().to_string()));
        }
        read_csv_rows(&self.path).map_err(|err| SourceError::Unavailable(format!("{err:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::ports::source::CellRef;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("rosterdeck-{prefix}-{nanos}"))
    }

    #[test]
    fn reads_every_line_including_header() {
        let temp_dir = unique_test_dir("csv-rows");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let csv_path = temp_dir.join("employees.csv");
        fs::write(
            &csv_path,
            "ID,Name,Occupation,Country,Age\nE100,Jane Doe,Engineer,Canada,29\nE101,John Roe,Chef\n",
        )
        .expect("should write csv fixture");

        let source = CsvSource::new(&csv_path);
        let values = source.all_values().expect("csv should load");

        assert_eq!(values.len(), 3);
        assert_eq!(values[1][1], "Jane Doe");
        assert_eq!(values[2].len(), 3, "short rows stay short");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn find_and_row_values_use_file_order() {
        let temp_dir = unique_test_dir("csv-find");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");
        let csv_path = temp_dir.join("employees.csv");
        fs::write(
            &csv_path,
            "ID,Name\nE1,Ann\nE2,Jane Doe\nE3,Jane Doe\n",
        )
        .expect("should write csv fixture");

        let source = CsvSource::new(&csv_path);
        let found = source.find_all("Jane Doe").expect("search should succeed");
        let row = source.row_values(2).expect("row should load");

        assert_eq!(found.first(), Some(&CellRef { row: 2, col: 1 }));
        assert_eq!(row, vec!["E2".to_string(), "Jane Doe".to_string()]);

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }

    #[test]
    fn missing_file_is_not_found() {
        let source = CsvSource::new(unique_test_dir("csv-missing").join("none.csv"));

        assert!(matches!(source.all_values(), Err(SourceError::NotFound(_))));
    }
}
