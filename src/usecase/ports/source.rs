use thiserror::Error;

use crate::usecase::ports::credentials::CredentialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("data source not found: {0}")]
    NotFound(String),
    #[error("access to data source denied: {0}")]
    Permission(String),
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Read-only grid of text cells. Row and column indexes are zero-based.
pub trait TabularSource: Send + Sync {
    fn describe(&self) -> String;

    fn all_values(&self) -> Result<Vec<Vec<String>>, SourceError>;

    /// Cells whose text equals `text` exactly, in row-major order.
    fn find_all(&self, text: &str) -> Result<Vec<CellRef>, SourceError> {
        Ok(find_cells(&self.all_values()?, text))
    }

    fn row_values(&self, row: usize) -> Result<Vec<String>, SourceError> {
        Ok(self.all_values()?.into_iter().nth(row).unwrap_or_default())
    }
}

pub fn find_cells(values: &[Vec<String>], text: &str) -> Vec<CellRef> {
    values
        .iter()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(_, value)| value.as_str() == text)
                .map(move |(col, _)| CellRef { row, col })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn find_cells_is_exact_and_row_major() {
        let values = grid(&[
            &["ID", "Name"],
            &["E1", "Jane Doe Jr"],
            &["E2", "Jane Doe"],
            &["Jane Doe", "E3"],
        ]);

        let found = find_cells(&values, "Jane Doe");

        assert_eq!(
            found,
            vec![CellRef { row: 2, col: 1 }, CellRef { row: 3, col: 0 }]
        );
    }

    #[test]
    fn find_cells_is_case_sensitive() {
        let values = grid(&[&["E1", "jane doe"]]);

        assert!(find_cells(&values, "Jane Doe").is_empty());
    }
}
