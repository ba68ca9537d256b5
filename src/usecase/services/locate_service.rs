use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::record::{ColumnMap, EmployeeRecord};
use crate::usecase::error::FillError;
use crate::usecase::ports::source::TabularSource;

pub struct RecordLocator {
    source: Arc<dyn TabularSource>,
    columns: ColumnMap,
    header_rows: usize,
}

impl RecordLocator {
    pub fn new(source: Arc<dyn TabularSource>, columns: ColumnMap, header_rows: usize) -> Self {
        Self {
            source,
            columns,
            header_rows,
        }
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn table(&self) -> Result<Vec<Vec<String>>, FillError> {
        Ok(self.source.all_values()?)
    }

    /// First exact cell match below the header rows wins.
    pub fn locate(&self, name: &str) -> Result<EmployeeRecord, FillError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FillError::EmptyName);
        }

        let matches = self.source.find_all(name)?;
        debug!(
            source = %self.source.describe(),
            matches = matches.len(),
            "searched data source"
        );
        let Some(cell) = matches.into_iter().find(|cell| cell.row >= self.header_rows) else {
            return Err(FillError::NotFound {
                name: name.to_string(),
            });
        };

        let row = self.source.row_values(cell.row)?;
        let record = EmployeeRecord::from_row(&row, &self.columns).map_err(|malformed| {
            FillError::MalformedRecord {
                row: cell.row,
                populated: malformed.populated,
                expected: malformed.expected,
            }
        })?;
        info!(row = cell.row, id = %record.id, "located record");
        Ok(record)
    }
}
