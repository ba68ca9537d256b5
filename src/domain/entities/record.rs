use serde::Deserialize;

pub const FIELD_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub country: String,
    pub age: String,
}

/// Zero-based position of each field within a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub id: usize,
    pub name: usize,
    pub occupation: usize,
    pub country: usize,
    pub age: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: 0,
            name: 1,
            occupation: 2,
            country: 3,
            age: 4,
        }
    }
}

impl ColumnMap {
    pub fn indexes(&self) -> [usize; FIELD_COUNT] {
        [self.id, self.name, self.occupation, self.country, self.age]
    }

    pub fn has_duplicates(&self) -> bool {
        let indexes = self.indexes();
        indexes
            .iter()
            .enumerate()
            .any(|(pos, idx)| indexes[pos + 1..].contains(idx))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedRow {
    pub populated: usize,
    pub expected: usize,
}

fn row_value(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

fn is_populated(row: &[String], idx: usize) -> bool {
    row.get(idx).is_some_and(|value| !value.trim().is_empty())
}

impl EmployeeRecord {
    /// Cells are copied verbatim; a mapped cell that is absent or blank
    /// rejects the whole row.
    pub fn from_row(row: &[String], columns: &ColumnMap) -> Result<Self, MalformedRow> {
        let populated = columns
            .indexes()
            .iter()
            .filter(|idx| is_populated(row, **idx))
            .count();
        if populated < FIELD_COUNT {
            return Err(MalformedRow {
                populated,
                expected: FIELD_COUNT,
            });
        }

        Ok(Self {
            id: row_value(row, columns.id),
            name: row_value(row, columns.name),
            occupation: row_value(row, columns.occupation),
            country: row_value(row, columns.country),
            age: row_value(row, columns.age),
        })
    }
}
