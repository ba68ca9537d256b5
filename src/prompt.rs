use std::io::{self, BufRead, Write};

use tracing::error;

use crate::usecase::error::FillError;
use crate::usecase::services::fill_service::{FillOutcome, FillService};

pub const PROMPT: &str = "Enter the name to extract information: ";

/// Plain-text grid with columns padded to their widest cell.
pub fn format_table(rows: &[Vec<String>], header_rows: usize) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0_usize; width];
    for row in rows {
        for (idx, value) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(value.chars().count());
        }
    }

    let mut out = String::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let line: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(idx, col_width)| {
                let value = row.get(idx).map(String::as_str).unwrap_or("");
                format!("{value:<col_width$}")
            })
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
        if row_idx + 1 == header_rows {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }
    out
}

fn read_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "{PROMPT}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// One blocking lookup and fill. The caller turns an error into a non-zero exit.
pub fn run<R: BufRead, W: Write>(
    service: &FillService,
    preset_name: Option<String>,
    mut input: R,
    mut output: W,
) -> Result<FillOutcome, FillError> {
    let result = service.table().and_then(|rows| {
        write!(output, "{}", format_table(&rows, service.header_rows())).ok();
        let name = match preset_name {
            Some(name) => name,
            None => read_name(&mut input, &mut output)
                .map_err(|err| FillError::Input(err.to_string()))?,
        };
        service.fill(&name)
    });

    match &result {
        Ok(outcome) => {
            writeln!(output, "{}", outcome.summary()).ok();
        }
        Err(err) => {
            error!(error = %err, "fill failed");
            writeln!(output, "{err}").ok();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn format_table_pads_and_rules_header() {
        let table = format_table(
            &rows(&[&["ID", "Name"], &["E100", "Jane Doe"], &["E2"]]),
            1,
        );

        assert_eq!(
            table,
            "ID   | Name\n-----+---------\nE100 | Jane Doe\nE2   |\n"
        );
    }

    #[test]
    fn format_table_without_header_has_no_rule() {
        let table = format_table(&rows(&[&["a", "b"]]), 0);

        assert_eq!(table, "a | b\n");
    }

    #[test]
    fn format_table_of_empty_sheet_is_empty() {
        assert_eq!(format_table(&[], 1), "");
    }
}
