pub fn root_container_style() -> &'static str {
    "display: flex; flex-direction: column; height: 100vh; gap: 8px; padding: 12px; box-sizing: border-box; font-family: sans-serif;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; background: #f5f5f5; border: 1px solid #bbb; padding: 4px 8px; text-align: left;"
}

pub fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px 8px;"
}

pub fn status_style(is_error: bool) -> String {
    let color = if is_error { "#b00020" } else { "#333" };
    format!("color: {color}; white-space: pre-wrap;")
}

/// Header rows go to `thead`, the rest to `tbody`; the header is padded to the
/// widest row so every column gets a heading cell.
pub fn split_header(rows: &[Vec<String>], header_rows: usize) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let split = header_rows.min(rows.len());
    let header = rows[..split]
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, String::new());
            row
        })
        .collect();
    (header, rows[split..].to_vec())
}
