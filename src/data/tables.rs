// ============================================================
// Layer 4 — Table Flattening
// ============================================================
// Scorers read prose, not grids, so every table is flattened
// into one line per data row:
//
//   | Metric  | 2021 | 2022 |        Metric: Revenue, 2021: 100, 2022: 120
//   | Revenue | 100  | 120  |   →    Metric: Profit, 2021: 10, 2022: 12
//   | Profit  | 10   | 12   |
//
// The first row is the header. Empty rows and empty cells are
// skipped.
//
// DOCX files hand us real table cells. PDF and plain-text pages
// only give us lines, so `detect_layout_tables` looks for runs
// of at least two consecutive lines that split into two or
// more cells on `|`, tabs, or wide (2+ space) gaps.

use once_cell::sync::Lazy;
use regex::Regex;

static CELL_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t+| {2,}").expect("valid regex"));

/// Collapse internal whitespace and trim a cell
pub fn clean_cell(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flatten one table (header row first) into `header: value` lines.
pub fn format_table(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };
    let header: Vec<String> = header.iter().map(|h| clean_cell(h)).collect();

    let mut out = String::new();
    for row in body {
        let pairs: Vec<String> = header
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key, clean_cell(value)))
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}: {value}"))
            .collect();

        if !pairs.is_empty() {
            out.push_str(&pairs.join(", "));
            out.push('\n');
        }
    }
    out
}

/// Split a text line into cells, or None if it does not look tabular.
fn split_cells(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cells: Vec<String> = if trimmed.contains('|') {
        trimmed
            .trim_matches('|')
            .split('|')
            .map(clean_cell)
            .collect()
    } else {
        CELL_GAP.split(trimmed).map(clean_cell).collect()
    };

    let filled = cells.iter().filter(|c| !c.is_empty()).count();
    (filled >= 2).then_some(cells)
}

/// Find line-laid-out tables in plain page text.
pub fn detect_layout_tables(text: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        match split_cells(line) {
            Some(cells) => current.push(cells),
            None => {
                if current.len() >= 2 {
                    tables.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() >= 2 {
        tables.push(current);
    }

    tables
}

/// Detect and flatten every layout table in `text`
pub fn flatten_layout_tables(text: &str) -> String {
    detect_layout_tables(text)
        .iter()
        .map(|t| format_table(t))
        .collect::<Vec<_>>()
        .concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_format_table_uses_first_row_as_header() {
        let table = vec![
            row(&["Metric", "2021", "2022"]),
            row(&["Revenue", "100", "120"]),
            row(&["", "", ""]),
            row(&["Profit", " 10 ", ""]),
        ];
        assert_eq!(
            format_table(&table),
            "Metric: Revenue, 2021: 100, 2022: 120\nMetric: Profit, 2021: 10\n"
        );
    }

    #[test]
    fn test_format_table_of_header_only_is_empty() {
        assert_eq!(format_table(&[row(&["a", "b"])]), "");
        assert_eq!(format_table(&[]), "");
    }

    #[test]
    fn test_detects_pipe_tables() {
        let text = "Annual report\n| Metric | 2021 |\n| Revenue | 100 |\nClosing words";
        let tables = detect_layout_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][1], row(&["Revenue", "100"]));
    }

    #[test]
    fn test_detects_space_aligned_tables() {
        let text = "Name    Role\nAda     Engineer\nGrace   Admiral\n\nplain sentence here";
        assert_eq!(
            flatten_layout_tables(text),
            "Name: Ada, Role: Engineer\nName: Grace, Role: Admiral\n"
        );
    }

    #[test]
    fn test_single_tabular_line_is_not_a_table() {
        let text = "Key    Value\nnot a table line";
        assert!(detect_layout_tables(text).is_empty());
    }
}
