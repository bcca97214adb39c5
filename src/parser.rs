use tracing::debug;

use crate::table::Table;

/// Split command output into a table.
///
/// The first non blank line is the header and decides the column count.
/// Tab separated input is split on tabs, everything else on runs of two or
/// more whitespace characters so values like `APP VERSION` stay together.
pub fn parse_table(input: &str) -> Table {
    let lines: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
    let Some(header_line) = lines.first() else {
        return Table::default();
    };

    let mut split: fn(&str) -> Vec<String> = split_by_multiple_spaces;
    let mut header = split(header_line);
    // `NAME STATUS PORT` style output only uses single spaces
    if header.len() == 1 && !header_line.contains('\t') && header_line.trim().contains(' ') {
        split = split_by_whitespace;
        header = split(header_line);
    }

    let ncols = header.len();
    if ncols == 0 {
        return Table::default();
    }

    let mut rows = Vec::with_capacity(lines.len());
    rows.push(header);
    for line in &lines[1..] {
        let fields = split(line);
        if fields.is_empty() {
            continue;
        }
        rows.push(fit_to_columns(fields, ncols));
    }
    debug!("Parsed {} data rows with {} columns", rows.len() - 1, ncols);
    Table::new(rows)
}

/// Split a line on tabs if it has any, otherwise on runs of 2+ whitespace.
pub fn split_by_multiple_spaces(line: &str) -> Vec<String> {
    if line.contains('\t') {
        // Empty fields between tabs are kept, they hold a column position
        return line
            .trim_end_matches(['\r', '\n'])
            .split('\t')
            .map(|f| f.trim().to_string())
            .collect();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut gap = String::new();
    for c in line.trim().chars() {
        if c.is_whitespace() {
            gap.push(c);
            continue;
        }
        if gap.chars().count() >= 2 {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push_str(&gap);
        }
        gap.clear();
        current.push(c);
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}

fn split_by_whitespace(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

fn fit_to_columns(mut fields: Vec<String>, ncols: usize) -> Vec<String> {
    if fields.len() > ncols {
        let rest = fields.split_off(ncols - 1).join(" ");
        fields.push(rest);
    } else {
        fields.resize(ncols, String::new());
    }
    fields
}
