pub const ELLIPSIS: &str = "...";

/// Width of a cell as used by every layout calculation.
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

pub fn is_truncated(cell: &str, max_width: usize) -> bool {
    text_width(cell) > max_width
}

/// Shorten `cell` to at most `max_width` characters, ending in `...` when
/// there is room for it.
pub fn truncate_cell(cell: &str, max_width: usize) -> String {
    if !is_truncated(cell, max_width) {
        return cell.to_string();
    }
    let ellipsis_width = text_width(ELLIPSIS);
    if max_width <= ellipsis_width {
        return cell.chars().take(max_width).collect();
    }
    let mut out: String = cell.chars().take(max_width - ellipsis_width).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Truncate every cell to the width of its column. Cells without a known
/// column width are passed through.
pub fn truncate_rows<R: AsRef<[String]>>(rows: &[R], widths: &[usize]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            row.as_ref()
                .iter()
                .enumerate()
                .map(|(idx, cell)| match widths.get(idx) {
                    Some(&width) => truncate_cell(cell, width),
                    None => cell.clone(),
                })
                .collect()
        })
        .collect()
}
