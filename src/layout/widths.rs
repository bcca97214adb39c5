use tracing::trace;

use super::truncate::{is_truncated, text_width};

/// The last column usually holds free text (COMMAND, DESCRIPTION, ...).
pub const LAST_COLUMN_MIN_WIDTH: usize = 20;
/// Columns at most this wide (ids, ports, ages) keep their natural width.
pub const SHORT_COLUMN_WIDTH: usize = 5;
pub const DEFAULT_MIN_WIDTH: usize = 8;
/// Floor used when other columns give up space for an auto expanded column.
pub const AUTO_EXPAND_MIN_WIDTH: usize = 5;
/// Share of the leftover space (in tenths) that goes to the last column.
const LAST_COLUMN_SHARE_TENTHS: usize = 6;

/// Border and padding characters: `| a | b |` needs `3 * n + 1`.
pub fn overhead(num_columns: usize) -> usize {
    3 * num_columns + 1
}

pub fn available_width(terminal_width: usize, num_columns: usize) -> usize {
    terminal_width.saturating_sub(overhead(num_columns))
}

/// Width needed to show every cell of every column untruncated.
/// The header decides the column count, extra cells in ragged rows are ignored.
pub fn natural_widths<R: AsRef<[String]>>(rows: &[R]) -> Vec<usize> {
    let Some(header) = rows.first() else {
        return Vec::new();
    };
    let mut widths = vec![0; header.as_ref().len()];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
            *width = (*width).max(text_width(cell));
        }
    }
    widths
}

pub fn minimum_widths(natural: &[usize]) -> Vec<usize> {
    let last = natural.len().saturating_sub(1);
    natural
        .iter()
        .enumerate()
        .map(|(idx, &width)| {
            if idx == last {
                LAST_COLUMN_MIN_WIDTH
            } else if width <= SHORT_COLUMN_WIDTH {
                width
            } else {
                DEFAULT_MIN_WIDTH
            }
        })
        .collect()
}

/// Fit the columns into `terminal_width`.
///
/// If the natural widths fit they are returned unchanged. Otherwise every
/// column starts at its minimum width, the last column gets 60% of what is
/// left and the rest is split over the other columns by natural width. When
/// even the minimum widths do not fit they are returned as is and the caller
/// has to live with a table wider than the terminal.
pub fn calculate_column_widths<R: AsRef<[String]>>(
    rows: &[R],
    terminal_width: usize,
) -> Vec<usize> {
    let natural = natural_widths(rows);
    if natural.is_empty() {
        return natural;
    }

    let available = available_width(terminal_width, natural.len());
    if natural.iter().sum::<usize>() <= available {
        return natural;
    }

    let mut widths = minimum_widths(&natural);
    let min_total: usize = widths.iter().sum();
    if min_total >= available {
        trace!("Minimum widths {min_total} exceed available width {available}");
        return widths;
    }

    let remaining = available - min_total;
    let last = widths.len() - 1;
    let last_extra = remaining * LAST_COLUMN_SHARE_TENTHS / 10;
    widths[last] += last_extra;

    let rest = remaining - last_extra;
    match distribute_proportionally(rest, &natural[..last]) {
        Some(shares) => {
            for (width, share) in widths.iter_mut().zip(shares) {
                *width += share;
            }
        }
        None => widths[last] += rest,
    }

    trace!("Column widths {widths:?} (natural {natural:?}, available {available})");
    widths
}

/// Split `amount` by `weights`, handing out rounding leftovers by largest
/// remainder (lower index first on ties). `None` if there is nothing to weigh by.
fn distribute_proportionally(amount: usize, weights: &[usize]) -> Option<Vec<usize>> {
    let total: usize = weights.iter().sum();
    if total == 0 {
        return None;
    }

    let mut shares: Vec<usize> = weights.iter().map(|w| amount * w / total).collect();
    let mut leftover = amount - shares.iter().sum::<usize>();

    let mut by_remainder: Vec<(usize, usize)> = weights
        .iter()
        .enumerate()
        .map(|(idx, w)| (amount * w % total, idx))
        .collect();
    by_remainder.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    for (_, idx) in by_remainder {
        if leftover == 0 {
            break;
        }
        shares[idx] += 1;
        leftover -= 1;
    }
    Some(shares)
}

/// Width of the widest cell in `column`, header included.
pub fn required_width_for_column<R: AsRef<[String]>>(rows: &[R], column: usize) -> usize {
    rows.iter()
        .filter_map(|row| row.as_ref().get(column))
        .map(|cell| text_width(cell))
        .max()
        .unwrap_or(0)
}

pub fn column_has_truncated_cells<R: AsRef<[String]>>(
    rows: &[R],
    column: usize,
    width: usize,
) -> bool {
    rows.iter()
        .filter_map(|row| row.as_ref().get(column))
        .any(|cell| is_truncated(cell, width))
}

/// Grow the focused column to its natural width.
///
/// If the table does not fit afterwards, the other columns give up space in
/// proportion to their current width, never going below
/// [`AUTO_EXPAND_MIN_WIDTH`]. The focused column then gets whatever could be
/// reclaimed, up to its natural width. The focused column never shrinks.
pub fn calculate_column_widths_with_auto_expand<R: AsRef<[String]>>(
    rows: &[R],
    terminal_width: usize,
    focused: usize,
    current: &[usize],
) -> Vec<usize> {
    let mut widths = current.to_vec();
    if focused >= widths.len() {
        return widths;
    }

    let full = required_width_for_column(rows, focused);
    if widths[focused] >= full {
        return widths;
    }

    let extra = full - widths[focused];
    let available = available_width(terminal_width, widths.len());
    let total: usize = widths.iter().sum();
    if total + extra <= available {
        widths[focused] = full;
        return widths;
    }

    let free = available.saturating_sub(total);
    let reclaimed = shrink_other_columns(&mut widths, focused, extra - free);
    widths[focused] += free + reclaimed;

    trace!("Auto expanded column {focused} to {} (wanted {full})", widths[focused]);
    widths
}

// Returns how much space was actually taken from the other columns.
fn shrink_other_columns(widths: &mut [usize], focused: usize, needed: usize) -> usize {
    let others_total: usize = widths
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != focused)
        .map(|(_, w)| w)
        .sum();
    if others_total == 0 {
        return 0;
    }

    let mut reclaimed = 0;
    for (idx, width) in widths.iter_mut().enumerate() {
        if idx == focused {
            continue;
        }
        let share = (needed * *width).div_ceil(others_total);
        let cut = share
            .min(width.saturating_sub(AUTO_EXPAND_MIN_WIDTH))
            .min(needed - reclaimed);
        *width -= cut;
        reclaimed += cut;
    }

    // Columns that hit the floor leave a gap, take it from the right
    for idx in (0..widths.len()).rev() {
        if reclaimed >= needed {
            break;
        }
        if idx == focused {
            continue;
        }
        let cut = widths[idx]
            .saturating_sub(AUTO_EXPAND_MIN_WIDTH)
            .min(needed - reclaimed);
        widths[idx] -= cut;
        reclaimed += cut;
    }
    reclaimed
}

/// Zoomed columns are shown in full when they fit, otherwise like a normal table.
pub fn calculate_zoom_widths<R: AsRef<[String]>>(rows: &[R], terminal_width: usize) -> Vec<usize> {
    let widths = natural_widths(rows);
    if widths.iter().sum::<usize>() + overhead(widths.len()) > terminal_width {
        return calculate_column_widths(rows, terminal_width);
    }
    widths
}
