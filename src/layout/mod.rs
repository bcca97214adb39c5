//! Column width, truncation and scroll calculations.
//!
//! Everything in here is a pure function of its inputs. Widths are counted
//! in characters, not terminal cells.

mod scroll;
mod truncate;
mod widths;

pub use scroll::{ScrollRegime, max_scroll, page_size, scroll_by, visible_rows};
pub use truncate::{ELLIPSIS, is_truncated, text_width, truncate_cell, truncate_rows};
pub use widths::{
    AUTO_EXPAND_MIN_WIDTH, available_width, calculate_column_widths,
    calculate_column_widths_with_auto_expand, calculate_zoom_widths, column_has_truncated_cells,
    minimum_widths, natural_widths, overhead, required_width_for_column,
};
