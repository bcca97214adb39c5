use crate::domain::ViewMode;
use crate::layout::natural_widths;

use super::Model;

/// Gutter between exported columns.
const EXPORT_SEPARATOR: &str = "  ";

impl Model {
    /// Plain text copy of what is being looked at: the filtered rows (or all
    /// data rows), and in zoom mode only the selected columns. Columns are
    /// left aligned to their widest cell, there are no borders and no header.
    pub fn export_data(&self) -> String {
        let table = self.table();
        if table.is_empty() {
            return String::new();
        }

        let columns: Vec<usize> =
            if self.view_mode() == ViewMode::Zoom && !self.selected_columns.is_empty() {
                self.selected_columns()
            } else {
                (0..table.column_count()).collect()
            };
        if columns.is_empty() {
            return String::new();
        }

        let projected: Vec<Vec<String>> = self
            .active_row_indices()
            .into_iter()
            .filter(|&idx| idx > 0 && idx < table.rows().len())
            .map(|idx| {
                columns
                    .iter()
                    .map(|&column| table.cell(idx, column).to_string())
                    .collect()
            })
            .collect();

        let widths = natural_widths(&projected);
        projected
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!("{cell:<width$}"))
                    .collect::<Vec<_>>()
                    .join(EXPORT_SEPARATOR)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
