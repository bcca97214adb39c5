use tracing::trace;

use crate::domain::{HELP_FILTER, HELP_NORMAL, HELP_ZOOM, ViewMode};
use crate::layout::{
    ScrollRegime, calculate_column_widths, calculate_column_widths_with_auto_expand,
    calculate_zoom_widths, column_has_truncated_cells, truncate_rows, visible_rows,
};

use super::Model;

/// Everything the UI needs to paint one frame. Cells are already truncated
/// to `widths`; column positions refer to the displayed columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UIData {
    pub mode: ViewMode,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<usize>,
    /// Focused column (normal mode only).
    pub selected_column: Option<usize>,
    /// Columns marked for zoom (normal mode only).
    pub marked_columns: Vec<usize>,
    /// Column the filter runs on (filter mode only).
    pub filter_column: Option<usize>,
    pub filter_applied: bool,
    pub filter_column_name: String,
    pub filter_input: String,
    pub match_count: usize,
    pub scroll_offset: usize,
    pub max_scroll: usize,
    pub visible_rows: usize,
    /// Data rows in the current view (after filtering).
    pub nrows: usize,
    /// Data rows in the whole table.
    pub total_rows: usize,
    pub selected_count: usize,
    pub auto_expand: bool,
    pub zoom_title: Option<String>,
    pub help: &'static str,
}

impl UIData {
    /// Nothing to show.
    pub fn empty() -> Self {
        UIData {
            help: HELP_NORMAL,
            ..Default::default()
        }
    }
}

impl Model {
    pub fn ui_data(&self) -> UIData {
        if self.table().is_empty() {
            return UIData::empty();
        }
        let mut data = match self.view_mode() {
            ViewMode::Normal => self.build_normal_view(),
            ViewMode::Filter => self.build_filter_view(),
            ViewMode::Zoom => self.build_zoom_view(),
        };

        data.mode = self.view_mode();
        data.total_rows = self.table().data_row_count();
        data.selected_count = self.selected_columns.len();
        data.auto_expand = self.auto_expand();
        if let Some(filter) = self.filter() {
            data.filter_applied = true;
            data.filter_column_name = self.table().column_name(filter.column).to_string();
            data.filter_input = filter.query.clone();
            data.match_count = filter.matches.len();
        }
        trace!(
            "UIData: mode {:?}, rows {}, widths {:?}, scroll {}/{}",
            data.mode,
            data.rows.len(),
            data.widths,
            data.scroll_offset,
            data.max_scroll
        );
        data
    }

    fn build_normal_view(&self) -> UIData {
        let (width, height) = self.terminal_size();
        let table = self.table();
        let rows = table.row_slices(&self.active_row_indices());

        let mut widths = calculate_column_widths(&rows, width);
        let focused = self.current_column();
        if self.auto_expand()
            && widths
                .get(focused)
                .is_some_and(|&w| column_has_truncated_cells(&rows, focused, w))
        {
            widths = calculate_column_widths_with_auto_expand(&rows, width, focused, &widths);
        }

        let visible = visible_rows(height, ScrollRegime::Normal);
        let window = page(&rows, self.scroll_offset(), visible);
        let mut data = framed(&rows, &window, widths);
        data.selected_column = Some(focused);
        data.marked_columns = self.selected_columns();
        data.scroll_offset = self.scroll_offset();
        data.max_scroll = self.max_scroll();
        data.visible_rows = visible;
        data.nrows = rows.len() - 1;
        data.help = HELP_NORMAL;
        data
    }

    fn build_filter_view(&self) -> UIData {
        let (width, height) = self.terminal_size();
        let table = self.table();
        let rows = table.row_slices(self.filtered_row_indices());
        // Widths come from the whole table so columns do not jump while typing
        let widths = calculate_column_widths(table.rows(), width);

        let offset = self.filter().map(|f| f.scroll_offset).unwrap_or(0);
        let visible = visible_rows(height, ScrollRegime::Filter);
        let window = page(&rows, offset, visible);
        let mut data = framed(&rows, &window, widths);
        data.filter_column = self.filter().map(|f| f.column);
        data.scroll_offset = offset;
        data.max_scroll = self.max_filter_scroll();
        data.visible_rows = visible;
        data.nrows = rows.len() - 1;
        data.help = HELP_FILTER;
        data
    }

    fn build_zoom_view(&self) -> UIData {
        let (width, height) = self.terminal_size();
        let table = self.table();
        let columns = self.selected_columns();
        let zoomed: Vec<Vec<String>> = table
            .row_slices(&self.active_row_indices())
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|&c| row.get(c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        let widths = calculate_zoom_widths(&zoomed, width);

        let visible = visible_rows(height, ScrollRegime::Zoom);
        let window = page(&zoomed, self.scroll_offset(), visible);
        let mut data = framed(&zoomed, &window, widths);
        data.zoom_title = Some(format!(
            "Zoomed: {}",
            columns
                .iter()
                .map(|&c| table.column_name(c))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        data.scroll_offset = self.scroll_offset();
        data.max_scroll = self.max_scroll();
        data.visible_rows = visible;
        data.nrows = zoomed.len().saturating_sub(1);
        data.help = HELP_ZOOM;
        data
    }
}

/// Data rows `[offset, offset + visible)` of a header-first row list.
fn page<R: AsRef<[String]>>(rows: &[R], offset: usize, visible: usize) -> Vec<&[String]> {
    rows.iter()
        .skip(1 + offset)
        .take(visible)
        .map(|r| r.as_ref())
        .collect()
}

fn framed<R: AsRef<[String]>>(rows: &[R], window: &[&[String]], widths: Vec<usize>) -> UIData {
    let header = rows
        .first()
        .map(|h| truncate_rows(&[h.as_ref()], &widths).remove(0))
        .unwrap_or_default();
    UIData {
        header,
        rows: truncate_rows(window, &widths),
        widths,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{HELP_FILTER, Message, TableConfig, ViewMode};
    use crate::model::Model;
    use crate::table::Table;

    fn processes() -> Table {
        Table::from(vec![
            vec!["PID", "USER", "COMMAND"],
            vec!["1", "root", "/sbin/init splash"],
            vec!["412", "postgres", "postgres: checkpointer process with a long tail"],
            vec!["977", "www-data", "nginx: worker process"],
        ])
    }

    fn numbered(rows: usize) -> Table {
        let mut data = vec![vec!["ID".to_string(), "VALUE".to_string()]];
        data.extend((1..=rows).map(|i| vec![i.to_string(), format!("value-{i}")]));
        Table::new(data)
    }

    fn replay(model: Model, messages: &[Message]) -> Model {
        messages.iter().fold(model, |m, &msg| m.update(msg))
    }

    #[test]
    fn normal_view_fits_the_terminal() {
        let m = Model::init(processes(), &TableConfig::default(), 50, 24);
        let ui = m.ui_data();
        assert_eq!(ui.mode, ViewMode::Normal);
        assert_eq!(ui.header, vec!["PID", "USER", "COMMAND"]);
        assert_eq!(ui.rows.len(), 3);
        // 50 - 10 overhead
        assert_eq!(ui.widths, vec![4, 11, 25]);
        assert!(ui.rows[1][2].ends_with("..."));
        assert_eq!(ui.selected_column, Some(0));
    }

    #[test]
    fn auto_expand_widens_the_focused_column() {
        let config = TableConfig::default().with_auto_expand(true);
        let m = Model::init(processes(), &config, 40, 24);
        let plain = Model::init(processes(), &TableConfig::default(), 40, 24);
        let (m, plain) = (m.update(Message::MoveRight), plain.update(Message::MoveRight));

        let expanded = m.ui_data();
        let normal = plain.ui_data();
        assert_eq!(normal.widths[1], 8);
        assert!(expanded.auto_expand);
        assert_eq!(expanded.widths, normal.widths);

        // Only the minimum widths fit, COMMAND takes what USER can give up
        let (m, plain) = (m.update(Message::MoveRight), plain.update(Message::MoveRight));
        assert_eq!(plain.ui_data().widths, vec![3, 8, 20]);
        assert_eq!(m.ui_data().widths, vec![3, 5, 23]);
    }

    #[test]
    fn scrolled_window() {
        let m = replay(
            Model::init(numbered(50), &TableConfig::default(), 80, 16),
            &[Message::MoveDown, Message::MoveDown],
        );
        let ui = m.ui_data();
        assert_eq!(ui.visible_rows, 10);
        assert_eq!(ui.rows.len(), 10);
        assert_eq!(ui.rows[0][0], "3");
        assert_eq!(ui.scroll_offset, 2);
        assert_eq!(ui.max_scroll, 40);
        assert_eq!(ui.nrows, 50);
    }

    #[test]
    fn filter_view_reports_query_and_matches() {
        let m = replay(
            Model::init(processes(), &TableConfig::default(), 80, 24),
            &[Message::MoveRight, Message::Filter, Message::Input('o')],
        );
        let ui = m.ui_data();
        assert_eq!(ui.mode, ViewMode::Filter);
        assert_eq!(ui.filter_column, Some(1));
        assert_eq!(ui.filter_column_name, "USER");
        assert_eq!(ui.filter_input, "o");
        assert_eq!(ui.match_count, 2);
        assert_eq!(ui.rows.len(), 2);
        assert_eq!(ui.help, HELP_FILTER);
    }

    #[test]
    fn zoom_view_shows_selected_columns() {
        let m = replay(
            Model::init(processes(), &TableConfig::default(), 80, 24),
            &[
                Message::MoveRight,
                Message::MoveRight,
                Message::ToggleSelection,
                Message::MoveLeft,
                Message::MoveLeft,
                Message::ToggleSelection,
                Message::Enter,
            ],
        );
        let ui = m.ui_data();
        assert_eq!(ui.mode, ViewMode::Zoom);
        assert_eq!(ui.header, vec!["PID", "COMMAND"]);
        assert_eq!(ui.zoom_title.as_deref(), Some("Zoomed: PID, COMMAND"));
        // Fits untruncated in 80 columns
        assert_eq!(ui.widths, vec![3, 47]);
    }

    #[test]
    fn empty_table_has_nothing_to_show() {
        let ui = Model::init(Table::default(), &TableConfig::default(), 80, 24).ui_data();
        assert!(ui.header.is_empty());
        assert!(ui.rows.is_empty());
    }
}
