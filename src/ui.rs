use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, Table as TableWidget},
};

use crate::domain::ViewMode;
use crate::layout::{calculate_column_widths, truncate_rows};
use crate::model::{Model, UIData};
use crate::table::Table;

/// Gap between columns, matches the `" | "` in the width overhead.
const COLUMN_SPACING: u16 = 3;

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub focused: Style,
    pub marked: Style,
    pub filter_column: Style,
    pub status: Style,
    pub filter_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::new().add_modifier(Modifier::BOLD),
            focused: Style::new().fg(Color::Black).bg(Color::Cyan),
            marked: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            filter_column: Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            status: Style::new().fg(Color::DarkGray),
            filter_bar: Style::new().fg(Color::Green),
        }
    }
}

#[derive(Debug, Default)]
pub struct TableUI {
    theme: Theme,
}

impl TableUI {
    pub fn draw(&self, model: &Model, frame: &mut Frame) {
        let data = model.ui_data();
        self.draw_data(&data, frame);
    }

    pub fn draw_data(&self, data: &UIData, frame: &mut Frame) {
        let show_filter_line = data.mode == ViewMode::Filter || data.filter_applied;
        let [table_area, filter_area, status_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(u16::from(show_filter_line)),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_table(data, table_area, frame);
        if show_filter_line {
            frame.render_widget(
                Paragraph::new(filter_line(data)).style(self.theme.filter_bar),
                filter_area,
            );
        }
        frame.render_widget(
            Paragraph::new(status_line(data)).style(self.theme.status),
            status_area,
        );
    }

    fn draw_table(&self, data: &UIData, area: Rect, frame: &mut Frame) {
        let header = Row::new(
            data.header
                .iter()
                .enumerate()
                .map(|(idx, name)| Cell::from(name.as_str()).style(self.column_style(data, idx))),
        )
        .style(self.theme.header)
        .bottom_margin(1);

        let rows = data.rows.iter().map(|row| {
            Row::new(row.iter().enumerate().map(|(idx, cell)| {
                let style = match data.selected_column {
                    Some(focused) if focused == idx => self.theme.focused,
                    _ => self.column_style(data, idx),
                };
                Cell::from(cell.as_str()).style(style)
            }))
        });

        let widths = data
            .widths
            .iter()
            .map(|&w| Constraint::Length(u16::try_from(w).unwrap_or(u16::MAX)));

        let mut block = Block::bordered();
        if let Some(title) = &data.zoom_title {
            block = block.title(Line::from(format!(" {title} ")).bold().centered());
        }

        let table = TableWidget::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .block(block);
        frame.render_widget(table, area);
    }

    fn column_style(&self, data: &UIData, column: usize) -> Style {
        if data.filter_column == Some(column) {
            self.theme.filter_column
        } else if data.marked_columns.contains(&column) {
            self.theme.marked
        } else {
            Style::default()
        }
    }
}

fn filter_line(data: &UIData) -> String {
    if data.mode == ViewMode::Filter {
        format!(
            "Filter [{}]: {}_  ({} matches)",
            data.filter_column_name, data.filter_input, data.match_count
        )
    } else {
        format!(
            "Filtered on {}: \"{}\" ({} of {} rows) | c: clear",
            data.filter_column_name, data.filter_input, data.match_count, data.total_rows
        )
    }
}

fn status_line(data: &UIData) -> String {
    let mut parts = vec![if data.rows.is_empty() {
        format!("Rows 0 of {}", data.nrows)
    } else {
        format!(
            "Rows {}-{} of {}",
            data.scroll_offset + 1,
            data.scroll_offset + data.rows.len(),
            data.nrows
        )
    }];
    if data.selected_count > 0 {
        parts.push(format!("Selected: {}", data.selected_count));
    }
    if data.auto_expand {
        parts.push("AUTO-EXPAND".to_string());
    }
    if data.filter_applied {
        parts.push("FILTERED".to_string());
    }
    parts.push(data.help.to_string());
    parts.join(" | ")
}

/// Static bordered rendering of the whole table, fitted to `terminal_width`.
pub fn render_plain(table: &Table, terminal_width: usize) -> String {
    if table.is_empty() {
        return String::new();
    }
    let widths = calculate_column_widths(table.rows(), terminal_width);
    let rows = truncate_rows(table.rows(), &widths);

    let mut out = vec![border(&widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(col, &width)| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format!(" {cell:<width$} ")
            })
            .collect();
        out.push(format!("│{}│", cells.join("│")));
        if idx == 0 {
            out.push(border(&widths, '├', '┼', '┤'));
        }
    }
    out.push(border(&widths, '└', '┴', '┘'));
    out.join("\n")
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&middle.to_string()))
}
