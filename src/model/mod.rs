use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::domain::{Message, TableConfig, ViewMode};
use crate::layout::{ScrollRegime, max_scroll, page_size, scroll_by};
use crate::table::Table;

mod export;
mod filter;
mod views;

pub use filter::{FilterState, apply_fuzzy_filter, fuzzy_match};
pub use views::UIData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Quitting,
    /// Session ended with export text to hand back to the caller.
    Exporting,
}

/// The whole interactive session.
///
/// A model is only ever changed through [`Model::update`], which takes the
/// current state and a message and returns the next state. The table itself
/// is shared between states.
#[derive(Debug, Clone)]
pub struct Model {
    table: Arc<Table>,
    pub status: Status,
    view_mode: ViewMode,
    auto_expand: bool,
    width: usize,
    height: usize,
    current_column: usize,
    selected_columns: BTreeSet<usize>, // Ordered, zoom and export show columns in table order
    scroll_offset: usize,
    filter: Option<FilterState>,
    export: Option<String>,
}

impl Model {
    pub fn init(table: Table, config: &TableConfig, width: usize, height: usize) -> Self {
        info!(
            "Starting session with {} rows, {} columns on {}x{}",
            table.data_row_count(),
            table.column_count(),
            width,
            height
        );
        Self {
            table: Arc::new(table),
            status: Status::Running,
            view_mode: ViewMode::Normal,
            auto_expand: config.auto_expand,
            width,
            height,
            current_column: 0,
            selected_columns: BTreeSet::new(),
            scroll_offset: 0,
            filter: None,
            export: None,
        }
    }

    pub fn update(mut self, message: Message) -> Self {
        trace!("Update: mode {:?}, message {:?}", self.view_mode, message);
        if let Message::Resize(width, height) = message {
            self.ui_resize(width, height);
            return self;
        }

        match self.view_mode {
            ViewMode::Normal => match message {
                Message::Quit | Message::Exit => self.quit(),
                Message::Filter => self.enter_filter_mode(),
                Message::ClearFilter => self.clear_filter(),
                Message::Export => self.export(),
                Message::MoveLeft => self.move_column_left(),
                Message::MoveRight => self.move_column_right(),
                Message::MoveUp => self.scroll(-1),
                Message::MoveDown => self.scroll(1),
                Message::MovePageUp => self.scroll(-(self.page_size() as isize)),
                Message::MovePageDown => self.scroll(self.page_size() as isize),
                Message::ToggleSelection => self.toggle_selection(),
                Message::Enter => self.enter_zoom_mode(),
                _ => (),
            },
            ViewMode::Filter => match message {
                Message::Quit => self.quit(),
                Message::Cancel => self.cancel_filter(),
                Message::Enter => self.accept_filter(),
                Message::Backspace => self.filter_backspace(),
                Message::Input(c) => self.filter_input_char(c),
                Message::Export => self.export(),
                Message::MoveUp => self.scroll_filter(-1),
                Message::MoveDown => self.scroll_filter(1),
                Message::MovePageUp => self.scroll_filter(-(self.filter_page_size() as isize)),
                Message::MovePageDown => self.scroll_filter(self.filter_page_size() as isize),
                _ => (),
            },
            ViewMode::Zoom => match message {
                Message::Quit => self.quit(),
                Message::Exit => self.exit_zoom_mode(),
                Message::Export => self.export(),
                Message::MoveUp => self.scroll(-1),
                Message::MoveDown => self.scroll(1),
                Message::MovePageUp => self.scroll(-(self.page_size() as isize)),
                Message::MovePageDown => self.scroll(self.page_size() as isize),
                _ => (),
            },
        }
        self
    }

    // ------------------------------ Queries ------------------------------- //

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn auto_expand(&self) -> bool {
        self.auto_expand
    }

    pub fn terminal_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn current_column(&self) -> usize {
        self.current_column
    }

    /// Selected columns in ascending order.
    pub fn selected_columns(&self) -> Vec<usize> {
        self.selected_columns.iter().copied().collect()
    }

    pub fn is_selected(&self, column: usize) -> bool {
        self.selected_columns.contains(&column)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn filter(&self) -> Option<&FilterState> {
        self.filter.as_ref()
    }

    pub fn filter_active(&self) -> bool {
        self.filter.is_some()
    }

    pub fn filtered_row_indices(&self) -> &[usize] {
        self.filter.as_ref().map(|f| f.matches.as_slice()).unwrap_or(&[])
    }

    pub fn filter_input(&self) -> &str {
        self.filter.as_ref().map(|f| f.query.as_str()).unwrap_or("")
    }

    pub fn export_text(&self) -> Option<&str> {
        self.export.as_deref()
    }

    /// Rows currently shown: the filter matches, or every data row.
    pub fn active_row_indices(&self) -> Vec<usize> {
        match &self.filter {
            Some(filter) => filter.matches.clone(),
            None => self.table.all_data_indices(),
        }
    }

    pub fn visible_data_row_count(&self) -> usize {
        match &self.filter {
            Some(filter) => filter.matches.len(),
            None => self.table.data_row_count(),
        }
    }

    fn scroll_regime(&self) -> ScrollRegime {
        match self.view_mode {
            ViewMode::Zoom => ScrollRegime::Zoom,
            ViewMode::Normal | ViewMode::Filter => ScrollRegime::Normal,
        }
    }

    pub fn page_size(&self) -> usize {
        page_size(self.height, self.scroll_regime())
    }

    pub fn max_scroll(&self) -> usize {
        max_scroll(
            self.visible_data_row_count(),
            self.height,
            self.scroll_regime(),
        )
    }

    pub fn filter_page_size(&self) -> usize {
        page_size(self.height, ScrollRegime::Filter)
    }

    pub fn max_filter_scroll(&self) -> usize {
        max_scroll(
            self.filtered_row_indices().len(),
            self.height,
            ScrollRegime::Filter,
        )
    }

    // -------------------- Control handling functions ---------------------- //

    fn quit(&mut self) {
        debug!("Quitting in {:?} mode", self.view_mode);
        self.status = Status::Quitting;
    }

    fn export(&mut self) {
        let text = self.export_data();
        info!("Exporting {} lines", text.lines().count());
        self.export = Some(text);
        self.status = Status::Exporting;
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{}, h:{}->{}",
            self.width, width, self.height, height
        );
        self.width = width;
        self.height = height;
        self.clamp_scroll();
        let max_filter_scroll = self.max_filter_scroll();
        if let Some(filter) = self.filter.as_mut() {
            filter.scroll_offset = filter.scroll_offset.min(max_filter_scroll);
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    fn scroll(&mut self, delta: isize) {
        self.scroll_offset = scroll_by(self.scroll_offset, delta, self.max_scroll());
    }

    fn scroll_filter(&mut self, delta: isize) {
        let max = self.max_filter_scroll();
        if let Some(filter) = self.filter.as_mut() {
            filter.scroll_offset = scroll_by(filter.scroll_offset, delta, max);
        }
    }

    fn move_column_left(&mut self) {
        self.current_column = self.current_column.saturating_sub(1);
    }

    fn move_column_right(&mut self) {
        if self.current_column + 1 < self.table.column_count() {
            self.current_column += 1;
        }
    }

    fn toggle_selection(&mut self) {
        if self.current_column >= self.table.column_count() {
            return;
        }
        if !self.selected_columns.remove(&self.current_column) {
            self.selected_columns.insert(self.current_column);
        }
        trace!("Selected columns: {:?}", self.selected_columns);
    }

    fn enter_zoom_mode(&mut self) {
        if self.selected_columns.is_empty() {
            trace!("Nothing selected, not zooming");
            return;
        }
        self.view_mode = ViewMode::Zoom;
        self.scroll_offset = 0;
    }

    fn exit_zoom_mode(&mut self) {
        self.view_mode = ViewMode::Normal;
        self.scroll_offset = 0;
    }

    fn enter_filter_mode(&mut self) {
        trace!("Entering filter mode on column {}", self.current_column);
        self.filter = Some(FilterState::new(self.table.rows(), self.current_column));
        self.view_mode = ViewMode::Filter;
    }

    fn clear_filter(&mut self) {
        if self.filter.take().is_some() {
            debug!("Filter cleared");
            self.scroll_offset = 0;
        }
    }

    fn cancel_filter(&mut self) {
        self.filter = None;
        self.view_mode = ViewMode::Normal;
        self.clamp_scroll();
    }

    fn accept_filter(&mut self) {
        debug!(
            "Applying filter {:?} with {} matches",
            self.filter_input(),
            self.filtered_row_indices().len()
        );
        self.view_mode = ViewMode::Normal;
        self.clamp_scroll();
    }

    fn filter_backspace(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            filter.pop(self.table.rows());
        }
        self.clamp_scroll();
    }

    fn filter_input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(filter) = self.filter.as_mut() {
            filter.push(self.table.rows(), c);
        }
        self.clamp_scroll();
    }
}
