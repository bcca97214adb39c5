/// The three screen layouts, differing in how many lines the chrome
/// (header, borders, help, filter bar, zoom title) takes away from data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRegime {
    Normal,
    Filter,
    Zoom,
}

impl ScrollRegime {
    pub fn reserved_lines(self) -> usize {
        match self {
            ScrollRegime::Normal => 6,
            ScrollRegime::Filter => 7,
            ScrollRegime::Zoom => 8,
        }
    }
}

/// Number of data rows that fit on screen, at least one.
pub fn visible_rows(terminal_height: usize, regime: ScrollRegime) -> usize {
    terminal_height.saturating_sub(regime.reserved_lines()).max(1)
}

pub fn page_size(terminal_height: usize, regime: ScrollRegime) -> usize {
    visible_rows(terminal_height, regime)
}

pub fn max_scroll(data_rows: usize, terminal_height: usize, regime: ScrollRegime) -> usize {
    data_rows.saturating_sub(visible_rows(terminal_height, regime))
}

/// Move `offset` by `delta` rows and clamp the result into `[0, max]`.
pub fn scroll_by(offset: usize, delta: isize, max: usize) -> usize {
    offset.saturating_add_signed(delta).min(max)
}
