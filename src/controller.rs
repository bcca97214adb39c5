use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{Message, TVError, TableConfig, ViewMode};
use crate::model::Model;

/// Turns terminal events into [`Message`]s.
pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &TableConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, TVError> {
        if !event::poll(Duration::from_millis(self.event_poll_time))? {
            return Ok(None);
        }
        let message = match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                Self::handle_key(model.view_mode(), key)
            }
            Event::Resize(width, height) => Some(Message::Resize(width as usize, height as usize)),
            _ => None,
        };
        Ok(message)
    }

    /// While filtering, printable keys are part of the query.
    pub fn handle_key(mode: ViewMode, key: KeyEvent) -> Option<Message> {
        let message = match mode {
            ViewMode::Filter => Self::handle_filter_key(key),
            ViewMode::Normal | ViewMode::Zoom => Self::handle_table_key(key),
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }

    fn handle_table_key(key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Message::Quit),
                KeyCode::Char('o') => Some(Message::Export),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Esc => Some(Message::Quit),
            KeyCode::Char('q') => Some(Message::Exit),
            KeyCode::Char('f' | 'F') => Some(Message::Filter),
            KeyCode::Char('c' | 'C') => Some(Message::ClearFilter),
            KeyCode::Char('o' | 'O') => Some(Message::Export),
            KeyCode::Left | KeyCode::Char('h') => Some(Message::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::MoveRight),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::PageUp => Some(Message::MovePageUp),
            KeyCode::PageDown => Some(Message::MovePageDown),
            KeyCode::Char('s' | 'S') => Some(Message::ToggleSelection),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Enter),
            _ => None,
        }
    }

    fn handle_filter_key(key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Message::Quit),
                KeyCode::Char('o') => Some(Message::Export),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Esc => Some(Message::Cancel),
            KeyCode::Enter => Some(Message::Enter),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Up => Some(Message::MoveUp),
            KeyCode::Down => Some(Message::MoveDown),
            KeyCode::PageUp => Some(Message::MovePageUp),
            KeyCode::PageDown => Some(Message::MovePageDown),
            KeyCode::Char(c) if !c.is_control() => Some(Message::Input(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn table_keys() {
        let cases = [
            (key(KeyCode::Esc), Message::Quit),
            (ctrl('c'), Message::Quit),
            (key(KeyCode::Char('q')), Message::Exit),
            (key(KeyCode::Char('F')), Message::Filter),
            (key(KeyCode::Char('c')), Message::ClearFilter),
            (key(KeyCode::Char('o')), Message::Export),
            (key(KeyCode::Char('h')), Message::MoveLeft),
            (key(KeyCode::Right), Message::MoveRight),
            (key(KeyCode::Char('k')), Message::MoveUp),
            (key(KeyCode::Down), Message::MoveDown),
            (key(KeyCode::PageUp), Message::MovePageUp),
            (key(KeyCode::PageDown), Message::MovePageDown),
            (key(KeyCode::Char('s')), Message::ToggleSelection),
            (key(KeyCode::Char(' ')), Message::Enter),
            (key(KeyCode::Enter), Message::Enter),
        ];
        for (event, expected) in cases {
            assert_eq!(Controller::handle_key(ViewMode::Normal, event), Some(expected));
            assert_eq!(Controller::handle_key(ViewMode::Zoom, event), Some(expected));
        }
        assert_eq!(Controller::handle_key(ViewMode::Normal, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn filter_keys() {
        let cases = [
            (key(KeyCode::Esc), Some(Message::Cancel)),
            (key(KeyCode::Enter), Some(Message::Enter)),
            (key(KeyCode::Backspace), Some(Message::Backspace)),
            (key(KeyCode::Up), Some(Message::MoveUp)),
            (key(KeyCode::PageDown), Some(Message::MovePageDown)),
            (key(KeyCode::Char('q')), Some(Message::Input('q'))),
            (key(KeyCode::Char('j')), Some(Message::Input('j'))),
            (key(KeyCode::Char('o')), Some(Message::Input('o'))),
            (ctrl('o'), Some(Message::Export)),
            (ctrl('c'), Some(Message::Quit)),
            (key(KeyCode::Left), None),
        ];
        for (event, expected) in cases {
            assert_eq!(Controller::handle_key(ViewMode::Filter, event), expected, "{event:?}");
        }
    }
}
