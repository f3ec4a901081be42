use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{Input, Key, TextArea};

/// Outcome of feeding one key to a [`LineInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSignal {
    Editing,
    Done(String),
}

/// Single-line text entry on top of a `TextArea`.
///
/// The editor itself treats enter as a line break; here it is the terminate
/// signal, and the newline shortcuts are swallowed so the value stays one line.
#[derive(Debug, Clone)]
pub struct LineInput {
    textarea: TextArea<'static>,
}

impl Default for LineInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineInput {
    #[must_use]
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        Self { textarea }
    }

    pub fn set_style(&mut self, style: Style) {
        self.textarea.set_style(style);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditSignal {
        if key.code == KeyCode::Enter {
            return EditSignal::Done(self.value());
        }
        let input: Input = key.into();
        match input {
            Input {
                key: Key::Enter, ..
            }
            | Input {
                key: Key::Char('m' | 'j'),
                ctrl: true,
                ..
            } => {}
            input => {
                self.textarea.input(input);
            }
        }
        EditSignal::Editing
    }

    /// Current text, exactly as typed.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().concat()
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(&self.textarea, area);
    }
}
