//! Modal dialogs: message, confirm and single-line input.
//!
//! Dialogs do not run input loops of their own. The controller keeps at most
//! one open dialog as a sub-state and feeds it keys through
//! [`Dialog::handle_key`] until it reports a terminal result.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::components::input::{EditSignal, LineInput};
use crate::compositor::{Compositor, PaneKind, centered_box};
use crate::theme::{ColorRole, Theme};

/// Minimum outer width of dialogs that carry interactive controls.
pub const MIN_INTERACTIVE_WIDTH: u16 = 17;

/// Border plus one column of padding on each side.
const H_CHROME: u16 = 4;
/// Top and bottom border.
const V_CHROME: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmFocus {
    Yes,
    No,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub focus: ConfirmFocus,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            focus: ConfirmFocus::Yes,
        }
    }
}

impl ConfirmDialog {
    /// Left focuses `Yes`, right focuses `No`, enter answers; everything else is ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Left => self.focus = ConfirmFocus::Yes,
            KeyCode::Right => self.focus = ConfirmFocus::No,
            KeyCode::Enter => return Some(self.focus == ConfirmFocus::Yes),
            _ => {}
        }
        None
    }
}

#[derive(Debug, Clone)]
pub enum DialogKind {
    Message,
    Confirm(ConfirmDialog),
    Input(LineInput),
}

/// Result of feeding one key to the open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Pending,
    Dismissed,
    Confirmed(bool),
    Submitted(String),
}

#[derive(Debug, Clone)]
pub struct Dialog {
    pub lines: Vec<String>,
    pub kind: DialogKind,
}

impl Dialog {
    pub fn message<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            kind: DialogKind::Message,
        }
    }

    pub fn confirm<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            kind: DialogKind::Confirm(ConfirmDialog::default()),
        }
    }

    pub fn input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            kind: DialogKind::Input(LineInput::new()),
        }
    }

    #[must_use]
    pub fn fill_role(&self) -> ColorRole {
        match self.kind {
            DialogKind::Message => ColorRole::MessageBox,
            DialogKind::Confirm(_) => ColorRole::ConfirmBox,
            DialogKind::Input(_) => ColorRole::InputBox,
        }
    }

    /// A message dialog is closed by any key; the others by enter only.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult {
        match &mut self.kind {
            DialogKind::Message => DialogResult::Dismissed,
            DialogKind::Confirm(confirm) => match confirm.handle_key(key) {
                Some(answer) => DialogResult::Confirmed(answer),
                None => DialogResult::Pending,
            },
            DialogKind::Input(input) => match input.handle_key(key) {
                EditSignal::Done(text) => DialogResult::Submitted(text),
                EditSignal::Editing => DialogResult::Pending,
            },
        }
    }

    /// Unclamped outer size: longest line plus chrome, plus a control row.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        let longest = self
            .lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let longest = u16::try_from(longest).unwrap_or(u16::MAX);
        let lines = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        let width = longest.saturating_add(H_CHROME);
        match self.kind {
            DialogKind::Message => (width, lines.saturating_add(V_CHROME)),
            // blank spacer row plus the control row
            DialogKind::Confirm(_) | DialogKind::Input(_) => (
                width.max(MIN_INTERACTIVE_WIDTH),
                lines.saturating_add(V_CHROME + 2),
            ),
        }
    }

    /// Bounding box centered on `screen` and clamped to fit it.
    #[must_use]
    pub fn area(&self, screen: Rect) -> Rect {
        let (width, height) = self.size();
        centered_box(width, height, screen)
    }

    pub fn render(&mut self, f: &mut Frame, compositor: &mut Compositor, theme: &Theme) {
        let area = self.area(f.area());
        if area.width < 3 || area.height < 3 {
            return;
        }
        let fill = self.fill_role();
        let handle = compositor.create_pane(
            PaneKind::Dialog { fill },
            (area.x, area.y),
            (area.width, area.height),
            true,
            "",
        );
        let Some(inner) = compositor.refresh(handle, f, theme) else {
            return;
        };
        compositor.destroy(handle);

        let body = Rect {
            x: inner.x.saturating_add(1),
            width: inner.width.saturating_sub(2),
            ..inner
        };
        let style = theme.style(fill);
        let text: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), style)))
            .collect();
        f.render_widget(Paragraph::new(text).style(style), body);

        if matches!(self.kind, DialogKind::Message) || inner.height < 2 {
            return;
        }
        let control = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..body
        };
        match &mut self.kind {
            DialogKind::Message => {}
            DialogKind::Confirm(confirm) => render_buttons(f, control, confirm.focus, theme),
            DialogKind::Input(input) => {
                input.set_style(theme.style(ColorRole::InputField));
                input.render(f, control);
            }
        }
    }
}

fn render_buttons(f: &mut Frame, area: Rect, focus: ConfirmFocus, theme: &Theme) {
    let role = |which: ConfirmFocus| {
        if which == focus {
            ColorRole::ConfirmButtonFocus
        } else {
            ColorRole::ConfirmButton
        }
    };
    let buttons = Line::from(vec![
        Span::styled(" Yes ", theme.style(role(ConfirmFocus::Yes))),
        Span::styled("   ", theme.style(ColorRole::ConfirmBox)),
        Span::styled(" No ", theme.style(role(ConfirmFocus::No))),
    ])
    .centered();
    f.render_widget(Paragraph::new(buttons), area);
}
