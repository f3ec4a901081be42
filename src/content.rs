//! Pre-formatted content lines and the scrollable pane that shows them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::{ColorRole, Theme};

/// One rendered line plus its color role. Produced fresh on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub text: String,
    pub role: Option<ColorRole>,
}

impl ContentLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: None,
        }
    }

    pub fn styled(text: impl Into<String>, role: ColorRole) -> Self {
        Self {
            text: text.into(),
            role: Some(role),
        }
    }

    #[must_use]
    pub fn role_or_default(&self) -> ColorRole {
        self.role.unwrap_or(ColorRole::Default)
    }
}

/// Vertical scroll state for a viewport over `total` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scroller {
    pub offset: usize,
    pub viewport: usize,
    pub total: usize,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new()
    }
}

impl Scroller {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            viewport: 1,
            total: 0,
        }
    }

    pub fn set_viewport(&mut self, height: usize) {
        self.viewport = height.max(1);
        self.clamp();
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp();
    }

    #[must_use]
    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn line_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn line_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        let step = self.viewport.saturating_sub(1).max(1);
        self.offset = self.offset.saturating_sub(step);
    }

    pub fn page_down(&mut self) {
        let step = self.viewport.saturating_sub(1).max(1);
        self.offset = (self.offset + step).min(self.max_offset());
    }

    /// Scroll just enough to bring `line` into view.
    pub fn reveal(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + self.viewport {
            self.offset = line + 1 - self.viewport;
        }
        self.clamp();
    }
}

/// The slice of `lines` visible from `offset` in a viewport `height` rows tall.
#[must_use]
pub fn visible_lines(lines: &[ContentLine], offset: usize, height: usize) -> &[ContentLine] {
    let start = offset.min(lines.len());
    let end = start.saturating_add(height).min(lines.len());
    &lines[start..end]
}

/// Draw `lines` into `area` starting at `offset`. Lines are clipped, never wrapped.
pub fn render(f: &mut Frame, area: Rect, lines: &[ContentLine], offset: usize, theme: &Theme) {
    let shown: Vec<Line> = visible_lines(lines, offset, usize::from(area.height))
        .iter()
        .map(|l| {
            let style = theme.style(l.role_or_default());
            // Pad to the pane width so highlighted rows span the whole line.
            let width = usize::from(area.width);
            Line::from(Span::styled(format!("{:<width$}", l.text), style))
        })
        .collect();
    f.render_widget(Paragraph::new(shown), area);
}
