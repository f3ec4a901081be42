//! Owns the pane set drawn on the terminal surface.
//!
//! Panes are plain values: creating one records its geometry, focus and title;
//! `refresh` draws its border and returns the interior. Menu and content panes
//! are destroyed and recreated whenever the screen size or focus changes so a
//! border color can never go stale.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Focus;
use crate::theme::{ColorRole, Theme};

pub const DEFAULT_MENU_WIDTH: u16 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Menu,
    Content,
    /// Modal overlay; `fill` colors border and background alike.
    Dialog { fill: ColorRole },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    pub kind: PaneKind,
    pub area: Rect,
    pub focused: bool,
    pub title: String,
}

impl Pane {
    #[must_use]
    pub fn border_role(&self) -> ColorRole {
        match self.kind {
            PaneKind::Dialog { fill } => fill,
            _ if self.focused => ColorRole::BorderActive,
            _ => ColorRole::BorderInactive,
        }
    }

    /// Interior rectangle inside the one-cell border.
    #[must_use]
    pub fn inner(&self) -> Rect {
        Rect {
            x: self.area.x.saturating_add(1),
            y: self.area.y.saturating_add(1),
            width: self.area.width.saturating_sub(2),
            height: self.area.height.saturating_sub(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneHandle(usize);

/// Handles and regions of the always-present screen furniture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainPanes {
    pub menu: PaneHandle,
    pub content: PaneHandle,
    pub status: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MainKey {
    screen: Rect,
    focus: Focus,
    title: String,
}

#[derive(Debug, Default)]
pub struct Compositor {
    slots: Vec<Option<Pane>>,
    main: Option<(MainKey, MainPanes)>,
    menu_width: u16,
}

impl Compositor {
    #[must_use]
    pub fn new(menu_width: u16) -> Self {
        Self {
            slots: Vec::new(),
            main: None,
            menu_width,
        }
    }

    pub fn create_pane(
        &mut self,
        kind: PaneKind,
        origin: (u16, u16),
        size: (u16, u16),
        focused: bool,
        title: impl Into<String>,
    ) -> PaneHandle {
        let pane = Pane {
            kind,
            area: Rect::new(origin.0, origin.1, size.0, size.1),
            focused,
            title: title.into(),
        };
        if let Some(idx) = self.slots.iter().position(Option::is_none) {
            self.slots[idx] = Some(pane);
            PaneHandle(idx)
        } else {
            self.slots.push(Some(pane));
            PaneHandle(self.slots.len() - 1)
        }
    }

    pub fn destroy(&mut self, handle: PaneHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0) {
            *slot = None;
        }
    }

    #[must_use]
    pub fn pane(&self, handle: PaneHandle) -> Option<&Pane> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn live_panes(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Draw the pane's border and title; returns its interior.
    pub fn refresh(&self, handle: PaneHandle, f: &mut Frame, theme: &Theme) -> Option<Rect> {
        let pane = self.pane(handle)?;
        let border = theme.style(pane.border_role());
        if matches!(pane.kind, PaneKind::Dialog { .. }) {
            f.render_widget(Clear, pane.area);
        }
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border);
        if matches!(pane.kind, PaneKind::Dialog { .. }) {
            block = block.style(border);
        }
        if !pane.title.is_empty() {
            block = block.title(Line::from(Span::styled(
                format!(" {} ", pane.title),
                border,
            )));
        }
        f.render_widget(block, pane.area);
        Some(pane.inner())
    }

    /// Menu and content panes for `screen`, recreated if size, focus or title changed.
    pub fn main_panes(&mut self, screen: Rect, focus: Focus, title: &str) -> MainPanes {
        let key = MainKey {
            screen,
            focus,
            title: title.to_string(),
        };
        if let Some((current, panes)) = &self.main {
            if *current == key {
                return *panes;
            }
        }
        if let Some((_, old)) = self.main.take() {
            self.destroy(old.menu);
            self.destroy(old.content);
        }
        let regions = split_screen(screen, self.menu_width);
        let menu = self.create_pane(
            PaneKind::Menu,
            (regions.menu.x, regions.menu.y),
            (regions.menu.width, regions.menu.height),
            focus == Focus::Menu,
            "LazyWP",
        );
        let content = self.create_pane(
            PaneKind::Content,
            (regions.content.x, regions.content.y),
            (regions.content.width, regions.content.height),
            focus == Focus::Content,
            title,
        );
        let panes = MainPanes {
            menu,
            content,
            status: regions.status,
        };
        self.main = Some((key, panes));
        panes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRegions {
    pub menu: Rect,
    pub content: Rect,
    pub status: Rect,
}

/// Menu column on the left, content on the right, one status row at the bottom.
#[must_use]
pub fn split_screen(area: Rect, menu_width: u16) -> ScreenRegions {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(menu_width), Constraint::Min(3)])
        .split(rows[0]);
    ScreenRegions {
        menu: cols[0],
        content: cols[1],
        status: rows[1],
    }
}

/// Center a `width` x `height` box on `screen`, shrinking it to fit.
#[must_use]
pub fn centered_box(width: u16, height: u16, screen: Rect) -> Rect {
    let w = width.min(screen.width);
    let h = height.min(screen.height);
    Rect {
        x: screen.x + screen.width.saturating_sub(w) / 2,
        y: screen.y + screen.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    }
}

pub fn render_status_bar(text: &str, area: Rect, f: &mut Frame, theme: &Theme) {
    let style: Style = theme.style(ColorRole::StatusBar);
    let width = usize::from(area.width);
    let para = Paragraph::new(Line::from(Span::styled(format!("{text:<width$}"), style)));
    f.render_widget(Clear, area);
    f.render_widget(para, area);
}
