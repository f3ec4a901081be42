//! Navigation controller.
//!
//! [`App`] owns the navigation state, the open dialog and the compositor. Each
//! loop iteration re-reads the active module's content, draws the screen and
//! routes one key press. Dialogs are a sub-state: while one is open every key
//! goes to it, and when it closes the handler that opened it is called again
//! with the answer.

mod state;

pub use state::{Focus, NavigationState};

use anyhow::{Result, bail};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use tracing::{debug, error, info, warn};

use crate::components::Statusbar;
use crate::components::statusbar::GLOBAL_HINTS;
use crate::compositor::{Compositor, split_screen};
use crate::content::{self, ContentLine, Scroller};
use crate::dialog::{Dialog, DialogResult};
use crate::registry::{
    ActionEnv, ActionKind, Answer, CommandModule, Content, DispatchContext, Effect, GlobalNav,
    Notifier, Registry, Resolution,
};
use crate::source::ItemSource;
use crate::theme::{ColorRole, Theme};

/// Where keys currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    MenuFocused,
    ContentFocused,
    DialogOpen,
}

/// An action waiting for the answer of the open dialog.
#[derive(Debug, Clone)]
struct Pending {
    module: usize,
    action: ActionKind,
    ctx: DispatchContext,
}

struct OpenDialog {
    dialog: Dialog,
    pending: Option<Pending>,
}

/// Borrowed snapshot of what the main screen shows.
#[derive(Clone, Copy)]
struct ScreenView<'a> {
    registry: &'a Registry,
    state: NavigationState,
    content: &'a Content,
    theme: &'a Theme,
}

pub struct App {
    registry: Registry,
    state: NavigationState,
    source: Box<dyn ItemSource>,
    theme: Theme,
    compositor: Compositor,
    menu_width: u16,
    content: Content,
    content_module: usize,
    /// Content pane rectangle from the last refresh.
    viewport: Rect,
    dialog: Option<OpenDialog>,
    last_error: Option<String>,
    running: bool,
}

impl App {
    /// # Errors
    /// Fails when no command module is registered.
    pub fn new(
        registry: Registry,
        source: Box<dyn ItemSource>,
        theme: Theme,
        menu_width: u16,
    ) -> Result<Self> {
        if registry.is_empty() {
            bail!("no command modules registered");
        }
        Ok(Self {
            registry,
            state: NavigationState::new(),
            source,
            theme,
            compositor: Compositor::new(menu_width),
            menu_width,
            content: Content::default(),
            content_module: 0,
            viewport: Rect::default(),
            dialog: None,
            last_error: None,
            running: true,
        })
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref().map(|open| &open.dialog)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.dialog.is_some() {
            Mode::DialogOpen
        } else if self.state.focus == Focus::Menu {
            Mode::MenuFocused
        } else {
            Mode::ContentFocused
        }
    }

    fn active_module(&self) -> Option<&dyn CommandModule> {
        self.registry.get(self.state.active)
    }

    /// Run until the user quits.
    ///
    /// # Errors
    /// Propagates terminal I/O failures.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(modules = self.registry.len(), "entering main loop");
        while self.running {
            self.tick(terminal)?;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key, terminal)?;
                }
                Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                _ => {}
            }
        }
        info!("leaving main loop");
        Ok(())
    }

    /// Re-read content and draw one frame.
    ///
    /// # Errors
    /// Propagates terminal I/O failures.
    pub fn tick<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size()?;
        self.refresh(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| self.draw(f))?;
        Ok(())
    }

    /// Re-invoke the active module's content provider for a `screen`-sized terminal.
    ///
    /// Skipped while a dialog is open so the dialog keeps the screen it was opened on;
    /// the scroll offset is still re-clamped to the new viewport.
    pub fn refresh(&mut self, screen: Rect) {
        if self.dialog.is_some() {
            self.viewport = split_screen(screen, self.menu_width).content;
            self.follow_cursor();
            return;
        }
        self.reload(screen);
    }

    fn reload(&mut self, screen: Rect) {
        self.viewport = split_screen(screen, self.menu_width).content;
        let width = usize::from(self.viewport.width);
        let active = self.state.active;
        let Some(module) = self.registry.get(active) else {
            return;
        };
        match module.content(self.source.as_mut(), &self.state, width) {
            Ok(content) => {
                self.content = content;
                self.content_module = active;
                self.last_error = None;
            }
            Err(err) => {
                let summary = summarize(&err);
                error!(module = module.label(), error = %err, "content refresh failed");
                if self.content_module != active {
                    self.content = Content::default();
                    self.content_module = active;
                }
                if self.last_error.as_deref() != Some(summary.as_str()) {
                    self.open(Dialog::message([summary.clone()]), None);
                }
                self.last_error = Some(summary);
            }
        }
        self.state.reload = false;
        self.state.clamp_cursor(self.content.entry_count());
        self.follow_cursor();
    }

    fn content_height(&self) -> usize {
        usize::from(self.viewport.height.saturating_sub(2)).max(1)
    }

    fn scroller(&self) -> Scroller {
        Scroller {
            offset: self.state.scroll,
            viewport: self.content_height(),
            total: self.content.lines.len(),
        }
    }

    /// Scroll so the cursor row is visible, then clamp.
    fn follow_cursor(&mut self) {
        let mut scroller = self.scroller();
        if !self.content.is_empty() {
            let line = if self.state.cursor == 0 {
                0
            } else {
                self.content.line_of_entry(self.state.cursor)
            };
            scroller.reveal(line);
        }
        scroller.clamp();
        self.state.scroll = scroller.offset;
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let view = ScreenView {
            registry: &self.registry,
            state: self.state,
            content: &self.content,
            theme: &self.theme,
        };
        draw_screen(f, &mut self.compositor, &view);
        if let Some(open) = &mut self.dialog {
            open.dialog.render(f, &mut self.compositor, &self.theme);
        }
    }

    fn open(&mut self, dialog: Dialog, pending: Option<Pending>) {
        if self.dialog.is_some() {
            debug!("replacing open dialog");
        }
        self.dialog = Some(OpenDialog { dialog, pending });
    }

    /// Route one key press.
    ///
    /// `terminal` is used by action handlers to draw progress notices while
    /// they block on the item source.
    ///
    /// # Errors
    /// Propagates terminal I/O failures.
    pub fn handle_key<B: Backend>(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if let Some(mut open) = self.dialog.take() {
            let answer = match open.dialog.handle_key(key) {
                DialogResult::Pending => {
                    self.dialog = Some(open);
                    return Ok(());
                }
                DialogResult::Dismissed => return Ok(()),
                DialogResult::Confirmed(yes) => Answer::Confirmed(yes),
                DialogResult::Submitted(text) => Answer::Text(text),
            };
            if let Some(pending) = open.pending {
                self.perform(pending, answer, terminal)?;
            }
            return Ok(());
        }

        match self
            .registry
            .resolve(self.state.active, self.state.focus, key)
        {
            Resolution::Global(nav) => self.navigate(nav),
            Resolution::Action(action) => self.dispatch(action, terminal)?,
            Resolution::None => debug!(?key, "unbound key"),
        }
        Ok(())
    }

    fn navigate(&mut self, nav: GlobalNav) {
        let entries = self.content.entry_count();
        match (nav, self.state.focus) {
            (GlobalNav::ToggleFocus, _) => self.state.toggle_focus(),
            (GlobalNav::Quit, _) => self.running = false,
            (GlobalNav::Help, _) => {
                let lines = self.help_lines();
                self.open(Dialog::message(lines), None);
            }
            (GlobalNav::Up, Focus::Menu) => self.state.hover_up(),
            (GlobalNav::Down, Focus::Menu) => self.state.hover_down(self.registry.len()),
            (GlobalNav::Select, Focus::Menu) => {
                let module = self.state.menu_hover;
                if module != self.state.active {
                    self.last_error = None;
                }
                debug!(module, "module selected");
                self.state.select_module(module);
            }
            (GlobalNav::Up, Focus::Content) if entries > 0 => {
                self.state.cursor_up();
                self.follow_cursor();
            }
            (GlobalNav::Down, Focus::Content) if entries > 0 => {
                self.state.cursor_down(entries);
                self.follow_cursor();
            }
            (GlobalNav::PageUp, Focus::Content) if entries > 0 => {
                let step = self.content_height().saturating_sub(1).max(1);
                self.state.cursor = self.state.cursor.saturating_sub(step);
                self.follow_cursor();
            }
            (GlobalNav::PageDown, Focus::Content) if entries > 0 => {
                let step = self.content_height().saturating_sub(1).max(1);
                self.state.cursor = (self.state.cursor + step).min(entries - 1);
                self.follow_cursor();
            }
            (
                GlobalNav::Up | GlobalNav::Down | GlobalNav::PageUp | GlobalNav::PageDown,
                Focus::Content,
            ) => {
                let mut scroller = self.scroller();
                match nav {
                    GlobalNav::Up => scroller.line_up(),
                    GlobalNav::Down => scroller.line_down(),
                    GlobalNav::PageUp => scroller.page_up(),
                    _ => scroller.page_down(),
                }
                self.state.scroll = scroller.offset;
            }
            (GlobalNav::PageUp | GlobalNav::PageDown | GlobalNav::Select, _) => {}
        }
    }

    fn help_lines(&self) -> Vec<String> {
        let mut lines = vec!["Keys".to_string(), String::new()];
        lines.extend(GLOBAL_HINTS.iter().map(ToString::to_string));
        lines.push("arrows/PgUp/PgDn: move".to_string());
        lines.push("enter: open module".to_string());
        if let Some(module) = self.active_module() {
            if !module.bindings().is_empty() {
                lines.push(String::new());
                lines.push(module.label().to_string());
                lines.extend(
                    module
                        .bindings()
                        .iter()
                        .map(|b| format!("{}: {}", b.key, b.description)),
                );
            }
        }
        lines
    }

    fn dispatch<B: Backend>(
        &mut self,
        action: ActionKind,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let ctx = self.content.dispatch_context(self.state.cursor);
        if action.needs_selection() && ctx.selected.is_none() {
            debug!(?action, "nothing selected, ignoring action");
            return Ok(());
        }
        let pending = Pending {
            module: self.state.active,
            action,
            ctx,
        };
        self.perform(pending, Answer::Start, terminal)
    }

    fn perform<B: Backend>(
        &mut self,
        pending: Pending,
        answer: Answer,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let Some(module) = self.registry.get(pending.module) else {
            return Ok(());
        };
        debug!(module = module.label(), action = ?pending.action, ?answer, "performing action");
        let mut reload = false;
        let outcome = {
            let view = ScreenView {
                registry: &self.registry,
                state: self.state,
                content: &self.content,
                theme: &self.theme,
            };
            let mut notifier = TerminalNotifier {
                terminal: &mut *terminal,
                compositor: &mut self.compositor,
                view,
            };
            let mut env = ActionEnv::new(self.source.as_mut(), &mut notifier, &mut reload);
            module.perform(pending.action, answer, &pending.ctx, &mut env)
        };

        match outcome {
            Ok(effect) => {
                self.state.reload |= reload;
                match effect {
                    Effect::Done => {}
                    Effect::Message(lines) => self.open(Dialog::message(lines), None),
                    Effect::Confirm(lines) => self.open(Dialog::confirm(lines), Some(pending)),
                    Effect::Input(lines) => self.open(Dialog::input(lines), Some(pending)),
                }
            }
            Err(err) => {
                error!(action = ?pending.action, error = %err, "action failed");
                self.open(Dialog::message([summarize(&err)]), None);
            }
        }

        if self.state.reload {
            let size = terminal.size()?;
            self.reload(Rect::new(0, 0, size.width, size.height));
        }
        Ok(())
    }
}

fn summarize(err: &anyhow::Error) -> String {
    err.to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Menu, content and status bar; everything but the dialog.
fn draw_screen(f: &mut Frame, compositor: &mut Compositor, view: &ScreenView<'_>) {
    let Some(module) = view.registry.get(view.state.active) else {
        return;
    };
    let panes = compositor.main_panes(f.area(), view.state.focus, module.label());
    if let Some(inner) = compositor.refresh(panes.menu, f, view.theme) {
        let highlighted = match view.state.focus {
            Focus::Menu => view.state.menu_hover,
            Focus::Content => view.state.active,
        };
        let entries: Vec<ContentLine> = view
            .registry
            .iter()
            .enumerate()
            .map(|(idx, m)| {
                let text = format!(" {}", m.menu_name());
                if idx == highlighted {
                    ContentLine::styled(text, ColorRole::MenuActive)
                } else {
                    ContentLine::plain(text)
                }
            })
            .collect();
        content::render(f, inner, &entries, 0, view.theme);
    }
    if let Some(inner) = compositor.refresh(panes.content, f, view.theme) {
        content::render(f, inner, &view.content.lines, view.state.scroll, view.theme);
    }
    Statusbar::render(module.status_hints(), panes.status, f, view.theme);
}

/// Draws notices on top of the current screen while a handler is running.
struct TerminalNotifier<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    compositor: &'a mut Compositor,
    view: ScreenView<'a>,
}

impl<B: Backend> Notifier for TerminalNotifier<'_, B> {
    fn notify(&mut self, lines: &[String]) {
        let mut dialog = Dialog::message(lines.iter().cloned());
        let compositor = &mut *self.compositor;
        let view = &self.view;
        if let Err(err) = self.terminal.draw(|f| {
            draw_screen(f, compositor, view);
            dialog.render(f, compositor, view.theme);
        }) {
            warn!(error = %err, "failed to draw notice");
        }
    }
}
