/// Which of the two main panes receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Menu,
    Content,
}

impl Focus {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Focus::Menu => Focus::Content,
            Focus::Content => Focus::Menu,
        }
    }
}

/// Everything the controller needs to know about where the user is.
///
/// Owned by the controller; command modules only ever see a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Index of the active command module.
    pub active: usize,
    pub focus: Focus,
    /// Highlighted menu entry while the menu has focus.
    pub menu_hover: usize,
    /// Selected record within the active module's content.
    pub cursor: usize,
    /// First visible content line.
    pub scroll: usize,
    /// Set by an action handler to force the content to be re-read.
    pub reload: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: 0,
            focus: Focus::Content,
            menu_hover: 0,
            cursor: 0,
            scroll: 0,
            reload: false,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
        if self.focus == Focus::Menu {
            self.menu_hover = self.active;
        }
    }

    /// Make `module` active and hand focus to its content.
    pub fn select_module(&mut self, module: usize) {
        self.active = module;
        self.menu_hover = module;
        self.cursor = 0;
        self.scroll = 0;
        self.focus = Focus::Content;
    }

    pub fn hover_up(&mut self) {
        self.menu_hover = self.menu_hover.saturating_sub(1);
    }

    pub fn hover_down(&mut self, modules: usize) {
        if self.menu_hover + 1 < modules {
            self.menu_hover += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self, entries: usize) {
        if self.cursor + 1 < entries {
            self.cursor += 1;
        }
    }

    /// Keep the cursor on an existing entry, or at 0 when there are none.
    pub fn clamp_cursor(&mut self, entries: usize) {
        self.cursor = self.cursor.min(entries.saturating_sub(1));
    }
}
