//! Command modules and key resolution.
//!
//! A command module supplies a content provider and an action handler. The
//! [`Registry`] keeps modules in registration order and turns a key press into
//! either a global navigation step or one of the active module's actions.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app::{Focus, NavigationState};
use crate::content::ContentLine;
use crate::source::{ItemSource, Record, SourceError};

/// Keys owned by global navigation; modules may not bind them.
#[must_use]
pub fn is_reserved(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Enter
            | KeyCode::Esc
            | KeyCode::Char('q' | '?')
    )
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("module `{module}` binds reserved key `{key}`")]
    ReservedKey { module: String, key: char },
    #[error("module `{module}` binds a non-printable key")]
    NonPrintableKey { module: String },
    #[error("module `{0}` is already registered")]
    DuplicateModule(String),
}

/// Everything a module can ask the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Activate,
    Deactivate,
    ToggleActivation,
    Install,
    Remove,
    Update,
    UpdateAll,
    ToggleAutoUpdate,
    Verify,
}

impl ActionKind {
    /// Actions that operate on the row under the cursor.
    #[must_use]
    pub fn needs_selection(self) -> bool {
        !matches!(self, ActionKind::Install | ActionKind::UpdateAll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: char,
    pub action: ActionKind,
    pub description: &'static str,
}

impl Binding {
    #[must_use]
    pub const fn new(key: char, action: ActionKind, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }
}

/// What was selected when the content was last rendered.
///
/// Built fresh on every refresh; never reused across renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchContext {
    pub selected: Option<Record>,
}

/// Lines for the content pane plus the records they were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub lines: Vec<ContentLine>,
    pub records: Vec<Record>,
    /// Lines above the first record row (table header and rule).
    pub header_rows: usize,
}

impl Content {
    /// Single-line stand-in used when there is nothing to list.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            lines: vec![ContentLine::plain(text)],
            records: Vec::new(),
            header_rows: 0,
        }
    }

    /// Free-form lines that are not a record table.
    #[must_use]
    pub fn text(lines: Vec<ContentLine>) -> Self {
        Self {
            lines,
            records: Vec::new(),
            header_rows: 0,
        }
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Line index of record `entry`.
    #[must_use]
    pub fn line_of_entry(&self, entry: usize) -> usize {
        self.header_rows + entry
    }

    #[must_use]
    pub fn dispatch_context(&self, cursor: usize) -> DispatchContext {
        DispatchContext {
            selected: self.records.get(cursor).cloned(),
        }
    }
}

/// Answer fed back into a handler after a dialog closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// First invocation, straight from the key press.
    Start,
    Confirmed(bool),
    Text(String),
}

/// What the controller should do once a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Done,
    /// Show a message dialog that stays until the next key.
    Message(Vec<String>),
    /// Ask yes/no, then call the handler again with [`Answer::Confirmed`].
    Confirm(Vec<String>),
    /// Ask for one line of text, then call the handler again with [`Answer::Text`].
    Input(Vec<String>),
}

/// Draws a transient message dialog and returns immediately.
pub trait Notifier {
    fn notify(&mut self, lines: &[String]);
}

/// Capabilities handed to an action handler for one invocation.
pub struct ActionEnv<'a> {
    source: &'a mut dyn ItemSource,
    notifier: &'a mut dyn Notifier,
    reload: &'a mut bool,
}

impl<'a> ActionEnv<'a> {
    pub fn new(
        source: &'a mut dyn ItemSource,
        notifier: &'a mut dyn Notifier,
        reload: &'a mut bool,
    ) -> Self {
        Self {
            source,
            notifier,
            reload,
        }
    }

    pub fn source(&mut self) -> &mut dyn ItemSource {
        &mut *self.source
    }

    pub fn notify(&mut self, line: impl Into<String>) {
        self.notifier.notify(&[line.into()]);
    }

    pub fn request_reload(&mut self) {
        *self.reload = true;
    }

    /// Show `notice`, run a mutation, and ask for the content to be reloaded.
    ///
    /// # Errors
    /// Propagates the source failure; the reload flag is left untouched then.
    pub fn mutate(&mut self, notice: impl Into<String>, args: &[&str]) -> Result<(), SourceError> {
        let notice = notice.into();
        info!(%notice, ?args, "running mutation");
        self.notifier.notify(std::slice::from_ref(&notice));
        self.source.invoke_and_discard(args)?;
        self.request_reload();
        Ok(())
    }
}

/// Produces the current content lines for a module.
pub trait ContentProvider {
    /// `width` is the outer width of the content pane.
    ///
    /// # Errors
    /// Returns an error when the item source fails.
    fn content(
        &self,
        source: &mut dyn ItemSource,
        state: &NavigationState,
        width: usize,
    ) -> Result<Content>;
}

/// Carries out a module's declared actions.
pub trait ActionHandler {
    /// # Errors
    /// Returns an error when the item source fails; the controller reports it
    /// and leaves navigation state untouched.
    fn perform(
        &self,
        action: ActionKind,
        answer: Answer,
        ctx: &DispatchContext,
        env: &mut ActionEnv<'_>,
    ) -> Result<Effect>;
}

pub trait CommandModule: ContentProvider + ActionHandler {
    /// Content pane title.
    fn label(&self) -> &str;
    /// Menu entry text.
    fn menu_name(&self) -> &str;
    /// Declared in priority order; the first binding for a key wins.
    fn bindings(&self) -> &[Binding];
    fn status_hints(&self) -> &[&'static str] {
        &[]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalNav {
    ToggleFocus,
    Up,
    Down,
    PageUp,
    PageDown,
    Select,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Global(GlobalNav),
    Action(ActionKind),
    None,
}

#[derive(Default)]
pub struct Registry {
    modules: Vec<Box<dyn CommandModule>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// # Errors
    /// Rejects modules binding reserved or non-printable keys, and repeated labels.
    pub fn register<M: CommandModule + 'static>(&mut self, module: M) -> Result<(), RegistryError> {
        let label = module.label().to_string();
        if self.modules.iter().any(|m| m.label() == label) {
            return Err(RegistryError::DuplicateModule(label));
        }
        for (idx, binding) in module.bindings().iter().enumerate() {
            if binding.key.is_control() {
                return Err(RegistryError::NonPrintableKey { module: label });
            }
            if is_reserved(KeyCode::Char(binding.key)) {
                return Err(RegistryError::ReservedKey {
                    module: label,
                    key: binding.key,
                });
            }
            if module.bindings()[..idx].iter().any(|b| b.key == binding.key) {
                warn!(module = %label, key = %binding.key, "key bound twice, first binding wins");
            }
        }
        debug!(module = %label, bindings = module.bindings().len(), "registered command module");
        self.modules.push(Box::new(module));
        Ok(())
    }

    /// # Errors
    /// Same as [`Registry::register`].
    pub fn with<M: CommandModule + 'static>(mut self, module: M) -> Result<Self, RegistryError> {
        self.register(module)?;
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&dyn CommandModule> {
        self.modules.get(idx).map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CommandModule> {
        self.modules.iter().map(AsRef::as_ref)
    }

    /// Map a key to global navigation, an action of the active module, or nothing.
    #[must_use]
    pub fn resolve(&self, active: usize, focus: Focus, key: KeyEvent) -> Resolution {
        if let Some(nav) = global_nav(key) {
            return Resolution::Global(nav);
        }
        if focus != Focus::Content || key.modifiers.contains(KeyModifiers::CONTROL) {
            return Resolution::None;
        }
        let KeyCode::Char(c) = key.code else {
            return Resolution::None;
        };
        self.get(active)
            .and_then(|m| m.bindings().iter().find(|b| b.key == c))
            .map_or(Resolution::None, |b| Resolution::Action(b.action))
    }
}

fn global_nav(key: KeyEvent) -> Option<GlobalNav> {
    let nav = match key.code {
        KeyCode::Tab | KeyCode::BackTab => GlobalNav::ToggleFocus,
        KeyCode::Up => GlobalNav::Up,
        KeyCode::Down => GlobalNav::Down,
        KeyCode::PageUp => GlobalNav::PageUp,
        KeyCode::PageDown => GlobalNav::PageDown,
        KeyCode::Enter => GlobalNav::Select,
        KeyCode::Char('?') => GlobalNav::Help,
        KeyCode::Char('q') => GlobalNav::Quit,
        _ => return None,
    };
    Some(nav)
}
