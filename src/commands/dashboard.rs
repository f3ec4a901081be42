use anyhow::Result;

use crate::app::NavigationState;
use crate::content::ContentLine;
use crate::registry::{
    ActionEnv, ActionHandler, ActionKind, Answer, Binding, CommandModule, Content, ContentProvider,
    DispatchContext, Effect,
};
use crate::source::ItemSource;
use crate::theme::ColorRole;

const BANNER: [&str; 4] = [
    r"   __   ___ ______  ___      _____",
    r"  / /  / _ /_  /\ \/ / | /| / / _ \ ",
    r" / /__/ __ |/ /_ \  /| |/ |/ / ___/",
    r"/____/_/ |_/___/ /_/ |__/|__/_/ ",
];

/// Welcome screen. Never touches the item source.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard {
    version: &'static str,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl Dashboard {
    #[must_use]
    pub fn new(version: &'static str) -> Self {
        Self { version }
    }

    fn lines(&self) -> Vec<ContentLine> {
        let mut lines: Vec<ContentLine> = BANNER
            .iter()
            .map(|l| ContentLine::styled(format!("  {l}"), ColorRole::Title))
            .collect();
        lines.push(ContentLine::plain(""));
        for text in [
            "Welcome to lazywp - a tui wrapper for wpcli".to_string(),
            format!("Version: {}", self.version),
            String::new(),
            "Select menu entry and press [enter]".to_string(),
            "Use [tab] to switch between the menu and content".to_string(),
            "Press [?] for help".to_string(),
            "Press [q] to exit lazywp".to_string(),
        ] {
            lines.push(ContentLine::plain(format!("  {text}")));
        }
        lines
    }
}

impl ContentProvider for Dashboard {
    fn content(
        &self,
        _source: &mut dyn ItemSource,
        _state: &NavigationState,
        _width: usize,
    ) -> Result<Content> {
        Ok(Content::text(self.lines()))
    }
}

impl ActionHandler for Dashboard {
    fn perform(
        &self,
        _action: ActionKind,
        _answer: Answer,
        _ctx: &DispatchContext,
        _env: &mut ActionEnv<'_>,
    ) -> Result<Effect> {
        Ok(Effect::Done)
    }
}

impl CommandModule for Dashboard {
    fn label(&self) -> &str {
        "Dashboard"
    }

    fn menu_name(&self) -> &str {
        "Dashboard"
    }

    fn bindings(&self) -> &[Binding] {
        &[]
    }
}
