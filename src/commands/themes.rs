use anyhow::Result;
use tracing::debug;

use super::record_table;
use crate::app::NavigationState;
use crate::registry::{
    ActionEnv, ActionHandler, ActionKind, Answer, Binding, CommandModule, Content, ContentProvider,
    DispatchContext, Effect,
};
use crate::source::{Activation, AutoUpdate, ItemSource};

const BINDINGS: [Binding; 6] = [
    Binding::new('a', ActionKind::ToggleActivation, "activate theme"),
    Binding::new('i', ActionKind::Install, "install theme"),
    Binding::new('r', ActionKind::Remove, "remove theme"),
    Binding::new('u', ActionKind::Update, "update theme"),
    Binding::new('U', ActionKind::UpdateAll, "update all themes"),
    Binding::new('t', ActionKind::ToggleAutoUpdate, "toggle auto-update"),
];

const HINTS: [&str; 4] = [
    "a: de/active",
    "i: install",
    "r: remove",
    "u: update (U: all)",
];

/// Installed themes of the site.
#[derive(Debug, Default, Clone, Copy)]
pub struct Themes;

impl ContentProvider for Themes {
    fn content(
        &self,
        source: &mut dyn ItemSource,
        state: &NavigationState,
        width: usize,
    ) -> Result<Content> {
        let records = source.invoke(&["theme", "list"])?;
        record_table(records, state.cursor, width, "No themes found.")
    }
}

impl ActionHandler for Themes {
    fn perform(
        &self,
        action: ActionKind,
        answer: Answer,
        ctx: &DispatchContext,
        env: &mut ActionEnv<'_>,
    ) -> Result<Effect> {
        match (action, &answer) {
            (ActionKind::Install, Answer::Start) => {
                return Ok(Effect::Input(vec![
                    "Please enter the slug of the theme you want to install".into(),
                ]));
            }
            (ActionKind::Install, Answer::Text(slug)) if !slug.trim().is_empty() => {
                let slug = slug.trim();
                env.mutate(format!("Downloading theme {slug}"), &["theme", "install", slug])?;
                return Ok(Effect::Done);
            }
            (ActionKind::UpdateAll, _) => {
                env.mutate("Updating all themes", &["theme", "update", "--all"])?;
                return Ok(Effect::Done);
            }
            _ => {}
        }

        let Some(theme) = &ctx.selected else {
            return Ok(Effect::Done);
        };
        let name = theme.name.as_str();
        match (action, answer) {
            // A site always has exactly one active theme; it is replaced, never switched off.
            (ActionKind::ToggleActivation, Answer::Start) if theme.status == Activation::Active => {
                return Ok(Effect::Message(vec![
                    format!("Theme {name} is already active"),
                    "Activate another theme to replace it".into(),
                ]));
            }
            (ActionKind::ToggleActivation, Answer::Start) => {
                env.mutate(format!("Activating theme {name}"), &["theme", "activate", name])?;
            }
            (ActionKind::Remove, Answer::Start) => {
                return Ok(Effect::Confirm(vec![format!(
                    "Are you sure you want to delete {name}?"
                )]));
            }
            (ActionKind::Remove, Answer::Confirmed(true)) => {
                env.mutate(format!("Deleting theme {name}"), &["theme", "delete", name])?;
            }
            (ActionKind::Update, Answer::Start) if theme.update_available() => {
                env.mutate(format!("Updating theme {name}"), &["theme", "update", name])?;
            }
            (ActionKind::ToggleAutoUpdate, Answer::Start) => {
                let (verb, state) = match theme.auto_update {
                    AutoUpdate::On => ("disable", "off"),
                    AutoUpdate::Off => ("enable", "on"),
                    AutoUpdate::Unknown => return Ok(Effect::Done),
                };
                env.mutate(
                    format!("Turning auto-updates {state} for {name}"),
                    &["theme", "auto-updates", verb, name],
                )?;
            }
            (action, answer) => debug!(?action, ?answer, theme = name, "nothing to do"),
        }
        Ok(Effect::Done)
    }
}

impl CommandModule for Themes {
    fn label(&self) -> &str {
        "Themes"
    }

    fn menu_name(&self) -> &str {
        "Themes"
    }

    fn bindings(&self) -> &[Binding] {
        &BINDINGS
    }

    fn status_hints(&self) -> &[&'static str] {
        &HINTS
    }
}
