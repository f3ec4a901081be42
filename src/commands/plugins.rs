use anyhow::Result;
use tracing::debug;

use super::record_table;
use crate::app::NavigationState;
use crate::registry::{
    ActionEnv, ActionHandler, ActionKind, Answer, Binding, CommandModule, Content, ContentProvider,
    DispatchContext, Effect,
};
use crate::source::{Activation, AutoUpdate, ItemSource};

const BINDINGS: [Binding; 8] = [
    Binding::new('a', ActionKind::Activate, "activate plugin"),
    Binding::new('d', ActionKind::Deactivate, "deactivate plugin"),
    Binding::new('i', ActionKind::Install, "install plugin"),
    Binding::new('r', ActionKind::Remove, "remove plugin"),
    Binding::new('u', ActionKind::Update, "update plugin"),
    Binding::new('U', ActionKind::UpdateAll, "update all plugins"),
    Binding::new('t', ActionKind::ToggleAutoUpdate, "toggle auto-update"),
    Binding::new('v', ActionKind::Verify, "verify checksums"),
];

const HINTS: [&str; 5] = [
    "a: activate",
    "d: deactivate",
    "i: install",
    "r: remove",
    "u: update (U: all)",
];

/// Installed plugins of the site.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plugins;

impl ContentProvider for Plugins {
    fn content(
        &self,
        source: &mut dyn ItemSource,
        state: &NavigationState,
        width: usize,
    ) -> Result<Content> {
        let records = source.invoke(&["plugin", "list"])?;
        record_table(records, state.cursor, width, "No plugins found.")
    }
}

impl ActionHandler for Plugins {
    fn perform(
        &self,
        action: ActionKind,
        answer: Answer,
        ctx: &DispatchContext,
        env: &mut ActionEnv<'_>,
    ) -> Result<Effect> {
        if action == ActionKind::Install {
            return match &answer {
                Answer::Start => Ok(Effect::Input(vec![
                    "Please enter the slug of the plugin you want to install".into(),
                ])),
                Answer::Text(slug) if !slug.trim().is_empty() => {
                    let slug = slug.trim();
                    env.mutate(
                        format!("Downloading plugin {slug}"),
                        &["plugin", "install", slug],
                    )?;
                    Ok(Effect::Done)
                }
                _ => Ok(Effect::Done),
            };
        }
        if action == ActionKind::UpdateAll {
            env.mutate("Updating all plugins", &["plugin", "update", "--all"])?;
            return Ok(Effect::Done);
        }

        let Some(plugin) = &ctx.selected else {
            return Ok(Effect::Done);
        };
        let name = plugin.name.as_str();
        match (action, answer) {
            (ActionKind::Activate, Answer::Start) if plugin.status == Activation::Inactive => {
                env.mutate(format!("Activating plugin {name}"), &["plugin", "activate", name])?;
            }
            (ActionKind::Deactivate, Answer::Start) if plugin.status == Activation::Active => {
                env.mutate(
                    format!("Deactivating plugin {name}"),
                    &["plugin", "deactivate", name],
                )?;
            }
            (ActionKind::Remove, Answer::Start) => {
                return Ok(Effect::Confirm(vec![format!(
                    "Are you sure you want to delete {name}?"
                )]));
            }
            (ActionKind::Remove, Answer::Confirmed(true)) => {
                env.mutate(format!("Deleting plugin {name}"), &["plugin", "delete", name])?;
            }
            (ActionKind::Update, Answer::Start) if plugin.update_available() => {
                env.mutate(format!("Updating plugin {name}"), &["plugin", "update", name])?;
            }
            (ActionKind::ToggleAutoUpdate, Answer::Start) => {
                let (verb, state) = match plugin.auto_update {
                    AutoUpdate::On => ("disable", "off"),
                    AutoUpdate::Off => ("enable", "on"),
                    AutoUpdate::Unknown => return Ok(Effect::Done),
                };
                env.mutate(
                    format!("Turning auto-updates {state} for {name}"),
                    &["plugin", "auto-updates", verb, name],
                )?;
            }
            (ActionKind::Verify, Answer::Start) => {
                env.notify(format!("Verifying plugin {name}"));
                let outcome = env
                    .source()
                    .invoke_and_discard(&["plugin", "verify-checksums", name]);
                let lines = match outcome {
                    Ok(()) => vec![format!("Plugin {name} verifies against wordpress.org")],
                    Err(err) => vec![format!("Plugin {name} failed verification"), err.summary()],
                };
                return Ok(Effect::Message(lines));
            }
            (action, answer) => debug!(?action, ?answer, plugin = name, "nothing to do"),
        }
        Ok(Effect::Done)
    }
}

impl CommandModule for Plugins {
    fn label(&self) -> &str {
        "Plugins"
    }

    fn menu_name(&self) -> &str {
        "Plugins"
    }

    fn bindings(&self) -> &[Binding] {
        &BINDINGS
    }

    fn status_hints(&self) -> &[&'static str] {
        &HINTS
    }
}
