pub mod app;
pub mod commands;
pub mod compositor;
pub mod config;
pub mod content;
pub mod dialog;
pub mod exec;
pub mod layout;
pub mod registry;
pub mod source;
pub mod theme;

pub mod components {
    pub mod statusbar;
    pub use statusbar::Statusbar;
    pub mod input;
    pub use input::LineInput;
}

pub use app::App;
pub use config::AppConfig;

use anyhow::Result;

/// Registry with the built-in modules in menu order.
///
/// # Errors
/// Fails only if a built-in module binds a reserved key.
pub fn default_registry() -> Result<registry::Registry> {
    Ok(registry::Registry::new()
        .with(commands::Dashboard::default())?
        .with(commands::Plugins)?
        .with(commands::Themes)?)
}
