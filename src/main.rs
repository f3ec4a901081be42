use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lazywp::config::{self, AppConfig};
use lazywp::exec::WpCli;
use lazywp::theme::Theme;
use lazywp::{App, default_registry};

#[derive(Parser, Debug)]
#[command(
    name = "lazywp",
    version,
    about = "Terminal UI for managing a WordPress site through wp-cli"
)]
struct Cli {
    /// Config file (toml, yaml or json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// WordPress root directory
    #[arg(long)]
    path: Option<PathBuf>,
    /// wp-cli executable
    #[arg(long)]
    wp_bin: Option<String>,
    /// Pass --allow-root to every wp-cli call
    #[arg(long)]
    allow_root: bool,
    /// Log filter, e.g. `debug` or `lazywp=trace`
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Validate the config file and exit
    CheckConfig,
}

fn init_tracing(cfg: &AppConfig) {
    let default_level = cfg.log_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let path = cfg.log_file_path();
    // The terminal belongs to the UI; without a log file there is no logging.
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let writer = Mutex::new(file);
    let is_json = matches!(
        std::env::var("LAZYWP_LOG_FORMAT").ok().as_deref(),
        Some("json" | "JSON")
    );
    if is_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
    }
}

fn main() {
    let code = match cli_main() {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "lazywp error");
            eprintln!("lazywp: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

fn cli_main() -> Result<i32> {
    let cli = Cli::parse();

    if let Some(Cmd::CheckConfig) = &cli.cmd {
        return Ok(check_config(&cli));
    }

    let (mut cfg, cfg_path) = config::load_app_config(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        cfg.log_level = Some(level.clone());
    }
    if let Some(bin) = &cli.wp_bin {
        cfg.wp_bin = bin.clone();
    }
    if cli.path.is_some() {
        cfg.wp_path = cli.path.clone();
    }
    cfg.allow_root |= cli.allow_root;

    init_tracing(&cfg);
    info!(config = ?cfg_path, wp_bin = %cfg.wp_bin, "starting lazywp");

    let (errors, warnings) = config::validate_app_config(&cfg);
    for w in &warnings {
        warn!(warning = %w, "config");
    }
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("config error: {e}");
        }
        return Ok(1);
    }

    let mut theme = Theme::by_name(cfg.theme.as_deref());
    let rejected = theme.apply_overrides(&cfg.colors);
    if !rejected.is_empty() {
        warn!(?rejected, "ignored color overrides");
    }
    let source = WpCli::new(cfg.wp_bin.clone())
        .with_path(cfg.wp_path.clone())
        .with_allow_root(cfg.allow_root);
    let mut app = App::new(default_registry()?, Box::new(source), theme, cfg.menu_width)?;

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| 0)
}

fn check_config(cli: &Cli) -> i32 {
    let Some(path) = config::find_config_file(cli.config.as_deref()) else {
        println!("no config file found, using defaults");
        return 0;
    };
    println!("Config: {}", path.display());
    let (errors, warnings) = config::validate_app_config_file(&path);
    for w in &warnings {
        println!("warning: {w}");
    }
    for e in &errors {
        println!("error: {e}");
    }
    if errors.is_empty() {
        println!("ok");
        0
    } else {
        1
    }
}
