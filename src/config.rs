use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compositor::DEFAULT_MENU_WIDTH;
use crate::theme::{ColorRole, parse_role_colors};

pub const LOCAL_CONFIG: &str = ".lazywp.toml";
const MIN_MENU_WIDTH: u16 = 10;

fn default_wp_bin() -> String {
    "wp".to_string()
}

fn default_menu_width() -> u16 {
    DEFAULT_MENU_WIDTH
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_wp_bin")]
    pub wp_bin: String,
    /// WordPress root, passed to every call as `--path=`.
    #[serde(default)]
    pub wp_path: Option<PathBuf>,
    #[serde(default)]
    pub allow_root: bool,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub theme: Option<String>, // "dark" or "light"
    #[serde(default)]
    pub colors: HashMap<String, String>, // role -> "fg[,bg]"
    #[serde(default = "default_menu_width")]
    pub menu_width: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wp_bin: default_wp_bin(),
            wp_path: None,
            allow_root: false,
            log_level: None,
            log_file: None,
            theme: None,
            colors: HashMap::new(),
            menu_width: default_menu_width(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("lazywp.log"))
    }
}

fn parse_by_extension(path: &Path, s: &str) -> Result<AppConfig, String> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
    {
        Some(ext) if ext == "yml" || ext == "yaml" => {
            serde_yaml::from_str::<AppConfig>(s).map_err(|e| e.to_string())
        }
        Some(ext) if ext == "json" => {
            serde_json::from_str::<AppConfig>(s).map_err(|e| e.to_string())
        }
        _ => toml::from_str::<AppConfig>(s).map_err(|e| e.to_string()),
    }
}

/// Read a config file; the format follows the extension (yaml, json, else toml).
///
/// # Errors
/// Fails when the file cannot be read or parsed.
pub fn load_app_config_file(path: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_by_extension(path, &s)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("parsing config {}", path.display()))
}

/// First existing config: `explicit`, then `./.lazywp.toml`, then
/// `$HOME/.config/lazywp/config.toml`.
#[must_use]
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lazywp").join("config.toml"))
        .filter(|p| p.is_file())
}

/// Load the config that applies, or defaults when there is none.
///
/// # Errors
/// Fails when an explicit or discovered file cannot be parsed.
pub fn load_app_config(explicit: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    match find_config_file(explicit) {
        Some(path) => Ok((load_app_config_file(&path)?, Some(path))),
        None => Ok((AppConfig::default(), None)),
    }
}

pub fn validate_app_config_file(path: &Path) -> (Vec<String>, Vec<String>) {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return (vec![format!("{}: {e}", path.display())], Vec::new()),
    };
    match parse_by_extension(path, &s) {
        Ok(cfg) => validate_app_config(&cfg),
        Err(e) => (vec![e], Vec::new()),
    }
}

pub fn validate_app_config(cfg: &AppConfig) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if cfg.wp_bin.trim().is_empty() {
        errors.push("wp_bin must not be empty".to_string());
    }
    if cfg.menu_width < MIN_MENU_WIDTH {
        errors.push(format!(
            "menu_width={} is below the minimum of {MIN_MENU_WIDTH}",
            cfg.menu_width
        ));
    }

    if let Some(theme) = &cfg.theme {
        let t = theme.to_ascii_lowercase();
        if t != "dark" && t != "light" {
            warnings.push(format!("theme='{theme}' not in ['dark','light'], using dark"));
        }
    }

    let mut roles: Vec<(&String, &String)> = cfg.colors.iter().collect();
    roles.sort();
    for (role, spec) in roles {
        if ColorRole::from_name(role).is_none() {
            warnings.push(format!("colors.{role}: unknown color role"));
        } else if parse_role_colors(spec).is_none() {
            warnings.push(format!("colors.{role}: cannot parse '{spec}'"));
        }
    }

    if let Some(level) = &cfg.log_level {
        if tracing_subscriber::EnvFilter::try_new(level).is_err() {
            warnings.push(format!("log_level='{level}' is not a valid filter"));
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml = write(&dir, "c.toml", "wp_bin = \"/usr/local/bin/wp\"\nmenu_width = 30\n");
        let yaml = write(&dir, "c.yaml", "wp_bin: wp\nallow_root: true\n");
        let json = write(&dir, "c.json", r#"{"theme":"light","colors":{"hover":"black,cyan"}}"#);

        let t = load_app_config_file(&toml).unwrap();
        assert_eq!(t.wp_bin, "/usr/local/bin/wp");
        assert_eq!(t.menu_width, 30);
        assert!(load_app_config_file(&yaml).unwrap().allow_root);
        let j = load_app_config_file(&json).unwrap();
        assert_eq!(j.theme.as_deref(), Some("light"));
        assert_eq!(j.menu_width, DEFAULT_MENU_WIDTH);
        assert_eq!(j.wp_bin, "wp");
    }

    #[test]
    fn parse_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(&dir, "bad.toml", "menu_width = \"wide\"\n");
        assert!(load_app_config_file(&bad).is_err());
        let (errors, _) = validate_app_config_file(&bad);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn validation_splits_errors_and_warnings() {
        let mut cfg = AppConfig {
            wp_bin: " ".into(),
            menu_width: 4,
            ..AppConfig::default()
        };
        cfg.colors.insert("sparkle".into(), "red".into());
        cfg.colors.insert("hover".into(), "not-a-color".into());
        let (errors, warnings) = validate_app_config(&cfg);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            warnings,
            vec![
                "colors.hover: cannot parse 'not-a-color'".to_string(),
                "colors.sparkle: unknown color role".to_string(),
            ]
        );
    }

    #[test]
    fn defaults_are_valid() {
        let (errors, warnings) = validate_app_config(&AppConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn explicit_path_wins() {
        let p = PathBuf::from("/nowhere/custom.yaml");
        assert_eq!(find_config_file(Some(&p)), Some(p));
    }
}
